// ABOUTME: Application configuration handling.
// ABOUTME: Loads and saves keybindings and layout settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::HotkeyAction;

/// Binding value that leaves an action without a hotkey
pub const UNBOUND: &str = "none";

/// Key combination per action, e.g. `"Shift+Alt+Enter"`.
/// An empty string keeps the action's default; `"none"` unbinds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct KeybindingConfig {
    pub close: String,
    pub focus_prev: String,
    pub focus_next: String,
    pub split_horizontal: String,
    pub split_vertical: String,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            close: HotkeyAction::Close.default_combo().to_string(),
            focus_prev: HotkeyAction::FocusPrev.default_combo().to_string(),
            focus_next: HotkeyAction::FocusNext.default_combo().to_string(),
            split_horizontal: HotkeyAction::SplitHorizontal.default_combo().to_string(),
            split_vertical: HotkeyAction::SplitVertical.default_combo().to_string(),
        }
    }
}

impl KeybindingConfig {
    pub fn get(&self, action: HotkeyAction) -> &str {
        match action {
            HotkeyAction::Close => &self.close,
            HotkeyAction::FocusPrev => &self.focus_prev,
            HotkeyAction::FocusNext => &self.focus_next,
            HotkeyAction::SplitHorizontal => &self.split_horizontal,
            HotkeyAction::SplitVertical => &self.split_vertical,
        }
    }

    pub fn set(&mut self, action: HotkeyAction, combo: impl Into<String>) {
        let slot = match action {
            HotkeyAction::Close => &mut self.close,
            HotkeyAction::FocusPrev => &mut self.focus_prev,
            HotkeyAction::FocusNext => &mut self.focus_next,
            HotkeyAction::SplitHorizontal => &mut self.split_horizontal,
            HotkeyAction::SplitVertical => &mut self.split_vertical,
        };
        *slot = combo.into();
    }

    /// Bound combinations in [`HotkeyAction::all`] order
    pub fn bindings(&self) -> Vec<(HotkeyAction, &str)> {
        HotkeyAction::all()
            .iter()
            .filter_map(|action| match self.get(*action).trim() {
                "" => Some((*action, action.default_combo())),
                combo if combo.eq_ignore_ascii_case(UNBOUND) => None,
                combo => Some((*action, combo)),
            })
            .collect()
    }
}

/// Layout behavior settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Share of the area given to the original pane when splitting (0.0 to 1.0, exclusive)
    pub default_fraction: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            default_fraction: 0.5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hotkey combinations
    pub keybindings: KeybindingConfig,

    /// Split behavior
    pub layout: LayoutSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Could not determine config directory")]
    NoConfigDir,
}

impl Config {
    /// Get the default config file path (~/.config/tilewm/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tilewm").join("config.toml"))
    }

    /// Parse config from TOML text and check value ranges
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a path
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load config from the default path, see [`Config::load_or_default_from`]
    pub fn load_or_default() -> Self {
        Self::default_path()
            .map(|path| Self::load_or_default_from(&path))
            .unwrap_or_default()
    }

    /// A missing file gives defaults silently; an unreadable or invalid one
    /// gives defaults with a warning.
    pub fn load_or_default_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring config at {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fraction = self.layout.default_fraction;
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "layout.default_fraction",
                reason: format!("{fraction} is not between 0 and 1"),
            });
        }
        Ok(())
    }

    /// Validate, then write as TOML, creating missing directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let content = toml::to_string_pretty(self)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn save_to_default(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save(&path)?;
        Ok(path)
    }
}

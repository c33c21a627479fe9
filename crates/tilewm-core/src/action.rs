// ABOUTME: Named actions that hotkeys can trigger.
// ABOUTME: Shared between the input router, config file and the wiring layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HotkeyAction {
    Close,
    FocusPrev,
    FocusNext,
    SplitHorizontal,
    SplitVertical,
}

impl HotkeyAction {
    /// All actions in binding iteration order
    pub fn all() -> &'static [HotkeyAction] {
        &[
            HotkeyAction::Close,
            HotkeyAction::FocusPrev,
            HotkeyAction::FocusNext,
            HotkeyAction::SplitHorizontal,
            HotkeyAction::SplitVertical,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            HotkeyAction::Close => "close",
            HotkeyAction::FocusPrev => "focus-prev",
            HotkeyAction::FocusNext => "focus-next",
            HotkeyAction::SplitHorizontal => "split-horizontal",
            HotkeyAction::SplitVertical => "split-vertical",
        }
    }

    /// Key combination bound to this action when the config says nothing
    pub fn default_combo(&self) -> &'static str {
        match self {
            HotkeyAction::Close => "Shift+W",
            HotkeyAction::FocusPrev => "Shift+Enter",
            HotkeyAction::FocusNext => "Shift+Tab",
            HotkeyAction::SplitHorizontal => "Shift+Enter",
            HotkeyAction::SplitVertical => "Shift+Alt+Enter",
        }
    }
}

impl fmt::Display for HotkeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for HotkeyAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HotkeyAction::all()
            .iter()
            .copied()
            .find(|action| action.name() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

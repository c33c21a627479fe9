// ABOUTME: Shared types and configuration for tilewm.
// ABOUTME: Defines hotkey actions and config file handling.

pub mod action;
pub mod config;

pub use action::{HotkeyAction, UnknownAction};
pub use config::{Config, ConfigError, KeybindingConfig, LayoutSettings, UNBOUND};

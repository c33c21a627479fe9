// ABOUTME: Keyboard input handling for tilewm.
// ABOUTME: Parses key combinations and routes matching key events to named actions.

pub mod combo;
pub mod router;

pub use combo::{HotkeyError, KeyCombo, KeyEvent, Modifiers};
pub use router::{Dispatch, HotkeyRouter};

// ABOUTME: Pane capability stored in layout tree leaves.
// ABOUTME: The tree only needs identity plus open/close/focus/blur hooks.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaneId(pub u64);

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content unit owned by a leaf of the layout tree.
///
/// The tree calls `focus` and `blur` during focus navigation. `open` and
/// `close` belong to whoever creates and disposes the pane; the tree never
/// calls them. All hooks default to doing nothing.
pub trait Pane {
    /// Identity, unique among the panes of one tree
    fn id(&self) -> PaneId;

    fn open(&mut self) {}

    fn close(&mut self) {}

    fn focus(&mut self) {}

    fn blur(&mut self) {}
}

/// Titled pane that only tracks its own state and logs transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplePane {
    id: PaneId,
    title: String,
    open: bool,
    focused: bool,
}

impl SimplePane {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: PaneId(id),
            title: title.into(),
            open: false,
            focused: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl Pane for SimplePane {
    fn id(&self) -> PaneId {
        self.id
    }

    fn open(&mut self) {
        self.open = true;
        tracing::debug!("Opened pane {}", self.title);
    }

    fn close(&mut self) {
        self.open = false;
        self.focused = false;
        tracing::debug!("Closed pane {}", self.title);
    }

    fn focus(&mut self) {
        self.focused = true;
        tracing::info!("Focusing on pane: {}", self.title);
    }

    fn blur(&mut self) {
        self.focused = false;
        tracing::info!("Blurring pane: {}", self.title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_pane_tracks_focus() {
        let mut pane = SimplePane::new(7, "w7");
        assert_eq!(pane.id(), PaneId(7));
        assert!(!pane.is_focused());

        pane.focus();
        assert!(pane.is_focused());
        pane.blur();
        assert!(!pane.is_focused());
    }

    #[test]
    fn close_clears_focus() {
        let mut pane = SimplePane::new(1, "w1");
        pane.open();
        pane.focus();
        pane.close();
        assert!(!pane.is_open());
        assert!(!pane.is_focused());
    }
}

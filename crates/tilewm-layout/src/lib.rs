// ABOUTME: Pane layout management for tilewm.
// ABOUTME: Binary split tree of panes with focus navigation and rectangle projection.

mod pane;
mod projection;
mod tree;

pub use pane::{Pane, PaneId, SimplePane};
pub use projection::Rect;
pub use tree::{LayoutError, LayoutTree, NodeId, NodeView, Orientation, DEFAULT_FRACTION};

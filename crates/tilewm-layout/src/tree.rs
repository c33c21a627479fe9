// ABOUTME: Binary tree structure for pane layout.
// ABOUTME: Supports splitting, removing, lookups and focus navigation in traversal order.

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::pane::{Pane, PaneId};

/// Share of the area kept by the original pane when no fraction is given
pub const DEFAULT_FRACTION: f32 = 0.5;

slotmap::new_key_type! {
    /// Handle to a node of a [`LayoutTree`].
    ///
    /// Handles stay valid while the node is in the tree. Once the node is
    /// removed the handle is rejected with [`LayoutError::NodeNotInTree`],
    /// even if its slot has been reused.
    pub struct NodeId;
}

/// Axis along which a split divides its area.
/// Horizontal places the children side by side, Vertical stacks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Layout tree already has a root")]
    AlreadyInitialized,

    #[error("Node is not part of this layout tree")]
    NodeNotInTree,

    #[error("Split fraction {0} is outside (0, 1)")]
    InvalidFraction(f32),

    #[error("Pane {0} is already in the layout tree")]
    DuplicateIdentity(PaneId),
}

#[derive(Debug)]
enum Node<P> {
    Leaf {
        pane: P,
        parent: Option<NodeId>,
    },
    Split {
        orientation: Orientation,
        fraction: f32,
        children: [NodeId; 2],
        parent: Option<NodeId>,
    },
}

impl<P> Node<P> {
    fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Leaf { parent, .. } | Node::Split { parent, .. } => *parent,
        }
    }

    fn set_parent(&mut self, new_parent: Option<NodeId>) {
        match self {
            Node::Leaf { parent, .. } | Node::Split { parent, .. } => *parent = new_parent,
        }
    }
}

/// Read-only view of a node, enough for a renderer to walk the tree shape
#[derive(Debug)]
pub enum NodeView<'a, P> {
    Leaf {
        pane: &'a P,
    },
    Split {
        orientation: Orientation,
        fraction: f32,
        children: [NodeId; 2],
    },
}

/// Layout of panes as a binary tree of splits.
///
/// Every live node in the arena is reachable from `root`; removal frees
/// nodes immediately, so membership in the arena is membership in the tree.
#[derive(Debug)]
pub struct LayoutTree<P> {
    nodes: SlotMap<NodeId, Node<P>>,
    root: Option<NodeId>,
    focused: Option<NodeId>,
}

fn check_fraction(fraction: f32) -> Result<(), LayoutError> {
    if fraction > 0.0 && fraction < 1.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidFraction(fraction))
    }
}

impl<P: Pane> LayoutTree<P> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
            focused: None,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn focused_pane(&self) -> Option<&P> {
        self.focused.and_then(|leaf| self.pane(leaf))
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of leaves (panes) in the tree
    pub fn len(&self) -> usize {
        // A full binary tree with n leaves has 2n - 1 nodes
        (self.nodes.len() + 1) / 2
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some()
    }

    pub fn is_leaf(&self, node: NodeId) -> bool {
        matches!(self.nodes.get(node), Some(Node::Leaf { .. }))
    }

    pub fn node(&self, node: NodeId) -> Option<NodeView<'_, P>> {
        self.nodes.get(node).map(|n| match n {
            Node::Leaf { pane, .. } => NodeView::Leaf { pane },
            Node::Split {
                orientation,
                fraction,
                children,
                ..
            } => NodeView::Split {
                orientation: *orientation,
                fraction: *fraction,
                children: *children,
            },
        })
    }

    pub fn pane(&self, leaf: NodeId) -> Option<&P> {
        match self.nodes.get(leaf) {
            Some(Node::Leaf { pane, .. }) => Some(pane),
            _ => None,
        }
    }

    pub fn pane_mut(&mut self, leaf: NodeId) -> Option<&mut P> {
        match self.nodes.get_mut(leaf) {
            Some(Node::Leaf { pane, .. }) => Some(pane),
            _ => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(Node::parent)
    }

    /// The other child of `node`'s parent
    pub fn sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        match self.nodes.get(parent) {
            Some(Node::Split { children, .. }) => {
                if children[0] == node {
                    Some(children[1])
                } else {
                    Some(children[0])
                }
            }
            _ => None,
        }
    }

    /// Place the first pane as the root leaf of an empty tree
    pub fn open_first(&mut self, pane: P) -> Result<NodeId, LayoutError> {
        if self.root.is_some() {
            return Err(LayoutError::AlreadyInitialized);
        }

        let id = pane.id();
        let leaf = self.nodes.insert(Node::Leaf { pane, parent: None });
        self.root = Some(leaf);
        tracing::debug!("Opened root pane {}", id);
        Ok(leaf)
    }

    /// Split `leaf` with an even share, see [`LayoutTree::split_leaf`]
    pub fn split_leaf_even(
        &mut self,
        leaf: NodeId,
        orientation: Orientation,
        new_pane: P,
    ) -> Result<NodeId, LayoutError> {
        self.split_leaf(leaf, orientation, new_pane, DEFAULT_FRACTION)
    }

    /// Replace `leaf` with a split holding `leaf` first and a new leaf for
    /// `new_pane` second. `fraction` is the share kept by `leaf`.
    /// Returns the new leaf; `leaf` keeps its handle and pane.
    pub fn split_leaf(
        &mut self,
        leaf: NodeId,
        orientation: Orientation,
        new_pane: P,
        fraction: f32,
    ) -> Result<NodeId, LayoutError> {
        let parent = match self.nodes.get(leaf) {
            Some(Node::Leaf { parent, .. }) => *parent,
            _ => return Err(LayoutError::NodeNotInTree),
        };
        check_fraction(fraction)?;

        let new_id = new_pane.id();
        if self.find_leaf_by_id(new_id).is_some() {
            return Err(LayoutError::DuplicateIdentity(new_id));
        }

        let new_leaf = self.nodes.insert(Node::Leaf {
            pane: new_pane,
            parent: None,
        });
        let split = self.nodes.insert(Node::Split {
            orientation,
            fraction,
            children: [leaf, new_leaf],
            parent,
        });

        self.set_parent(leaf, Some(split));
        self.set_parent(new_leaf, Some(split));
        self.replace_child(parent, leaf, split);

        tracing::debug!(
            "Split {:?} with new pane {} ({:?}, fraction {})",
            leaf,
            new_id,
            orientation,
            fraction
        );
        Ok(new_leaf)
    }

    /// Remove `leaf` and hand its pane back. The sibling takes the place of
    /// the parent split, which is discarded with the leaf.
    ///
    /// Focus is only touched when it pointed at `leaf`, in which case it is
    /// cleared; see [`LayoutTree::remove_focused`] for focus hand-over.
    pub fn remove_leaf(&mut self, leaf: NodeId) -> Result<P, LayoutError> {
        let parent = match self.nodes.get(leaf) {
            Some(Node::Leaf { parent, .. }) => *parent,
            _ => return Err(LayoutError::NodeNotInTree),
        };

        if let Some(parent) = parent {
            let (sibling, grandparent) = match self.nodes.get(parent) {
                Some(Node::Split {
                    children, parent, ..
                }) => {
                    let sibling = if children[0] == leaf {
                        children[1]
                    } else {
                        children[0]
                    };
                    (sibling, *parent)
                }
                _ => return Err(LayoutError::NodeNotInTree),
            };

            self.set_parent(sibling, grandparent);
            self.replace_child(grandparent, parent, sibling);
            self.nodes.remove(parent);
        } else {
            self.root = None;
        }

        if self.focused == Some(leaf) {
            self.focused = None;
        }

        match self.nodes.remove(leaf) {
            Some(Node::Leaf { pane, .. }) => {
                tracing::debug!("Removed pane {}, {} remaining", pane.id(), self.len());
                Ok(pane)
            }
            _ => Err(LayoutError::NodeNotInTree),
        }
    }

    /// Split the focused leaf and move focus onto the new pane.
    /// Does nothing (and drops `new_pane`) when nothing is focused.
    pub fn split_focused(
        &mut self,
        orientation: Orientation,
        new_pane: P,
        fraction: f32,
    ) -> Result<Option<NodeId>, LayoutError> {
        let Some(focused) = self.focused else {
            return Ok(None);
        };

        let new_leaf = self.split_leaf(focused, orientation, new_pane, fraction)?;
        self.focused = Some(new_leaf);
        Ok(Some(new_leaf))
    }

    /// Remove the focused leaf. Focus moves to its former sibling only when
    /// that sibling is a leaf; a split sibling or an emptied tree leaves
    /// nothing focused.
    pub fn remove_focused(&mut self) -> Result<Option<P>, LayoutError> {
        let Some(focused) = self.focused else {
            return Ok(None);
        };

        let sibling = self.sibling(focused);
        let pane = self.remove_leaf(focused)?;
        self.focused = sibling.filter(|node| self.is_leaf(*node));
        Ok(Some(pane))
    }

    /// Change the share of a split's first child
    pub fn set_fraction(&mut self, split: NodeId, new_fraction: f32) -> Result<(), LayoutError> {
        check_fraction(new_fraction)?;
        match self.nodes.get_mut(split) {
            Some(Node::Split { fraction, .. }) => {
                *fraction = new_fraction;
                Ok(())
            }
            _ => Err(LayoutError::NodeNotInTree),
        }
    }

    pub fn find_leaf_by_id(&self, id: PaneId) -> Option<NodeId> {
        self.root.and_then(|root| self.find_leaf_by_id_in(id, root))
    }

    /// Depth-first search below `node`, first child before second
    pub fn find_leaf_by_id_in(&self, id: PaneId, node: NodeId) -> Option<NodeId> {
        match self.nodes.get(node)? {
            Node::Leaf { pane, .. } => (pane.id() == id).then_some(node),
            Node::Split { children, .. } => self
                .find_leaf_by_id_in(id, children[0])
                .or_else(|| self.find_leaf_by_id_in(id, children[1])),
        }
    }

    pub fn find_leaf(&self) -> Option<NodeId> {
        self.root.and_then(|root| self.find_leaf_in(root))
    }

    /// First leaf below `node` in traversal order
    pub fn find_leaf_in(&self, node: NodeId) -> Option<NodeId> {
        match self.nodes.get(node)? {
            Node::Leaf { .. } => Some(node),
            Node::Split { children, .. } => self
                .find_leaf_in(children[0])
                .or_else(|| self.find_leaf_in(children[1])),
        }
    }

    pub fn find_last_leaf(&self) -> Option<NodeId> {
        self.root.and_then(|root| self.find_last_leaf_in(root))
    }

    /// Last leaf below `node` in traversal order
    pub fn find_last_leaf_in(&self, node: NodeId) -> Option<NodeId> {
        match self.nodes.get(node)? {
            Node::Leaf { .. } => Some(node),
            Node::Split { children, .. } => self
                .find_last_leaf_in(children[1])
                .or_else(|| self.find_last_leaf_in(children[0])),
        }
    }

    /// Visit every leaf, first child before second
    pub fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(NodeId, &P),
    {
        if let Some(root) = self.root {
            self.walk(root, &mut visitor);
        }
    }

    fn walk<F>(&self, node: NodeId, visitor: &mut F)
    where
        F: FnMut(NodeId, &P),
    {
        match self.nodes.get(node) {
            Some(Node::Leaf { pane, .. }) => visitor(node, pane),
            Some(Node::Split { children, .. }) => {
                self.walk(children[0], visitor);
                self.walk(children[1], visitor);
            }
            None => {}
        }
    }

    /// All leaves in traversal order
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut result = Vec::with_capacity(self.len());
        self.traverse(|leaf, _| result.push(leaf));
        result
    }

    /// All pane ids in traversal order
    pub fn pane_ids(&self) -> Vec<PaneId> {
        let mut result = Vec::with_capacity(self.len());
        self.traverse(|_, pane| result.push(pane.id()));
        result
    }

    /// Blur the focused pane, then focus the pane with `id` if it exists.
    /// An unknown id leaves the old leaf focused but blurred.
    pub fn focus(&mut self, id: PaneId) {
        if let Some(previous) = self.focused {
            if let Some(pane) = self.pane_mut(previous) {
                pane.blur();
            }
        }

        if let Some(leaf) = self.find_leaf_by_id(id) {
            self.focused = Some(leaf);
            if let Some(pane) = self.pane_mut(leaf) {
                pane.focus();
            }
        } else {
            tracing::debug!("No pane {} to focus", id);
        }
    }

    /// Focus by handle, e.g. after hit-testing a click
    pub fn focus_leaf(&mut self, leaf: NodeId) -> Result<(), LayoutError> {
        let id = self.pane(leaf).map(Pane::id).ok_or(LayoutError::NodeNotInTree)?;
        self.focus(id);
        Ok(())
    }

    /// Focus the leaf after the focused one, wrapping to the first.
    /// Focuses the first leaf when nothing is focused.
    pub fn focus_next(&mut self) {
        let leaves = self.leaves();
        let next = match self.focused_position(&leaves) {
            Some(index) => leaves.get((index + 1) % leaves.len()).copied(),
            None => self.find_leaf(),
        };
        self.focus_existing(next);
    }

    /// Focus the leaf before the focused one, wrapping to the last.
    /// Focuses the last leaf when nothing is focused.
    pub fn focus_prev(&mut self) {
        let leaves = self.leaves();
        let prev = match self.focused_position(&leaves) {
            Some(index) => leaves.get((index + leaves.len() - 1) % leaves.len()).copied(),
            None => self.find_last_leaf(),
        };
        self.focus_existing(prev);
    }

    fn focused_position(&self, leaves: &[NodeId]) -> Option<usize> {
        let focused = self.focused?;
        leaves.iter().position(|leaf| *leaf == focused)
    }

    fn focus_existing(&mut self, leaf: Option<NodeId>) {
        if let Some(id) = leaf.and_then(|leaf| self.pane(leaf)).map(Pane::id) {
            self.focus(id);
        }
    }

    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) {
        if let Some(node) = self.nodes.get_mut(node) {
            node.set_parent(parent);
        }
    }

    /// Point the slot that held `old` at `new`; a missing parent means the root
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        let Some(parent) = parent else {
            self.root = Some(new);
            return;
        };

        if let Some(Node::Split { children, .. }) = self.nodes.get_mut(parent) {
            if children[0] == old {
                children[0] = new;
            } else if children[1] == old {
                children[1] = new;
            }
        }
    }
}

impl<P: Pane> Default for LayoutTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

// ABOUTME: Projects the layout tree onto a normalized surface.
// ABOUTME: Computes per-pane rectangles and hit-tests points against them.

use serde::Serialize;

use crate::pane::{Pane, PaneId};
use crate::tree::{LayoutTree, NodeId, NodeView, Orientation};

/// Rectangle in normalized coordinates (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn full() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }

    /// Inclusive on all edges, so points on a shared border hit both sides
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    /// Divide along `orientation`, giving `fraction` of the area to the first part
    pub fn split(&self, orientation: Orientation, fraction: f32) -> (Rect, Rect) {
        match orientation {
            Orientation::Horizontal => (
                Rect {
                    x: self.x,
                    y: self.y,
                    width: self.width * fraction,
                    height: self.height,
                },
                Rect {
                    x: self.x + self.width * fraction,
                    y: self.y,
                    width: self.width * (1.0 - fraction),
                    height: self.height,
                },
            ),
            Orientation::Vertical => (
                Rect {
                    x: self.x,
                    y: self.y,
                    width: self.width,
                    height: self.height * fraction,
                },
                Rect {
                    x: self.x,
                    y: self.y + self.height * fraction,
                    width: self.width,
                    height: self.height * (1.0 - fraction),
                },
            ),
        }
    }
}

impl<P: Pane> LayoutTree<P> {
    /// Get all panes with their layout rectangles, in traversal order
    pub fn pane_rects(&self) -> Vec<(PaneId, Rect)> {
        let mut result = Vec::with_capacity(self.len());
        if let Some(root) = self.root() {
            collect_rects(self, root, Rect::full(), &mut result);
        }
        result
    }

    /// Pane whose rectangle contains the normalized point, first in traversal order on ties
    pub fn pane_at(&self, x: f32, y: f32) -> Option<PaneId> {
        self.pane_rects()
            .into_iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(id, _)| id)
    }
}

fn collect_rects<P: Pane>(
    tree: &LayoutTree<P>,
    node: NodeId,
    rect: Rect,
    out: &mut Vec<(PaneId, Rect)>,
) {
    match tree.node(node) {
        Some(NodeView::Leaf { pane }) => out.push((pane.id(), rect)),
        Some(NodeView::Split {
            orientation,
            fraction,
            children,
        }) => {
            let (first_rect, second_rect) = rect.split(orientation, fraction);
            collect_rects(tree, children[0], first_rect, out);
            collect_rects(tree, children[1], second_rect, out);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimplePane;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn empty_tree_has_no_rects() {
        let tree: LayoutTree<SimplePane> = LayoutTree::new();
        assert!(tree.pane_rects().is_empty());
        assert_eq!(tree.pane_at(0.5, 0.5), None);
    }

    #[test]
    fn single_pane_fills_surface() {
        let mut tree = LayoutTree::new();
        tree.open_first(SimplePane::new(1, "w1")).unwrap();
        assert_eq!(tree.pane_rects(), vec![(PaneId(1), Rect::full())]);
    }

    #[test]
    fn split_gives_equal_space() {
        let mut tree = LayoutTree::new();
        let first = tree.open_first(SimplePane::new(1, "w1")).unwrap();
        tree.split_leaf_even(first, Orientation::Horizontal, SimplePane::new(2, "w2"))
            .unwrap();

        let rects = tree.pane_rects();
        assert_eq!(rects.len(), 2);
        assert!(close(rects[0].1.width, 0.5));
        assert!(close(rects[1].1.width, 0.5));
        assert!(close(rects[1].1.x, 0.5));
        assert!(close(rects[1].1.height, 1.0));
    }

    #[test]
    fn fractions_divide_along_orientation() {
        let mut tree = LayoutTree::new();
        let w1 = tree.open_first(SimplePane::new(1, "w1")).unwrap();
        let w2 = tree
            .split_leaf(w1, Orientation::Horizontal, SimplePane::new(2, "w2"), 0.25)
            .unwrap();
        tree.split_leaf(w2, Orientation::Vertical, SimplePane::new(3, "w3"), 0.6)
            .unwrap();

        let rects = tree.pane_rects();
        let ids: Vec<_> = rects.iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let (w1_rect, w2_rect, w3_rect) = (rects[0].1, rects[1].1, rects[2].1);
        assert!(close(w1_rect.width, 0.25));
        assert!(close(w2_rect.x, 0.25));
        assert!(close(w2_rect.width, 0.75));
        assert!(close(w2_rect.height, 0.6));
        assert!(close(w3_rect.y, 0.6));
        assert!(close(w3_rect.height, 0.4));

        let area: f32 = rects.iter().map(|(_, r)| r.width * r.height).sum();
        assert!(close(area, 1.0));
    }

    #[test]
    fn hit_test_finds_pane_under_point() {
        let mut tree = LayoutTree::new();
        let w1 = tree.open_first(SimplePane::new(1, "w1")).unwrap();
        tree.split_leaf_even(w1, Orientation::Vertical, SimplePane::new(2, "w2"))
            .unwrap();

        assert_eq!(tree.pane_at(0.5, 0.1), Some(PaneId(1)));
        assert_eq!(tree.pane_at(0.5, 0.9), Some(PaneId(2)));
        assert_eq!(tree.pane_at(0.5, 0.5), Some(PaneId(1)));
        assert_eq!(tree.pane_at(1.5, 0.5), None);
    }
}

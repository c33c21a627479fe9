// ABOUTME: Wiring between hotkey actions and the layout tree.
// ABOUTME: Creates, opens and closes panes and keeps their focus visuals in step.

use serde::Serialize;
use tilewm_core::HotkeyAction;
use tilewm_layout::{LayoutError, LayoutTree, Orientation, Pane, PaneId, Rect, SimplePane};

/// Pane state as printed after every handled input
#[derive(Debug, Serialize)]
pub struct PaneSnapshot {
    pub id: PaneId,
    pub title: String,
    pub rect: Rect,
}

#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub focused: Option<PaneId>,
    pub panes: Vec<PaneSnapshot>,
}

pub struct Workspace {
    layout: LayoutTree<SimplePane>,
    next_id: u64,
    fraction: f32,
}

impl Workspace {
    pub fn new(fraction: f32) -> Self {
        Self {
            layout: LayoutTree::new(),
            next_id: 1,
            fraction,
        }
    }

    /// w1 | (w2 / (w3 | w4)), with focus on w1
    pub fn with_demo_layout(fraction: f32) -> Result<Self, LayoutError> {
        let mut workspace = Self::new(fraction);
        let [p1, p2, p3, p4] = [1, 2, 3, 4].map(open_pane);
        workspace.next_id = 5;

        let layout = &mut workspace.layout;
        let w1 = layout.open_first(p1)?;
        let w2 = layout.split_leaf(w1, Orientation::Horizontal, p2, fraction)?;
        let w3 = layout.split_leaf(w2, Orientation::Vertical, p3, fraction)?;
        layout.split_leaf(w3, Orientation::Horizontal, p4, fraction)?;
        layout.focus_leaf(w1)?;
        Ok(workspace)
    }

    pub fn layout(&self) -> &LayoutTree<SimplePane> {
        &self.layout
    }

    pub fn apply(&mut self, action: HotkeyAction) -> Result<(), LayoutError> {
        match action {
            HotkeyAction::SplitHorizontal => self.split(Orientation::Horizontal),
            HotkeyAction::SplitVertical => self.split(Orientation::Vertical),
            HotkeyAction::Close => self.close_focused(),
            HotkeyAction::FocusNext => {
                self.layout.focus_next();
                Ok(())
            }
            HotkeyAction::FocusPrev => {
                self.layout.focus_prev();
                Ok(())
            }
        }
    }

    /// Focus whatever pane is under a normalized point
    pub fn click(&mut self, x: f32, y: f32) {
        match self.layout.pane_at(x, y) {
            Some(id) if Some(id) != self.layout.focused_pane().map(Pane::id) => {
                self.layout.focus(id);
                tracing::info!("Focus changed to pane {}", id);
            }
            Some(_) => {}
            None => tracing::debug!("No pane at ({}, {})", x, y),
        }
    }

    fn split(&mut self, orientation: Orientation) -> Result<(), LayoutError> {
        let id = self.next_id;
        if self.layout.is_empty() {
            let leaf = self.layout.open_first(open_pane(id))?;
            self.next_id += 1;
            return self.layout.focus_leaf(leaf);
        }

        let Some(previous) = self.layout.focused() else {
            tracing::warn!("Nothing focused, ignoring split");
            return Ok(());
        };

        // Ids are only consumed by panes that made it into the tree
        let Some(leaf) = self
            .layout
            .split_focused(orientation, open_pane(id), self.fraction)?
        else {
            return Ok(());
        };
        self.next_id += 1;

        if let Some(old) = self.layout.pane_mut(previous) {
            old.blur();
        }
        if let Some(new) = self.layout.pane_mut(leaf) {
            new.focus();
        }
        tracing::info!("Added pane {}, total panes: {}", id, self.layout.len());
        Ok(())
    }

    fn close_focused(&mut self) -> Result<(), LayoutError> {
        let Some(mut pane) = self.layout.remove_focused()? else {
            return Ok(());
        };
        pane.close();
        tracing::info!(
            "Closed pane {}, remaining panes: {}",
            pane.id(),
            self.layout.len()
        );

        if let Some(sibling) = self.layout.focused() {
            self.layout.focus_leaf(sibling)?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut titles = Vec::with_capacity(self.layout.len());
        self.layout
            .traverse(|_, pane| titles.push(pane.title().to_string()));

        let panes = self
            .layout
            .pane_rects()
            .into_iter()
            .zip(titles)
            .map(|((id, rect), title)| PaneSnapshot { id, title, rect })
            .collect();

        Snapshot {
            focused: self.layout.focused_pane().map(Pane::id),
            panes,
        }
    }
}

fn open_pane(id: u64) -> SimplePane {
    let mut pane = SimplePane::new(id, format!("w{id}"));
    pane.open();
    pane
}

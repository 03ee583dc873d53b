//! The dock: a toolbar of widget launchers that floats above the workspace.
//!
//! Unlike widget windows, the dock's position is never forgotten. It is saved
//! under its own storage key and survives every widget being closed.

use serde::{Deserialize, Serialize};

use crate::layout::{Position, Rect, Size, clamp_position};
use crate::window::{DragSession, WidgetId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockState {
    pub position: Position,
    pub collapsed: bool,
}

/// Dimensions of the dock's parts, in the same units as the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockMetrics {
    pub handle_width: i32,
    pub item_width: i32,
    pub toggle_width: i32,
    pub height: i32,
}

impl Default for DockMetrics {
    fn default() -> Self {
        Self {
            handle_width: 24,
            item_width: 72,
            toggle_width: 24,
            height: 48,
        }
    }
}

impl DockMetrics {
    pub fn terminal() -> Self {
        Self {
            handle_width: 3,
            item_width: 10,
            toggle_width: 3,
            height: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockHit {
    Handle,
    Item(usize),
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockItem {
    pub widget: WidgetId,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct Dock {
    items: Vec<DockItem>,
    metrics: DockMetrics,
    drag: Option<DragSession>,
}

impl Dock {
    pub fn new(items: Vec<DockItem>, metrics: DockMetrics) -> Self {
        Self {
            items,
            metrics,
            drag: None,
        }
    }

    pub fn items(&self) -> &[DockItem] {
        &self.items
    }

    pub fn metrics(&self) -> DockMetrics {
        self.metrics
    }

    pub fn size(&self, collapsed: bool) -> Size {
        let m = self.metrics;
        let items = if collapsed {
            0
        } else {
            m.item_width.saturating_mul(self.items.len() as i32)
        };
        Size::new(m.handle_width + items + m.toggle_width, m.height)
    }

    /// Bottom-centre placement used until the user moves the dock.
    pub fn default_state(&self, viewport: Size, margin: i32) -> DockState {
        let size = self.size(false);
        let position = Position::new(
            (viewport.width - size.width) / 2,
            viewport.height - size.height - margin,
        );
        DockState {
            position: clamp_position(position, size, viewport, margin),
            collapsed: false,
        }
    }

    pub fn rect(&self, state: DockState) -> Rect {
        let position = self
            .drag
            .as_ref()
            .map(DragSession::live_position)
            .unwrap_or(state.position);
        Rect::from_parts(position, self.size(state.collapsed))
    }

    pub fn item_rect(&self, state: DockState, index: usize) -> Option<Rect> {
        if state.collapsed || index >= self.items.len() {
            return None;
        }
        let rect = self.rect(state);
        let m = self.metrics;
        Some(Rect::new(
            rect.x + m.handle_width + m.item_width * index as i32,
            rect.y,
            m.item_width,
            m.height,
        ))
    }

    pub fn hit_test(&self, state: DockState, x: i32, y: i32) -> Option<DockHit> {
        let rect = self.rect(state);
        if !rect.contains(x, y) {
            return None;
        }
        let local = x - rect.x;
        let m = self.metrics;
        if local < m.handle_width {
            return Some(DockHit::Handle);
        }
        if local >= rect.width - m.toggle_width {
            return Some(DockHit::Toggle);
        }
        let index = ((local - m.handle_width) / m.item_width.max(1)) as usize;
        (index < self.items.len()).then_some(DockHit::Item(index))
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin_drag(&mut self, state: DockState, pointer: Position) {
        self.drag = Some(DragSession::begin(self.rect(state), pointer));
    }

    pub fn drag_to(&mut self, pointer: Position, viewport: Size, margin: i32) -> Option<Position> {
        let drag = self.drag.as_mut()?;
        let size = drag.start_rect().size();
        Some(drag.track(pointer, size, viewport, margin))
    }

    /// End the gesture and return the state to commit.
    pub fn end_drag(
        &mut self,
        state: DockState,
        pointer: Position,
        viewport: Size,
        margin: i32,
    ) -> Option<DockState> {
        let drag = self.drag.take()?;
        let size = drag.start_rect().size();
        Some(DockState {
            position: drag.finish(pointer, size, viewport, margin),
            ..state
        })
    }

    /// Clamp a state into a (possibly resized) viewport.
    pub fn clamp_state(&self, state: DockState, viewport: Size, margin: i32) -> DockState {
        DockState {
            position: clamp_position(state.position, self.size(state.collapsed), viewport, margin),
            ..state
        }
    }
}

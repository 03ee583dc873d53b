//! The interactive shell a widget is rendered inside.
//!
//! A surface owns no layout of its own. It reads its committed position from
//! the [`WindowStore`], keeps a transient copy while a header drag is in
//! progress, and writes the final position back once when the gesture ends.

use crate::layout::{Position, Rect};
use crate::store::WindowStore;

use super::chrome::{ChromeLayout, PointerTarget};
use super::drag::DragSession;
use super::overlap::{LayoutProbe, resolve_drag_overlaps};
use super::WidgetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// The host aborted the gesture; handled like a release.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Position,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            position: Position::new(x, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceAction {
    None,
    Focused,
    DragStarted,
    DragMoved(Position),
    DragEnded {
        position: Position,
        displaced: Vec<(WidgetId, Position)>,
    },
    CloseRequested,
    MinimizeToggled(bool),
}

#[derive(Debug, Clone)]
pub struct WindowSurface {
    id: WidgetId,
    state: SurfaceState,
}

impl WindowSurface {
    pub fn new(id: WidgetId) -> Self {
        Self {
            id,
            state: SurfaceState::Idle,
        }
    }

    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SurfaceState::Dragging(_))
    }

    /// Text selection is disabled for the whole document while dragging.
    pub fn suppresses_selection(&self) -> bool {
        self.is_dragging()
    }

    /// Where the window is drawn right now: the live drag position during a
    /// gesture, the committed position otherwise.
    pub fn display_position(&self, store: &WindowStore) -> Option<Position> {
        match self.state {
            SurfaceState::Dragging(drag) => Some(drag.live_position()),
            SurfaceState::Idle => store.position(&self.id),
        }
    }

    /// On-screen frame; a collapsed window keeps only its header.
    pub fn rect(&self, store: &WindowStore) -> Option<Rect> {
        let position = self.display_position(store)?;
        let mut size = store.size(&self.id)?;
        if store.is_collapsed(&self.id) {
            size.height = size.height.min(store.config().header_height);
        }
        Some(Rect::from_parts(position, size))
    }

    pub fn chrome(&self, store: &WindowStore) -> Option<ChromeLayout> {
        let rect = self.rect(store)?;
        Some(ChromeLayout::new(rect, store.config().header_height))
    }

    pub fn hit_test(&self, store: &WindowStore, position: Position) -> PointerTarget {
        self.chrome(store)
            .map(|chrome| chrome.hit_test(position.x, position.y))
            .unwrap_or(PointerTarget::Outside)
    }

    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        store: &mut WindowStore,
        probe: &dyn LayoutProbe,
    ) -> SurfaceAction {
        if !store.is_tracked(&self.id) {
            self.state = SurfaceState::Idle;
            return SurfaceAction::None;
        }
        match (self.state, event.kind) {
            (SurfaceState::Idle, PointerKind::Down) => self.pointer_down(event.position, store),
            (SurfaceState::Dragging(mut drag), PointerKind::Move) => {
                let Some(size) = store.size(&self.id) else {
                    return SurfaceAction::None;
                };
                let live = drag.track(event.position, size, store.viewport(), store.config().margin);
                self.state = SurfaceState::Dragging(drag);
                tracing::trace!(widget = %self.id, x = live.x, y = live.y, "drag move");
                SurfaceAction::DragMoved(live)
            }
            (SurfaceState::Dragging(drag), PointerKind::Up | PointerKind::Cancel) => {
                self.state = SurfaceState::Idle;
                self.end_drag(drag, event.position, store, probe)
            }
            _ => SurfaceAction::None,
        }
    }

    fn pointer_down(&mut self, pointer: Position, store: &mut WindowStore) -> SurfaceAction {
        match self.hit_test(store, pointer) {
            PointerTarget::Outside => SurfaceAction::None,
            PointerTarget::Close => SurfaceAction::CloseRequested,
            PointerTarget::Minimize => {
                let collapsed = !store.is_collapsed(&self.id);
                store.set_collapsed(&self.id, collapsed);
                store.bring_to_front(&self.id);
                tracing::debug!(widget = %self.id, collapsed, "toggled minimize");
                SurfaceAction::MinimizeToggled(collapsed)
            }
            PointerTarget::Content => {
                store.bring_to_front(&self.id);
                SurfaceAction::Focused
            }
            PointerTarget::DragHandle => {
                let Some(rect) = store.rect(&self.id) else {
                    return SurfaceAction::None;
                };
                store.bring_to_front(&self.id);
                self.state = SurfaceState::Dragging(DragSession::begin(rect, pointer));
                tracing::debug!(widget = %self.id, x = rect.x, y = rect.y, "drag started");
                SurfaceAction::DragStarted
            }
        }
    }

    fn end_drag(
        &mut self,
        drag: DragSession,
        pointer: Position,
        store: &mut WindowStore,
        probe: &dyn LayoutProbe,
    ) -> SurfaceAction {
        let config = *store.config();
        let size = store.size(&self.id).unwrap_or(drag.start_rect().size());
        let position = drag.finish(pointer, size, store.viewport(), config.margin);
        store.update_position(&self.id, position.x, position.y);
        tracing::debug!(widget = %self.id, x = position.x, y = position.y, "drag committed");

        let measured = probe
            .measured_rect(&self.id)
            .map(|rect| rect.size())
            .filter(|size| size.is_positive())
            .unwrap_or(size);
        let dragged_rect = Rect::from_parts(position, measured);
        let displaced = resolve_drag_overlaps(store, &self.id, dragged_rect, probe);
        SurfaceAction::DragEnded {
            position,
            displaced,
        }
    }
}

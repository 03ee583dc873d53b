//! The application-facing window manager.
//!
//! A [`Workspace`] bundles the window store, one surface per open widget and
//! the dock, and routes document-level pointer events between them. Feature
//! code only ever needs [`Workspace::open_widget`],
//! [`Workspace::close_widget`], [`Workspace::get_position`] and
//! [`Workspace::on_position_change`].

use std::collections::BTreeMap;
use std::time::Instant;

use crate::config::LayoutConfig;
use crate::dock::{Dock, DockHit, DockMetrics, DockState};
use crate::layout::{Position, Rect, RegionMap, Size};
use crate::store::{LayoutStorage, ListenerId, WindowStore};
use crate::window::{
    ChromeLayout, PointerEvent, PointerKind, ResizeDebouncer, SurfaceAction, WidgetId,
    WindowSurface,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockEvent {
    DragStarted,
    Moved(Position),
    Committed(DockState),
    Collapsed(bool),
    Launched(WidgetId),
    Dismissed(WidgetId),
}

/// What a pointer event did, for hosts that want to react (redraw, cursor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerOutcome {
    Ignored,
    Widget { id: WidgetId, action: SurfaceAction },
    Closed(WidgetId),
    Dock(DockEvent),
}

/// One window to draw, listed back-to-front by [`Workspace::windows`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowView {
    pub id: WidgetId,
    pub chrome: ChromeLayout,
    pub z_index: u32,
    pub focused: bool,
    pub collapsed: bool,
    pub dragging: bool,
}

pub struct Workspace {
    store: WindowStore,
    surfaces: BTreeMap<WidgetId, WindowSurface>,
    preferred: BTreeMap<WidgetId, Size>,
    dock: Dock,
    regions: RegionMap<WidgetId>,
    debouncer: ResizeDebouncer,
}

impl Workspace {
    pub fn new(store: WindowStore, dock: Dock) -> Self {
        let debouncer = ResizeDebouncer::new(store.config().resize_debounce());
        Self {
            store,
            surfaces: BTreeMap::new(),
            preferred: BTreeMap::new(),
            dock,
            regions: RegionMap::default(),
            debouncer,
        }
    }

    pub fn with_storage(
        config: LayoutConfig,
        viewport: Size,
        storage: impl LayoutStorage + 'static,
        dock: Dock,
    ) -> Self {
        Self::new(WindowStore::new(config, viewport, storage), dock)
    }

    /// A workspace with in-memory storage and an empty dock.
    pub fn in_memory(config: LayoutConfig, viewport: Size) -> Self {
        Self::new(
            WindowStore::in_memory(config, viewport),
            Dock::new(Vec::new(), DockMetrics::default()),
        )
    }

    pub fn store(&self) -> &WindowStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut WindowStore {
        &mut self.store
    }

    pub fn dock(&self) -> &Dock {
        &self.dock
    }

    /// Size used when `id` opens without an explicit one.
    pub fn set_preferred_size(&mut self, id: WidgetId, size: Size) {
        self.preferred.insert(id, size);
    }

    pub fn is_open(&self, id: &WidgetId) -> bool {
        self.surfaces.contains_key(id)
    }

    pub fn open_widgets(&self) -> Vec<WidgetId> {
        self.store
            .stack()
            .iter()
            .filter(|id| self.surfaces.contains_key(*id))
            .cloned()
            .collect()
    }

    /// Open `id` at its preferred size. Opening an open widget only raises it.
    pub fn open_widget(&mut self, id: impl Into<WidgetId>) -> Position {
        let id = id.into();
        if let Some(position) = self.raise_open(&id) {
            return position;
        }
        let size = self.preferred.get(&id).copied().unwrap_or_default();
        self.open_widget_sized(id, size)
    }

    /// Open `id` with a measured size. Opening an open widget raises it and
    /// takes a positive `size` as its new measurement.
    pub fn open_widget_sized(&mut self, id: impl Into<WidgetId>, size: Size) -> Position {
        let id = id.into();
        if self.surfaces.contains_key(&id) {
            self.store.set_measured_size(&id, size);
        }
        if let Some(position) = self.raise_open(&id) {
            return position;
        }
        let position = self.store.initialize_widget(id.clone(), size);
        tracing::debug!(widget = %id, x = position.x, y = position.y, "opened widget");
        self.surfaces
            .insert(id.clone(), WindowSurface::new(id));
        position
    }

    fn raise_open(&mut self, id: &WidgetId) -> Option<Position> {
        if !self.surfaces.contains_key(id) {
            return None;
        }
        self.store.bring_to_front(id);
        self.store.position(id)
    }

    /// Close `id` and forget its layout. Returns whether it was open.
    pub fn close_widget(&mut self, id: &WidgetId) -> bool {
        let was_open = self.surfaces.remove(id).is_some();
        self.store.remove_from_stack(id);
        self.regions.remove(id);
        if was_open {
            tracing::debug!(widget = %id, "closed widget");
        }
        was_open
    }

    /// Open `id` if closed, close it if open; returns whether it is now open.
    pub fn toggle_widget(&mut self, id: &WidgetId) -> bool {
        if self.is_open(id) {
            self.close_widget(id);
            false
        } else {
            self.open_widget(id.clone());
            true
        }
    }

    /// Reopen the widgets that were open when the layout was last saved.
    pub fn restore_session(&mut self) -> Vec<WidgetId> {
        let pending = self.store.pending_restores();
        for id in &pending {
            self.open_widget(id.clone());
        }
        if !pending.is_empty() {
            tracing::debug!(restored = pending.len(), "restored previous session");
        }
        pending
    }

    /// Committed position; live drag positions are not reported.
    pub fn get_position(&self, id: &WidgetId) -> Option<Position> {
        self.store.position(id)
    }

    pub fn on_position_change<F>(&mut self, id: impl Into<WidgetId>, callback: F) -> ListenerId
    where
        F: FnMut(Position) + 'static,
    {
        self.store.on_position_change(id.into(), callback)
    }

    pub fn remove_listener(&mut self, listener: ListenerId) -> bool {
        self.store.remove_listener(listener)
    }

    pub fn set_measured_size(&mut self, id: &WidgetId, size: Size) {
        self.store.set_measured_size(id, size);
    }

    /// Remember where `id` was last drawn, for overlap checks.
    pub fn record_region(&mut self, id: WidgetId, rect: Rect) {
        self.regions.set(id, rect);
    }

    pub fn focused(&self) -> Option<&WidgetId> {
        self.store.top()
    }

    pub fn dragging(&self) -> Option<&WidgetId> {
        self.surfaces
            .values()
            .find(|surface| surface.is_dragging())
            .map(WindowSurface::id)
    }

    pub fn suppresses_selection(&self) -> bool {
        self.dock.is_dragging() || self.dragging().is_some()
    }

    /// Open windows back-to-front.
    pub fn windows(&self) -> Vec<WindowView> {
        let header_height = self.store.config().header_height;
        let focused = self.focused();
        self.store
            .stack()
            .iter()
            .filter_map(|id| {
                let surface = self.surfaces.get(id)?;
                let rect = surface.rect(&self.store)?;
                Some(WindowView {
                    id: id.clone(),
                    chrome: ChromeLayout::new(rect, header_height),
                    z_index: self.store.z_index(id)?,
                    focused: focused == Some(id),
                    collapsed: self.store.is_collapsed(id),
                    dragging: surface.is_dragging(),
                })
            })
            .collect()
    }

    pub fn dock_state(&self) -> DockState {
        self.store.dock().unwrap_or_else(|| {
            self.dock
                .default_state(self.store.viewport(), self.store.config().margin)
        })
    }

    pub fn dock_rect(&self) -> Rect {
        self.dock.rect(self.dock_state())
    }

    pub fn set_dock_collapsed(&mut self, collapsed: bool) {
        let state = self.dock_state();
        let next = self.dock.clamp_state(
            DockState { collapsed, ..state },
            self.store.viewport(),
            self.store.config().margin,
        );
        self.store.set_dock(next);
    }

    /// Route one document-level pointer event.
    ///
    /// An active drag receives every move and release wherever the pointer
    /// is, so a fast gesture that leaves its window is still tracked.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerOutcome {
        if self.dock.is_dragging() {
            return self.dock_gesture(event);
        }
        if let Some(id) = self.dragging().cloned() {
            return self.route_to(&id, event);
        }
        if event.kind != PointerKind::Down {
            return PointerOutcome::Ignored;
        }

        let state = self.dock_state();
        if let Some(hit) = self.dock.hit_test(state, event.position.x, event.position.y) {
            return self.dock_press(state, hit, event.position);
        }
        match self.widget_at(event.position) {
            Some(id) => self.route_to(&id, event),
            None => PointerOutcome::Ignored,
        }
    }

    fn widget_at(&self, position: Position) -> Option<WidgetId> {
        self.store.stack().iter().rev().find_map(|id| {
            let rect = self.surfaces.get(id)?.rect(&self.store)?;
            rect.contains(position.x, position.y).then(|| id.clone())
        })
    }

    fn route_to(&mut self, id: &WidgetId, event: PointerEvent) -> PointerOutcome {
        let Some(surface) = self.surfaces.get_mut(id) else {
            return PointerOutcome::Ignored;
        };
        let action = surface.handle_pointer(event, &mut self.store, &self.regions);
        match action {
            SurfaceAction::None => PointerOutcome::Ignored,
            SurfaceAction::CloseRequested => {
                self.close_widget(id);
                PointerOutcome::Closed(id.clone())
            }
            action => PointerOutcome::Widget {
                id: id.clone(),
                action,
            },
        }
    }

    fn dock_press(&mut self, state: DockState, hit: DockHit, pointer: Position) -> PointerOutcome {
        match hit {
            DockHit::Handle => {
                self.dock.begin_drag(state, pointer);
                PointerOutcome::Dock(DockEvent::DragStarted)
            }
            DockHit::Toggle => {
                let collapsed = !state.collapsed;
                self.set_dock_collapsed(collapsed);
                PointerOutcome::Dock(DockEvent::Collapsed(collapsed))
            }
            DockHit::Item(index) => {
                let Some(widget) = self.dock.items().get(index).map(|item| item.widget.clone())
                else {
                    return PointerOutcome::Ignored;
                };
                if self.toggle_widget(&widget) {
                    PointerOutcome::Dock(DockEvent::Launched(widget))
                } else {
                    PointerOutcome::Dock(DockEvent::Dismissed(widget))
                }
            }
        }
    }

    fn dock_gesture(&mut self, event: PointerEvent) -> PointerOutcome {
        let viewport = self.store.viewport();
        let margin = self.store.config().margin;
        match event.kind {
            PointerKind::Down => PointerOutcome::Ignored,
            PointerKind::Move => match self.dock.drag_to(event.position, viewport, margin) {
                Some(position) => PointerOutcome::Dock(DockEvent::Moved(position)),
                None => PointerOutcome::Ignored,
            },
            PointerKind::Up | PointerKind::Cancel => {
                let state = self.dock_state();
                match self.dock.end_drag(state, event.position, viewport, margin) {
                    Some(next) => {
                        self.store.set_dock(next);
                        tracing::debug!(x = next.position.x, y = next.position.y, "dock moved");
                        PointerOutcome::Dock(DockEvent::Committed(next))
                    }
                    None => PointerOutcome::Ignored,
                }
            }
        }
    }

    /// Note a viewport resize; boundaries are enforced once resizing settles.
    pub fn handle_resize(&mut self, viewport: Size, now: Instant) {
        self.debouncer.note(viewport, now);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Run any due boundary pass, returning the widgets it moved.
    pub fn tick(&mut self, now: Instant) -> Vec<WidgetId> {
        match self.debouncer.take_due(now) {
            Some(viewport) => self.apply_viewport(viewport),
            None => Vec::new(),
        }
    }

    /// Re-clamp everything except an in-flight drag into `viewport` now.
    pub fn apply_viewport(&mut self, viewport: Size) -> Vec<WidgetId> {
        let skip = self.dragging().cloned();
        let moved = self.store.enforce_boundaries_except(viewport, skip.as_ref());
        if !self.dock.is_dragging()
            && let Some(state) = self.store.dock()
        {
            let clamped = self
                .dock
                .clamp_state(state, viewport, self.store.config().margin);
            self.store.set_dock(clamped);
        }
        moved
    }
}

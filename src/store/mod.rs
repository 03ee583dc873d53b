//! The window store: the one authority over where every open widget sits and
//! how widgets stack.
//!
//! Positions and the stacking order live side by side and every mutating
//! operation updates both, so a widget is either present in both or absent
//! from both. Each committed change is written through to a
//! [`LayoutStorage`]; a failed write is logged and disables persistence for
//! the rest of the session instead of surfacing to callers.
//!
//! The store is an explicit value owned by the [`Workspace`](crate::Workspace)
//! and lent to surfaces as `&mut WindowStore`; there is no global instance.

pub mod listeners;
pub mod persistence;

use std::collections::{BTreeMap, BTreeSet};

pub use listeners::{ListenerId, PositionListeners};
pub use persistence::{
    DOCK_KEY, JsonFileStorage, LayoutStorage, MemoryStorage, PersistedLayout, WIDGETS_KEY,
    WidgetLayout,
};

use crate::config::LayoutConfig;
use crate::dock::DockState;
use crate::layout::{
    PlacementRequest, Position, Rect, Size, clamp_position, rects_overlap, resolve_placement,
};
use crate::window::WidgetId;

#[derive(Debug, Clone, Copy)]
struct WidgetEntry {
    position: Position,
    size: Size,
}

pub struct WindowStore {
    config: LayoutConfig,
    viewport: Size,
    entries: BTreeMap<WidgetId, WidgetEntry>,
    // back-to-front; the last id is drawn on top
    stack: Vec<WidgetId>,
    collapsed: BTreeSet<WidgetId>,
    dock: Option<DockState>,
    restored: WidgetLayout,
    storage: Box<dyn LayoutStorage>,
    storage_healthy: bool,
    listeners: PositionListeners,
}

impl std::fmt::Debug for WindowStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowStore")
            .field("viewport", &self.viewport)
            .field("entries", &self.entries)
            .field("stack", &self.stack)
            .field("collapsed", &self.collapsed)
            .field("dock", &self.dock)
            .field("storage_healthy", &self.storage_healthy)
            .finish_non_exhaustive()
    }
}

impl WindowStore {
    /// Build a store and read any prior layout from `storage`, once.
    ///
    /// A load failure is treated as "no prior layout".
    pub fn new(
        config: LayoutConfig,
        viewport: Size,
        storage: impl LayoutStorage + 'static,
    ) -> Self {
        let mut storage: Box<dyn LayoutStorage> = Box::new(storage);
        let restored = match storage.load_layout() {
            Ok(layout) => layout,
            Err(err) => {
                tracing::warn!(error = %err, "could not read saved layout; starting fresh");
                PersistedLayout::default()
            }
        };
        tracing::debug!(
            widgets = restored.widgets.positions.len(),
            dock = restored.dock.is_some(),
            "window store initialized"
        );
        Self {
            config,
            viewport,
            entries: BTreeMap::new(),
            stack: Vec::new(),
            collapsed: BTreeSet::new(),
            dock: restored.dock,
            restored: restored.widgets,
            storage,
            storage_healthy: true,
            listeners: PositionListeners::default(),
        }
    }

    pub fn in_memory(config: LayoutConfig, viewport: Size) -> Self {
        Self::new(config, viewport, MemoryStorage::new())
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn persistence_active(&self) -> bool {
        self.storage_healthy
    }

    /// Widgets that were open when the layout was last saved and have not
    /// mounted yet, back-to-front.
    pub fn pending_restores(&self) -> Vec<WidgetId> {
        let mut ids: Vec<WidgetId> = self
            .restored
            .stack
            .iter()
            .filter(|id| self.restored.positions.contains_key(*id))
            .cloned()
            .collect();
        for id in self.restored.positions.keys() {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids.retain(|id| !self.entries.contains_key(id));
        ids
    }

    pub fn is_tracked(&self, id: &WidgetId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self, id: &WidgetId) -> Option<Position> {
        self.entries.get(id).map(|entry| entry.position)
    }

    pub fn size(&self, id: &WidgetId) -> Option<Size> {
        self.entries.get(id).map(|entry| entry.size)
    }

    pub fn rect(&self, id: &WidgetId) -> Option<Rect> {
        self.entries
            .get(id)
            .map(|entry| Rect::from_parts(entry.position, entry.size))
    }

    /// Back-to-front stacking order.
    pub fn stack(&self) -> &[WidgetId] {
        &self.stack
    }

    pub fn top(&self) -> Option<&WidgetId> {
        self.stack.last()
    }

    /// Rectangles of every tracked widget not listed in `exclude`.
    pub fn occupied_rects(&self, exclude: &[&WidgetId]) -> Vec<Rect> {
        self.stack
            .iter()
            .filter(|id| !exclude.contains(id))
            .filter_map(|id| self.rect(id))
            .collect()
    }

    /// Run the placement resolver against the current viewport.
    pub fn place(&self, size: Size, occupied: &[Rect]) -> Position {
        resolve_placement(
            &PlacementRequest {
                viewport: self.viewport,
                occupied,
                size,
            },
            &self.config,
        )
    }

    fn effective_size(&self, size: Size) -> Size {
        if size.is_positive() {
            size
        } else {
            self.config.nominal_size
        }
    }

    /// Start tracking `id` and give it a position.
    ///
    /// A widget restored from the saved layout gets its saved position back,
    /// re-clamped to the current viewport, unless that spot is now taken by
    /// an open widget. Anything else is placed by the resolver around the
    /// open widgets and the saved spots of widgets still waiting to mount.
    /// Calling this for a tracked widget only refreshes its size, and only
    /// with a positive one.
    pub fn initialize_widget(&mut self, id: WidgetId, size: Size) -> Position {
        if let Some(entry) = self.entries.get_mut(&id) {
            if size.is_positive() {
                entry.size = size;
            }
            return entry.position;
        }

        let size = self.effective_size(size);
        let mut occupied = self.occupied_rects(&[]);
        let position = match self.restored.positions.remove(&id) {
            Some(saved) => {
                let clamped = clamp_position(saved, size, self.viewport, self.config.margin);
                let rect = Rect::from_parts(clamped, size);
                if occupied.iter().any(|other| rects_overlap(rect, *other)) {
                    occupied.extend(self.reserved_rects());
                    let position = self.place(size, &occupied);
                    tracing::debug!(
                        widget = %id,
                        x = position.x,
                        y = position.y,
                        "saved spot is taken; placed widget"
                    );
                    position
                } else {
                    tracing::debug!(widget = %id, x = clamped.x, y = clamped.y, "restored widget");
                    clamped
                }
            }
            None => {
                occupied.extend(self.reserved_rects());
                let position = self.place(size, &occupied);
                tracing::debug!(widget = %id, x = position.x, y = position.y, "placed widget");
                position
            }
        };
        if self.restored.collapsed.remove(&id) {
            self.collapsed.insert(id.clone());
        }
        self.entries
            .insert(id.clone(), WidgetEntry { position, size });
        self.insert_into_stack(id.clone());
        self.persist();
        self.listeners.notify(&id, position);
        position
    }

    /// Saved spots of widgets that have not mounted yet, at the nominal size
    /// since they have not been measured this session.
    fn reserved_rects(&self) -> Vec<Rect> {
        let size = self.config.nominal_size;
        self.restored
            .positions
            .iter()
            .filter(|(id, _)| !self.entries.contains_key(*id))
            .map(|(_, saved)| {
                let position = clamp_position(*saved, size, self.viewport, self.config.margin);
                Rect::from_parts(position, size)
            })
            .collect()
    }

    fn insert_into_stack(&mut self, id: WidgetId) {
        let rank = |candidate: &WidgetId| self.restored.stack.iter().position(|s| s == candidate);
        let at = match rank(&id) {
            Some(own) => self
                .stack
                .iter()
                .position(|other| rank(other).is_some_and(|r| r > own))
                .unwrap_or(self.stack.len()),
            None => self.stack.len(),
        };
        self.stack.insert(at, id);
    }

    /// Overwrite the stored position of `id`.
    ///
    /// An untracked id starts being tracked with the nominal size, on top.
    /// Writing the position a widget already has is a no-op.
    pub fn update_position(&mut self, id: &WidgetId, x: i32, y: i32) {
        let position = Position::new(x, y);
        match self.entries.get_mut(id) {
            Some(entry) if entry.position == position => return,
            Some(entry) => entry.position = position,
            None => {
                let size = self.config.nominal_size;
                self.restored.positions.remove(id);
                if self.restored.collapsed.remove(id) {
                    self.collapsed.insert(id.clone());
                }
                self.entries
                    .insert(id.clone(), WidgetEntry { position, size });
                self.stack.push(id.clone());
            }
        }
        self.persist();
        self.listeners.notify(id, position);
    }

    pub fn set_measured_size(&mut self, id: &WidgetId, size: Size) {
        if !size.is_positive() {
            return;
        }
        if let Some(entry) = self.entries.get_mut(id) {
            entry.size = size;
        }
    }

    /// Raise `id` above every other widget.
    pub fn bring_to_front(&mut self, id: &WidgetId) {
        if !self.entries.contains_key(id) {
            let nominal = self.config.nominal_size;
            self.initialize_widget(id.clone(), nominal);
        }
        if self.stack.last() == Some(id) {
            return;
        }
        if let Some(pos) = self.stack.iter().position(|other| other == id) {
            let item = self.stack.remove(pos);
            self.stack.push(item);
            self.persist();
        }
    }

    /// Stacking index of `id`; larger is closer to the viewer.
    pub fn z_index(&self, id: &WidgetId) -> Option<u32> {
        self.stack
            .iter()
            .position(|other| other == id)
            .map(|idx| self.config.z_index_base.saturating_add(idx as u32))
    }

    /// Forget `id` entirely so the next open places it afresh.
    pub fn remove_from_stack(&mut self, id: &WidgetId) {
        let had_entry = self.entries.remove(id).is_some();
        let before = self.stack.len();
        self.stack.retain(|other| other != id);
        self.collapsed.remove(id);
        self.restored.stack.retain(|other| other != id);
        self.restored.collapsed.remove(id);
        let had_saved = self.restored.positions.remove(id).is_some();
        if had_entry || had_saved || self.stack.len() != before {
            tracing::debug!(widget = %id, "forgot widget layout");
            self.persist();
        }
    }

    pub fn is_collapsed(&self, id: &WidgetId) -> bool {
        self.collapsed.contains(id)
    }

    pub fn set_collapsed(&mut self, id: &WidgetId, collapsed: bool) {
        if !self.entries.contains_key(id) {
            return;
        }
        let changed = if collapsed {
            self.collapsed.insert(id.clone())
        } else {
            self.collapsed.remove(id)
        };
        if changed {
            self.persist();
        }
    }

    pub fn dock(&self) -> Option<DockState> {
        self.dock
    }

    pub fn set_dock(&mut self, dock: DockState) {
        if self.dock == Some(dock) {
            return;
        }
        self.dock = Some(dock);
        self.persist();
    }

    /// Re-clamp every tracked widget into `viewport`.
    pub fn enforce_boundaries(&mut self, viewport: Size) -> Vec<WidgetId> {
        self.enforce_boundaries_except(viewport, None)
    }

    /// Re-clamp every tracked widget except `skip` into `viewport`, returning
    /// the widgets that moved. Widgets already fully inside stay put; the
    /// rest move by the smallest amount per axis.
    pub fn enforce_boundaries_except(
        &mut self,
        viewport: Size,
        skip: Option<&WidgetId>,
    ) -> Vec<WidgetId> {
        self.viewport = viewport;
        let margin = self.config.margin;
        let mut moved = Vec::new();
        for (id, entry) in self.entries.iter_mut() {
            if skip == Some(id) {
                continue;
            }
            let clamped = clamp_position(entry.position, entry.size, viewport, margin);
            if clamped != entry.position {
                entry.position = clamped;
                moved.push(id.clone());
            }
        }
        if moved.is_empty() {
            return moved;
        }
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            corrected = moved.len(),
            "enforced viewport boundaries"
        );
        self.persist();
        for id in &moved {
            if let Some(position) = self.position(id) {
                self.listeners.notify(id, position);
            }
        }
        moved
    }

    pub fn on_position_change<F>(&mut self, id: WidgetId, callback: F) -> ListenerId
    where
        F: FnMut(Position) + 'static,
    {
        self.listeners.subscribe(id, callback)
    }

    pub fn remove_listener(&mut self, listener: ListenerId) -> bool {
        self.listeners.unsubscribe(listener)
    }

    /// Layout to save: the open widgets, plus the saved entries of widgets
    /// that have not mounted this session and were never closed. Unmounted
    /// widgets stack behind the open ones.
    pub fn snapshot(&self) -> PersistedLayout {
        let pending = self.pending_restores();
        let mut positions: BTreeMap<WidgetId, Position> = pending
            .iter()
            .filter_map(|id| Some((id.clone(), *self.restored.positions.get(id)?)))
            .collect();
        positions.extend(
            self.entries
                .iter()
                .map(|(id, entry)| (id.clone(), entry.position)),
        );
        let mut collapsed = self.collapsed.clone();
        collapsed.extend(
            pending
                .iter()
                .filter(|id| self.restored.collapsed.contains(*id))
                .cloned(),
        );
        let mut stack = pending;
        stack.extend(self.stack.iter().cloned());
        PersistedLayout {
            widgets: WidgetLayout {
                positions,
                stack,
                collapsed,
            },
            dock: self.dock,
        }
    }

    fn persist(&mut self) {
        if !self.storage_healthy {
            return;
        }
        let layout = self.snapshot();
        if let Err(err) = self.storage.save_layout(&layout) {
            tracing::warn!(
                error = %err,
                "saving layout failed; keeping layout in memory for this session"
            );
            self.storage_healthy = false;
        }
    }
}

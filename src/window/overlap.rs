//! Overlap resolution after a drag commits.
//!
//! Only windows hit by the dragged window move, and each moves once. A
//! relocated window is not re-checked against third windows, so a placement
//! that exhausts its budget can leave a new overlap behind.

use std::collections::BTreeMap;

use crate::layout::{Position, Rect, RegionMap};
use crate::store::WindowStore;

use super::WidgetId;

/// Source of on-screen rectangles as last rendered.
///
/// Overlap checks prefer what was drawn over what was stored, since the two
/// drift while a frame is pending.
pub trait LayoutProbe {
    fn measured_rect(&self, id: &WidgetId) -> Option<Rect>;
}

impl LayoutProbe for RegionMap<WidgetId> {
    fn measured_rect(&self, id: &WidgetId) -> Option<Rect> {
        self.get(id)
    }
}

impl LayoutProbe for WindowStore {
    fn measured_rect(&self, id: &WidgetId) -> Option<Rect> {
        self.rect(id)
    }
}

/// Move every window overlapping `dragged_rect` to a free spot.
///
/// Returns the relocated windows with their committed positions, in stacking
/// order.
pub fn resolve_drag_overlaps(
    store: &mut WindowStore,
    dragged: &WidgetId,
    dragged_rect: Rect,
    probe: &dyn LayoutProbe,
) -> Vec<(WidgetId, Position)> {
    let others: Vec<WidgetId> = store
        .stack()
        .iter()
        .filter(|id| *id != dragged)
        .cloned()
        .collect();
    let mut current: BTreeMap<WidgetId, Rect> = others
        .iter()
        .filter_map(|id| {
            let rect = probe.measured_rect(id).or_else(|| store.rect(id))?;
            Some((id.clone(), rect))
        })
        .collect();

    let mut displaced = Vec::new();
    for id in &others {
        let Some(rect) = current.get(id).copied() else {
            continue;
        };
        if !rect.overlaps(&dragged_rect) {
            continue;
        }
        let mut occupied: Vec<Rect> = current
            .iter()
            .filter(|(other, _)| *other != id)
            .map(|(_, rect)| *rect)
            .collect();
        occupied.push(dragged_rect);
        let position = store.place(rect.size(), &occupied);
        tracing::debug!(
            widget = %id,
            by = %dragged,
            x = position.x,
            y = position.y,
            "displaced overlapped widget"
        );
        store.update_position(id, position.x, position.y);
        current.insert(id.clone(), Rect::from_parts(position, rect.size()));
        displaced.push((id.clone(), position));
    }
    displaced
}

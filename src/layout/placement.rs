//! Placement of newly opened or displaced widgets.
//!
//! The resolver is a pure function of its inputs: the anchor is tried first,
//! then candidates on square rings around it, nearest ring first. Inside a
//! ring, candidates closer in Manhattan distance come first and ties follow
//! a clockwise walk starting due east (screen y grows downward), so the
//! first ring is visited east, south, west, north and then the diagonals.

use super::{Position, Rect, Size, clamp_position, fits_viewport, rects_overlap};
use crate::config::LayoutConfig;

#[derive(Debug, Clone, Copy)]
pub struct PlacementRequest<'a> {
    pub viewport: Size,
    /// One rectangle per open widget, excluding the one being placed.
    pub occupied: &'a [Rect],
    pub size: Size,
}

/// Grid offsets (in steps) of every candidate on ring `ring`, in visiting
/// order. Ring `r` holds the `8 * r` cells at Chebyshev distance `r`.
pub fn ring_offsets(ring: i32) -> Vec<(i32, i32)> {
    if ring <= 0 {
        return vec![(0, 0)];
    }
    let mut offsets = Vec::with_capacity((ring * 8) as usize);
    for dy in 0..=ring {
        offsets.push((ring, dy));
    }
    for dx in (-ring..ring).rev() {
        offsets.push((dx, ring));
    }
    for dy in (-ring..ring).rev() {
        offsets.push((-ring, dy));
    }
    for dx in (-ring + 1)..=ring {
        offsets.push((dx, -ring));
    }
    for dy in (-ring + 1)..0 {
        offsets.push((ring, dy));
    }
    // stable: clockwise order survives among equal distances
    offsets.sort_by_key(|&(dx, dy)| dx.abs() + dy.abs());
    offsets
}

/// Find an in-bounds, non-overlapping origin for a widget of `request.size`.
///
/// Never fails. When the attempt budget runs out the last clamped candidate
/// is returned even if it overlaps, since a widget opening on top of another
/// beats a widget that does not open.
pub fn resolve_placement(request: &PlacementRequest<'_>, config: &LayoutConfig) -> Position {
    let PlacementRequest {
        viewport,
        occupied,
        size,
    } = *request;
    let margin = config.margin;
    let on_screen = |position: Position| {
        fits_viewport(Rect::from_parts(position, size), viewport, margin)
    };
    let free = |position: Position| {
        let rect = Rect::from_parts(position, size);
        !occupied.iter().any(|other| rects_overlap(rect, *other))
    };

    let anchor = clamp_position(config.anchor, size, viewport, margin);
    if on_screen(anchor) && free(anchor) {
        return anchor;
    }

    let step = config.search_step.max(1);
    let mut last = anchor;
    let mut attempts = 0usize;
    let mut ring = 1;
    loop {
        for (dx, dy) in ring_offsets(ring) {
            if attempts >= config.max_attempts {
                tracing::debug!(
                    attempts,
                    x = last.x,
                    y = last.y,
                    "placement budget exhausted; using last candidate"
                );
                return last;
            }
            attempts += 1;
            let raw = config
                .anchor
                .offset(dx.saturating_mul(step), dy.saturating_mul(step));
            let candidate = clamp_position(raw, size, viewport, margin);
            last = candidate;
            if !on_screen(candidate) {
                continue;
            }
            if free(candidate) {
                return candidate;
            }
        }
        ring += 1;
    }
}

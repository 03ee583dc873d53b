pub mod placement;

pub use placement::{PlacementRequest, resolve_placement, ring_offsets};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-left corner of a widget window, relative to the viewport origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_positive(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Axis-aligned rectangle. Never stored by the window store; built on demand
/// from a position plus a measured or nominal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Position, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        rects_overlap(*self, *other)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        rect_contains(*self, x, y)
    }
}

/// Strict overlap: rectangles that only share an edge do not overlap.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

pub fn rect_contains(rect: Rect, x: i32, y: i32) -> bool {
    if rect.width <= 0 || rect.height <= 0 {
        return false;
    }
    x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
}

/// Clamp one axis of a widget origin into `[margin, viewport - len - margin]`.
///
/// When the viewport is too small for the widget the lower bound wins, so the
/// header stays reachable and the far edge overflows instead.
pub fn clamp_axis(value: i32, len: i32, viewport_len: i32, margin: i32) -> i32 {
    let max = viewport_len
        .saturating_sub(len)
        .saturating_sub(margin);
    value.min(max).max(margin)
}

pub fn clamp_position(position: Position, size: Size, viewport: Size, margin: i32) -> Position {
    Position {
        x: clamp_axis(position.x, size.width, viewport.width, margin),
        y: clamp_axis(position.y, size.height, viewport.height, margin),
    }
}

/// True when the whole rectangle lies inside the viewport minus the margin.
pub fn fits_viewport(rect: Rect, viewport: Size, margin: i32) -> bool {
    rect.x >= margin
        && rect.y >= margin
        && rect.right() <= viewport.width.saturating_sub(margin)
        && rect.bottom() <= viewport.height.saturating_sub(margin)
}

/// Last known on-screen rectangle per window, recorded while drawing.
#[derive(Debug, Clone)]
pub struct RegionMap<T: Ord + Clone> {
    regions: BTreeMap<T, Rect>,
}

impl<T: Ord + Clone> Default for RegionMap<T> {
    fn default() -> Self {
        Self {
            regions: BTreeMap::new(),
        }
    }
}

impl<T: Ord + Clone> RegionMap<T> {
    pub fn ids(&self) -> Vec<T> {
        self.regions.keys().cloned().collect()
    }

    pub fn set(&mut self, id: T, rect: Rect) {
        self.regions.insert(id, rect);
    }

    pub fn get(&self, id: &T) -> Option<Rect> {
        self.regions.get(id).copied()
    }

    pub fn remove(&mut self, id: &T) {
        self.regions.remove(id);
    }

    /// Topmost region containing the point. `order` is back-to-front.
    pub fn hit_test(&self, x: i32, y: i32, order: &[T]) -> Option<T> {
        order.iter().rev().find_map(|id| {
            self.regions
                .get(id)
                .filter(|rect| rect.contains(x, y))
                .map(|_| id.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0, 0, 100, 100);
        let right = Rect::new(100, 0, 50, 50);
        let below = Rect::new(0, 100, 50, 50);
        assert!(!rects_overlap(a, right));
        assert!(!rects_overlap(a, below));
        assert!(rects_overlap(a, Rect::new(99, 99, 10, 10)));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = Rect::new(10, 10, 30, 30);
        let b = Rect::new(20, 0, 5, 100);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn clamp_pulls_overflowing_origin_back() {
        let viewport = Size::new(500, 400);
        let size = Size::new(300, 200);
        let clamped = clamp_position(Position::new(750, 550), size, viewport, 10);
        assert_eq!(clamped, Position::new(190, 190));
        let clamped = clamp_position(Position::new(-40, 3), size, viewport, 10);
        assert_eq!(clamped, Position::new(10, 10));
    }

    #[test]
    fn clamp_on_tiny_viewport_keeps_margin() {
        let clamped = clamp_position(
            Position::new(50, 50),
            Size::new(300, 200),
            Size::new(200, 100),
            10,
        );
        assert_eq!(clamped, Position::new(10, 10));
        assert!(!fits_viewport(
            Rect::from_parts(clamped, Size::new(300, 200)),
            Size::new(200, 100),
            10
        ));
    }

    #[test]
    fn region_map_hit_test_prefers_topmost() {
        let mut map = RegionMap::default();
        map.set("a", Rect::new(0, 0, 10, 10));
        map.set("b", Rect::new(5, 5, 10, 10));
        assert_eq!(map.hit_test(6, 6, &["a", "b"]), Some("b"));
        assert_eq!(map.hit_test(6, 6, &["b", "a"]), Some("a"));
        assert_eq!(map.hit_test(1, 1, &["a", "b"]), Some("a"));
        assert_eq!(map.hit_test(50, 50, &["a", "b"]), None);
        map.remove(&"a");
        assert_eq!(map.ids(), vec!["b"]);
    }

    #[test]
    fn rect_contains_edge_cases() {
        assert!(!rect_contains(Rect::new(0, 0, 0, 5), 0, 0));
        let r = Rect::new(1, 1, 3, 3);
        assert!(r.contains(1, 1));
        assert!(!r.contains(4, 1));
    }
}

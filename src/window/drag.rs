//! Pointer-drag math shared by widget windows and the dock.
//!
//! A session remembers the rectangle and pointer at gesture start. Every
//! position it reports is derived from that start plus the pointer's total
//! displacement, never from the previous move, so dropped or coalesced move
//! events cannot make the final position drift.

use crate::layout::{Position, Rect, Size, clamp_position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    start_rect: Rect,
    start_pointer: Position,
    live: Position,
}

impl DragSession {
    pub fn begin(start_rect: Rect, pointer: Position) -> Self {
        Self {
            start_rect,
            start_pointer: pointer,
            live: start_rect.position(),
        }
    }

    pub fn start_rect(&self) -> Rect {
        self.start_rect
    }

    /// Where the pointer grabbed the window, relative to its top-left corner.
    pub fn grab_offset(&self) -> (i32, i32) {
        (
            self.start_pointer.x.saturating_sub(self.start_rect.x),
            self.start_pointer.y.saturating_sub(self.start_rect.y),
        )
    }

    pub fn live_position(&self) -> Position {
        self.live
    }

    fn target(&self, pointer: Position, size: Size, viewport: Size, margin: i32) -> Position {
        let (grab_x, grab_y) = self.grab_offset();
        let raw = Position::new(pointer.x.saturating_sub(grab_x), pointer.y.saturating_sub(grab_y));
        clamp_position(raw, size, viewport, margin)
    }

    /// Follow a pointer move; returns the clamped transient position.
    pub fn track(&mut self, pointer: Position, size: Size, viewport: Size, margin: i32) -> Position {
        self.live = self.target(pointer, size, viewport, margin);
        self.live
    }

    /// Final position for a gesture released at `pointer`.
    pub fn finish(&self, pointer: Position, size: Size, viewport: Size, margin: i32) -> Position {
        self.target(pointer, size, viewport, margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(800, 600);
    const SIZE: Size = Size::new(300, 200);

    #[test]
    fn grab_offset_is_kept_while_moving() {
        let mut drag = DragSession::begin(Rect::new(100, 100, 300, 200), Position::new(150, 110));
        assert_eq!(drag.grab_offset(), (50, 10));
        assert_eq!(drag.track(Position::new(250, 210), SIZE, VIEWPORT, 10), Position::new(200, 200));
        assert_eq!(drag.live_position(), Position::new(200, 200));
    }

    #[test]
    fn live_position_is_clamped() {
        let mut drag = DragSession::begin(Rect::new(100, 100, 300, 200), Position::new(150, 110));
        let live = drag.track(Position::new(5000, -300), SIZE, VIEWPORT, 10);
        assert_eq!(live, Position::new(490, 10));
    }

    #[test]
    fn finish_ignores_intermediate_moves() {
        let start = Rect::new(100, 100, 300, 200);
        let grab = Position::new(120, 115);
        let release = Position::new(120 + 137, 115 + 61);

        let direct = DragSession::begin(start, grab).finish(release, SIZE, VIEWPORT, 10);

        let mut jittery = DragSession::begin(start, grab);
        for step in 0..1000 {
            let wobble = if step % 2 == 0 { 400 } else { -400 };
            jittery.track(Position::new(grab.x + wobble, grab.y - wobble), SIZE, VIEWPORT, 10);
        }
        let noisy = jittery.finish(release, SIZE, VIEWPORT, 10);

        assert_eq!(direct, Position::new(237, 161));
        assert_eq!(direct, noisy);
    }

    #[test]
    fn extreme_pointer_coordinates_saturate() {
        let mut drag =
            DragSession::begin(Rect::new(100, 100, 300, 200), Position::new(i32::MIN, i32::MAX));
        assert_eq!(drag.grab_offset(), (i32::MIN, i32::MAX - 100));
        let live = drag.track(Position::new(i32::MAX, i32::MIN), SIZE, VIEWPORT, 10);
        assert_eq!(live, Position::new(490, 10));
        let done = drag.finish(Position::new(i32::MIN, i32::MAX), SIZE, VIEWPORT, 10);
        assert_eq!(done, Position::new(10, 100));
    }
}

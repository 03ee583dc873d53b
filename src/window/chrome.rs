//! Geometry of a window's chrome: the header strip that drags the window and
//! the controls embedded in it.
//!
//! Input routing and the decorator both derive their rectangles from here so
//! what is drawn as a button is also what swallows the click.

use crate::layout::Rect;

/// Part of a window a pointer lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Header area outside the controls.
    DragHandle,
    Minimize,
    Close,
    Content,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeLayout {
    pub frame: Rect,
    pub header: Rect,
    pub minimize: Rect,
    pub close: Rect,
    pub content: Rect,
}

impl ChromeLayout {
    pub fn new(frame: Rect, header_height: i32) -> Self {
        let header_height = header_height.clamp(0, frame.height.max(0));
        // square controls in pixels; a terminal needs three cells for "[x]"
        let control = header_height.max(3).min(frame.width.max(0) / 2);
        let header = Rect::new(frame.x, frame.y, frame.width, header_height);
        let close = Rect::new(frame.right() - control, frame.y, control, header_height);
        let minimize = Rect::new(close.x - control, frame.y, control, header_height);
        let content = Rect::new(
            frame.x,
            frame.y + header_height,
            frame.width,
            frame.height - header_height,
        );
        Self {
            frame,
            header,
            minimize,
            close,
            content,
        }
    }

    pub fn hit_test(&self, x: i32, y: i32) -> PointerTarget {
        if self.close.contains(x, y) {
            PointerTarget::Close
        } else if self.minimize.contains(x, y) {
            PointerTarget::Minimize
        } else if self.header.contains(x, y) {
            PointerTarget::DragHandle
        } else if self.content.contains(x, y) {
            PointerTarget::Content
        } else {
            PointerTarget::Outside
        }
    }
}

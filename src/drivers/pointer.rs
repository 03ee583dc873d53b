//! Mapping of terminal mouse reports onto workspace pointer events.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::window::{PointerEvent, PointerKind};

/// Left-button gestures only; wheel and other buttons are not pointer input
/// for the window manager. Terminals report motion with a held button as
/// `Drag`, which is the only motion a drag needs.
pub fn to_pointer_event(mouse: &MouseEvent) -> Option<PointerEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
        MouseEventKind::Drag(MouseButton::Left) => PointerKind::Move,
        MouseEventKind::Up(MouseButton::Left) => PointerKind::Up,
        _ => return None,
    };
    Some(PointerEvent::new(
        kind,
        i32::from(mouse.column),
        i32::from(mouse.row),
    ))
}

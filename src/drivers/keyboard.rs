use crossterm::event::{Event, KeyEventKind};

/// Filters raw key events down to one event per key press.
///
/// Windows consoles report press, repeat and release; everything else
/// reports press only. Hotkeys here toggle state, so repeats and releases
/// would undo the press.
#[derive(Default)]
pub struct KeyboardNormalizer;

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(key) if key.kind != KeyEventKind::Press => None,
            other => Some(other),
        }
    }
}

pub mod boundary;
pub mod chrome;
pub mod decorator;
pub mod drag;
pub mod overlap;
pub mod surface;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use boundary::ResizeDebouncer;
pub use chrome::{ChromeLayout, PointerTarget};
pub use decorator::{BoxDecorator, WindowDecorator, WindowFrame};
pub use drag::DragSession;
pub use overlap::{LayoutProbe, resolve_drag_overlaps};
pub use surface::{
    PointerEvent, PointerKind, SurfaceAction, SurfaceState, WindowSurface,
};

/// Stable name of a widget instance, e.g. `"pomodoro"` or `"tasks"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for WidgetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

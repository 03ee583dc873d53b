pub mod config;
pub mod constants;
pub mod dock;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod layout;
pub mod runner;
pub mod store;
pub mod tracing_sub;
pub mod widgets;
pub mod window;
pub mod workspace;

pub use config::LayoutConfig;
pub use store::WindowStore;
pub use window::WidgetId;
pub use workspace::Workspace;

//! Shared crate-wide constants.

/// Gap kept between a widget and every viewport edge.
///
/// Units: pixels (or terminal cells when the host runs with
/// [`LayoutConfig::terminal`](crate::config::LayoutConfig::terminal)).
pub const DEFAULT_MARGIN: i32 = 10;

/// Where a freshly opened widget is tried first before the ring search.
pub const DEFAULT_ANCHOR_X: i32 = 100;
pub const DEFAULT_ANCHOR_Y: i32 = 100;

/// Distance between neighbouring candidates of the ring search, on both axes.
pub const DEFAULT_SEARCH_STEP: i32 = 80;

/// Number of ring candidates tried before the resolver gives up and returns
/// the last clamped candidate. The anchor itself is not counted.
pub const DEFAULT_MAX_ATTEMPTS: usize = 300;

/// Size assumed for a widget whose rendered box has not been measured yet.
///
/// Deliberately on the large side: underestimating here lets the resolver
/// accept a spot that turns out to overlap once the real box is known.
pub const NOMINAL_WIDGET_WIDTH: i32 = 300;
pub const NOMINAL_WIDGET_HEIGHT: i32 = 200;

/// Height of the header strip that acts as the drag handle.
pub const DEFAULT_HEADER_HEIGHT: i32 = 32;

/// Quiet period after the last viewport resize before boundaries are
/// enforced.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 100;

/// Stacking index handed to the bottom-most widget.
pub const DEFAULT_Z_INDEX_BASE: u32 = 1000;

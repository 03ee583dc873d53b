//! Tunables for placement, clamping and stacking.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ANCHOR_X, DEFAULT_ANCHOR_Y, DEFAULT_HEADER_HEIGHT, DEFAULT_MARGIN,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_RESIZE_DEBOUNCE_MS, DEFAULT_SEARCH_STEP, DEFAULT_Z_INDEX_BASE,
    NOMINAL_WIDGET_HEIGHT, NOMINAL_WIDGET_WIDTH,
};
use crate::error::ConfigError;
use crate::layout::{Position, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub margin: i32,
    pub anchor: Position,
    pub search_step: i32,
    pub max_attempts: usize,
    pub nominal_size: Size,
    pub header_height: i32,
    pub resize_debounce_ms: u64,
    pub z_index_base: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            anchor: Position::new(DEFAULT_ANCHOR_X, DEFAULT_ANCHOR_Y),
            search_step: DEFAULT_SEARCH_STEP,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            nominal_size: Size::new(NOMINAL_WIDGET_WIDTH, NOMINAL_WIDGET_HEIGHT),
            header_height: DEFAULT_HEADER_HEIGHT,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            z_index_base: DEFAULT_Z_INDEX_BASE,
        }
    }
}

impl LayoutConfig {
    /// Cell-scaled preset for the terminal host, where one unit is a
    /// character cell rather than a pixel.
    pub fn terminal() -> Self {
        Self {
            margin: 1,
            anchor: Position::new(2, 2),
            search_step: 4,
            nominal_size: Size::new(30, 10),
            header_height: 1,
            ..Self::default()
        }
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.margin < 0 {
            return Err(ConfigError::Invalid {
                field: "margin",
                reason: "must not be negative",
            });
        }
        if self.search_step <= 0 {
            return Err(ConfigError::Invalid {
                field: "search_step",
                reason: "must be positive",
            });
        }
        if !self.nominal_size.is_positive() {
            return Err(ConfigError::Invalid {
                field: "nominal_size",
                reason: "width and height must be positive",
            });
        }
        if self.header_height <= 0 {
            return Err(ConfigError::Invalid {
                field: "header_height",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// Load a JSON config; fields left out take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with_base(path, Self::default())
    }

    /// Load a JSON config whose missing fields come from `base`.
    pub fn load_with_base(path: impl AsRef<Path>, base: Self) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let parse_error = |source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        };
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: serde_json::Value = serde_json::from_str(&raw).map_err(parse_error)?;
        let mut merged = serde_json::to_value(base).map_err(parse_error)?;
        if let (Some(target), Some(source)) = (merged.as_object_mut(), overrides.as_object()) {
            for (key, value) in source {
                target.insert(key.clone(), value.clone());
            }
        }
        let config: Self = serde_json::from_value(merged).map_err(parse_error)?;
        config.validate()?;
        Ok(config)
    }
}

//! Error types for the fallible edges of the crate.
//!
//! Layout operations themselves never fail: the window store recovers from
//! every storage problem locally. These enums surface only from startup
//! paths (loading a config file, opening a layout file) and from the storage
//! backends, whose errors the store logs and swallows.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("layout storage i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("layout storage holds malformed data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("layout storage is unavailable")]
    Unavailable,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

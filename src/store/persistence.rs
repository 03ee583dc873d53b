//! Durable layout storage.
//!
//! Layout is kept as a small set of namespaced keys, mirroring how a browser
//! keeps it in local storage: one key for the per-widget structure and one
//! for the dock. Each key decodes on its own, so a corrupt widget entry does
//! not take the dock position down with it.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::dock::DockState;
use crate::error::StorageError;
use crate::layout::Position;
use crate::window::WidgetId;

pub const WIDGETS_KEY: &str = "focus-wm.widgets";
pub const DOCK_KEY: &str = "focus-wm.dock";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetLayout {
    pub positions: BTreeMap<WidgetId, Position>,
    /// Back-to-front.
    pub stack: Vec<WidgetId>,
    pub collapsed: BTreeSet<WidgetId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedLayout {
    pub widgets: WidgetLayout,
    pub dock: Option<DockState>,
}

impl PersistedLayout {
    pub fn is_empty(&self) -> bool {
        self.widgets.positions.is_empty() && self.dock.is_none()
    }

    fn encode(&self) -> Result<Vec<(&'static str, Option<String>)>, StorageError> {
        let widgets = serde_json::to_string(&self.widgets)?;
        let dock = self.dock.as_ref().map(serde_json::to_string).transpose()?;
        Ok(vec![(WIDGETS_KEY, Some(widgets)), (DOCK_KEY, dock)])
    }

    /// Missing or malformed keys decode to their empty defaults.
    fn decode<F>(mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let widgets = get(WIDGETS_KEY)
            .and_then(|raw| decode_key::<WidgetLayout>(WIDGETS_KEY, &raw))
            .unwrap_or_default();
        let dock = get(DOCK_KEY).and_then(|raw| decode_key::<DockState>(DOCK_KEY, &raw));
        Self { widgets, dock }
    }
}

fn decode_key<T: for<'de> Deserialize<'de>>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding corrupt layout entry");
            None
        }
    }
}

/// Load/save seam between the window store and wherever layout lives.
pub trait LayoutStorage {
    fn load_layout(&mut self) -> Result<PersistedLayout, StorageError>;
    fn save_layout(&mut self, layout: &PersistedLayout) -> Result<(), StorageError>;
}

impl<T: LayoutStorage + ?Sized> LayoutStorage for Box<T> {
    fn load_layout(&mut self) -> Result<PersistedLayout, StorageError> {
        (**self).load_layout()
    }

    fn save_layout(&mut self, layout: &PersistedLayout) -> Result<(), StorageError> {
        (**self).save_layout(layout)
    }
}

/// In-process key/value storage. Clones share the same entries, so a caller
/// can keep a handle to inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }
}

impl LayoutStorage for MemoryStorage {
    fn load_layout(&mut self) -> Result<PersistedLayout, StorageError> {
        let entries = self.entries.borrow();
        Ok(PersistedLayout::decode(|key| entries.get(key).cloned()))
    }

    fn save_layout(&mut self, layout: &PersistedLayout) -> Result<(), StorageError> {
        let encoded = layout.encode()?;
        let mut entries = self.entries.borrow_mut();
        for (key, value) in encoded {
            match value {
                Some(value) => entries.insert(key.to_string(), value),
                None => entries.remove(key),
            };
        }
        Ok(())
    }
}

/// JSON file holding one string value per key.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl LayoutStorage for JsonFileStorage {
    fn load_layout(&mut self) -> Result<PersistedLayout, StorageError> {
        let entries = self.read_entries()?;
        Ok(PersistedLayout::decode(|key| entries.get(key).cloned()))
    }

    fn save_layout(&mut self, layout: &PersistedLayout) -> Result<(), StorageError> {
        // unrelated keys written by other tools survive a save
        let mut entries = self.read_entries().unwrap_or_default();
        for (key, value) in layout.encode()? {
            match value {
                Some(value) => entries.insert(key.to_string(), value),
                None => entries.remove(key),
            };
        }
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

//! JSON file-backed settings store.
//!
//! The document is re-read on every intent query so edits made by another
//! process are picked up. When the file cannot be read the last document this
//! store read or wrote is used instead. Writes go to a sibling temp file first
//! and are renamed into place.

use crate::error::{SettingsError, SettingsResult};
use crate::store::{SettingsStore, StoredSettings};
use hopgate_types::Protocol;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// File name used under the platform config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Settings persisted as a JSON document.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    /// Last successfully read or written document.
    cache: Mutex<StoredSettings>,
}

impl FileSettingsStore {
    /// Opens the store at `path`. A missing file yields default settings;
    /// the file is created on first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let settings = read_document(&path)?;
        debug!(path = %path.display(), "opened settings store");
        Ok(Self {
            path,
            cache: Mutex::new(settings),
        })
    }

    /// Opens the store at `<config dir>/hopgate/settings.json`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoConfigDir`] if the platform has no config
    /// directory, or any error from [`FileSettingsStore::open`].
    pub fn open_default() -> SettingsResult<Self> {
        Self::open(Self::default_path()?)
    }

    /// Returns the default settings path for this platform.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(dir.join("hopgate").join(SETTINGS_FILE_NAME))
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document from disk and refreshes the cached copy.
    pub fn load(&self) -> SettingsResult<StoredSettings> {
        let settings = read_document(&self.path)?;
        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = settings.clone();
        Ok(settings)
    }

    /// Writes the document to disk and updates the cached copy.
    pub fn save(&self, settings: &StoredSettings) -> SettingsResult<()> {
        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = settings.clone();
        write_document(&self.path, settings)
    }

    /// Returns the last known document without touching the disk.
    pub fn cached(&self) -> StoredSettings {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the persisted protocol selection, if any.
    pub fn protocol(&self) -> SettingsResult<Option<Protocol>> {
        Ok(self.load()?.protocol)
    }

    /// Persists a protocol selection.
    pub fn set_protocol(&self, protocol: Protocol) -> SettingsResult<()> {
        let mut settings = self.load()?;
        settings.protocol = Some(protocol);
        settings.touch();
        self.save(&settings)
    }
}

impl SettingsStore for FileSettingsStore {
    fn multihop_intent(&self) -> bool {
        match self.load() {
            Ok(settings) => settings.multihop_enabled,
            Err(e) => {
                warn!(path = %self.path.display(), "failed to read settings, using last known: {e}");
                self.cached().multihop_enabled
            }
        }
    }

    fn set_multihop_intent(&self, enabled: bool) {
        // Start from the disk copy so fields written by others survive.
        let mut settings = self.load().unwrap_or_else(|_| self.cached());
        settings.multihop_enabled = enabled;
        settings.touch();
        if let Err(e) = self.save(&settings) {
            warn!(path = %self.path.display(), "failed to persist multi-hop intent: {e}");
        }
    }
}

fn read_document(path: &Path) -> SettingsResult<StoredSettings> {
    match fs::read_to_string(path) {
        Ok(contents) if contents.trim().is_empty() => Ok(StoredSettings::default()),
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoredSettings::default()),
        Err(e) => Err(SettingsError::io(path, e)),
    }
}

fn write_document(path: &Path, settings: &StoredSettings) -> SettingsResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SettingsError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| SettingsError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| SettingsError::io(path, e))?;
    Ok(())
}

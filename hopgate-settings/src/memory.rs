//! In-process settings store.

use crate::store::{SettingsStore, StoredSettings};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Settings held in memory only. Counts writes so callers can observe
/// whether a persistence write happened.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<StoredSettings>,
    writes: AtomicUsize,
}

impl MemorySettingsStore {
    /// Creates an empty store (intent `false`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with the given persisted intent.
    pub fn with_intent(enabled: bool) -> Self {
        Self {
            settings: Mutex::new(StoredSettings {
                multihop_enabled: enabled,
                ..Default::default()
            }),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of `set_multihop_intent` calls received.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Returns a copy of the stored document.
    pub fn snapshot(&self) -> StoredSettings {
        self.settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn multihop_intent(&self) -> bool {
        self.settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .multihop_enabled
    }

    fn set_multihop_intent(&self, enabled: bool) {
        let mut settings = self.settings.lock().unwrap_or_else(PoisonError::into_inner);
        settings.multihop_enabled = enabled;
        settings.touch();
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

//! Persisted user settings for hopgate.
//!
//! The gate only needs one persisted value, the user's multi-hop intent, and
//! consumes it through the [`SettingsStore`] trait. Two stores are provided:
//! - [`MemorySettingsStore`]: process-local, counts writes (tests, embedding)
//! - [`FileSettingsStore`]: a small JSON document on disk
//!
//! # Fault handling
//!
//! [`SettingsStore`] methods are total. A store that cannot read its backing
//! medium reports the conservative default (`false`) and a store that cannot
//! write logs the failure and keeps its in-memory copy. Faults never reach
//! the gate. The fallible [`FileSettingsStore::load`] and
//! [`FileSettingsStore::save`] are available to callers that want errors.

mod error;
mod file;
mod memory;
mod store;

pub use error::{SettingsError, SettingsResult};
pub use file::{FileSettingsStore, SETTINGS_FILE_NAME};
pub use memory::MemorySettingsStore;
pub use store::{SettingsStore, StoredSettings};

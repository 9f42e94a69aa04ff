use chrono::{DateTime, Utc};
use hopgate_types::Protocol;
use serde::{Deserialize, Serialize};

/// Key-value access to the persisted multi-hop intent.
///
/// Implementations must not fail outward. Unreadable state falls back to the
/// last value the store knew, or `false` if it never knew one, and write
/// failures are absorbed by the store.
///
/// The gate calls [`SettingsStore::set_multihop_intent`] while holding its
/// internal lock, so implementations must not call back into the gate.
pub trait SettingsStore: Send + Sync {
    /// Returns the persisted multi-hop intent.
    fn multihop_intent(&self) -> bool;

    /// Persists the multi-hop intent.
    fn set_multihop_intent(&self, enabled: bool);
}

/// The persisted settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSettings {
    /// Whether the user asked for multi-hop routing.
    #[serde(default)]
    pub multihop_enabled: bool,
    /// Last selected protocol.
    #[serde(default)]
    pub protocol: Option<Protocol>,
    /// When the document was last written.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredSettings {
    pub(crate) fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

//! In-memory collaborator implementations.
//!
//! These hold the latest value pushed by the surrounding client (account
//! refresh, tunnel events, protocol picker) and answer the gate's queries
//! from it.

use crate::collaborators::{
    ConnectionStatusProvider, ProtocolRegistry, SessionProvider, SubscriptionProvider,
};
use hopgate_types::{AccountProfile, ConnectionState, Protocol};
use std::io::ErrorKind;
use std::path::Path;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, warn};

/// The signed-in account, shared by the session and subscription queries.
#[derive(Debug, Default)]
pub struct AccountState {
    profile: RwLock<AccountProfile>,
}

impl AccountState {
    pub fn new(profile: AccountProfile) -> Self {
        Self {
            profile: RwLock::new(profile),
        }
    }

    /// Loads a profile from a JSON file.
    ///
    /// A missing or unreadable file yields the signed-out profile.
    pub fn load(path: &Path) -> Self {
        let profile = match std::fs::read_to_string(path) {
            Ok(json) => AccountProfile::from_json(&json).unwrap_or_else(|e| {
                warn!(path = %path.display(), "invalid account file, treating as signed out: {e}");
                AccountProfile::default()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no account file, signed out");
                AccountProfile::default()
            }
            Err(e) => {
                warn!(path = %path.display(), "cannot read account file, treating as signed out: {e}");
                AccountProfile::default()
            }
        };
        Self::new(profile)
    }

    /// Returns a copy of the current profile.
    pub fn profile(&self) -> AccountProfile {
        self.profile
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the profile, e.g. after an account refresh.
    pub fn replace(&self, profile: AccountProfile) {
        *self.profile.write().unwrap_or_else(PoisonError::into_inner) = profile;
    }

    /// Clears the session.
    pub fn sign_out(&self) {
        self.replace(AccountProfile::default());
    }

    fn with_profile<T>(&self, f: impl FnOnce(&AccountProfile) -> T) -> T {
        let profile = self.profile.read().unwrap_or_else(PoisonError::into_inner);
        f(&*profile)
    }
}

impl SessionProvider for AccountState {
    fn has_valid_session(&self) -> bool {
        self.with_profile(AccountProfile::is_authenticated)
    }
}

impl SubscriptionProvider for AccountState {
    fn is_subscription_active(&self) -> bool {
        self.with_profile(|p| p.is_active)
    }

    fn has_multihop_entitlement(&self) -> bool {
        self.with_profile(AccountProfile::has_multihop_entitlement)
    }
}

/// Latest tunnel state reported by the VPN service.
#[derive(Debug, Default)]
pub struct TunnelStatus {
    state: RwLock<ConnectionState>,
}

impl TunnelStatus {
    pub fn new(state: ConnectionState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, state: ConnectionState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

impl ConnectionStatusProvider for TunnelStatus {
    fn is_tunnel_active(&self) -> bool {
        self.state().is_tunnel_active()
    }
}

/// The protocol currently selected by the user; `None` when unknown.
#[derive(Debug, Default)]
pub struct ProtocolSelection {
    current: RwLock<Option<Protocol>>,
}

impl ProtocolSelection {
    pub fn new(protocol: Option<Protocol>) -> Self {
        Self {
            current: RwLock::new(protocol),
        }
    }

    pub fn current(&self) -> Option<Protocol> {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn select(&self, protocol: Protocol) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(protocol);
    }
}

impl ProtocolRegistry for ProtocolSelection {
    fn current_protocol_supports_multihop(&self) -> bool {
        self.current().is_some_and(|p| p.supports_multihop())
    }
}

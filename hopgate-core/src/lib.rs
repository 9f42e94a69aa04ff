//! Multi-hop eligibility gate.
//!
//! Multi-hop routes traffic through an entry relay and a separate exit
//! relay. Whether the user may turn it on depends on signals owned by other
//! parts of the client:
//! - a valid session
//! - an active subscription whose plan includes multi-hop
//! - no live tunnel session (topology cannot change mid-session)
//! - a selected protocol that can route through two hops
//!
//! [`MultiHopGate`] combines these into a [`PermissionState`], keeps the
//! user's persisted multi-hop setting consistent with the current protocol,
//! and notifies listeners when the setting changes.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hopgate_core::{
//!     AccountState, GateCollaborators, MultiHopGate, ProtocolSelection, TunnelStatus,
//! };
//! use hopgate_settings::MemorySettingsStore;
//! use hopgate_types::{AccountProfile, PermissionState, Plan, Protocol};
//!
//! let account = Arc::new(AccountState::new(AccountProfile::signed_in("token", Plan::Pro)));
//! let gate = MultiHopGate::new(GateCollaborators {
//!     session: account.clone(),
//!     subscription: account,
//!     connection: Arc::new(TunnelStatus::default()),
//!     protocols: Arc::new(ProtocolSelection::new(Some(Protocol::OpenVpn))),
//!     settings: Arc::new(MemorySettingsStore::new()),
//! });
//!
//! assert_eq!(gate.permission_state(), PermissionState::Enabled);
//! gate.set_enabled(true);
//! assert!(gate.enabled());
//! ```

mod collaborators;
mod gate;
mod listener;
pub mod providers;

pub use collaborators::{
    ConnectionStatusProvider, GateCollaborators, ProtocolRegistry, SessionProvider,
    SubscriptionProvider,
};
pub use gate::MultiHopGate;
pub use listener::{EnabledListener, ListenerId};
pub use providers::{AccountState, ProtocolSelection, TunnelStatus};

pub use hopgate_settings::SettingsStore;
pub use hopgate_types::PermissionState;

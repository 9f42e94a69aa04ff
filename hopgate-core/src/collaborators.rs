//! Signals the gate consumes from the rest of the client.
//!
//! Every method is total. A provider that cannot determine its answer
//! returns the conservative default: no session, no entitlement, tunnel
//! active, protocol without multi-hop.

use hopgate_settings::SettingsStore;
use std::sync::Arc;

/// Reports whether the user is signed in.
pub trait SessionProvider: Send + Sync {
    fn has_valid_session(&self) -> bool;
}

/// Reports subscription status and plan entitlements.
pub trait SubscriptionProvider: Send + Sync {
    fn is_subscription_active(&self) -> bool;

    fn has_multihop_entitlement(&self) -> bool;
}

/// Reports whether a tunnel session is live.
pub trait ConnectionStatusProvider: Send + Sync {
    /// True while connected or connecting, and when the status is unknown.
    fn is_tunnel_active(&self) -> bool;
}

/// Reports capabilities of the currently selected protocol.
pub trait ProtocolRegistry: Send + Sync {
    fn current_protocol_supports_multihop(&self) -> bool;
}

/// The set of collaborators a gate is built from.
#[derive(Clone)]
pub struct GateCollaborators {
    pub session: Arc<dyn SessionProvider>,
    pub subscription: Arc<dyn SubscriptionProvider>,
    pub connection: Arc<dyn ConnectionStatusProvider>,
    pub protocols: Arc<dyn ProtocolRegistry>,
    pub settings: Arc<dyn SettingsStore>,
}

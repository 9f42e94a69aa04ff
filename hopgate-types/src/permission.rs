//! Derived multi-hop permission state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why multi-hop configuration is or is not currently available.
///
/// Variants are listed in evaluation priority: when several blocking
/// conditions hold, the first one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    /// No valid session.
    NotAuthenticated,
    /// Signed in, but the subscription is not active.
    SubscriptionNotActive,
    /// A tunnel session is live; topology changes are blocked.
    VpnActive,
    /// The selected protocol cannot route through two hops.
    DisabledByProtocol,
    /// Multi-hop can be configured.
    Enabled,
}

impl PermissionState {
    /// Returns true if multi-hop configuration is permitted.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Short explanation suitable for showing to the user.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "sign in to use multi-hop",
            Self::SubscriptionNotActive => "your subscription is not active",
            Self::VpnActive => "disconnect the VPN to change multi-hop",
            Self::DisabledByProtocol => "the selected protocol does not support multi-hop",
            Self::Enabled => "multi-hop is available",
        }
    }

    /// Returns the snake_case name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::SubscriptionNotActive => "subscription_not_active",
            Self::VpnActive => "vpn_active",
            Self::DisabledByProtocol => "disabled_by_protocol",
            Self::Enabled => "enabled",
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Account profile and plan entitlements.
//!
//! The account service reports a session token, whether the subscription is
//! active, the plan, and an explicit capability list. Entitlement to
//! multi-hop comes from the capability list; older account responses carry
//! no capabilities, in which case the plan decides.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Single-hop only.
    Standard,
    /// Includes multi-hop and port forwarding.
    Pro,
}

impl Plan {
    /// Returns true if this plan includes multi-hop routing.
    #[must_use]
    pub fn includes_multihop(&self) -> bool {
        matches!(self, Self::Pro)
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Pro => "pro",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "pro" => Ok(Self::Pro),
            _ => Err(Error::UnknownPlan(s.to_string())),
        }
    }
}

/// A capability granted to the account by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    MultiHop,
    PortForwarding,
    WireGuard,
}

/// Snapshot of the signed-in account, as the account service reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Session token; empty when signed out.
    #[serde(default)]
    pub session_token: String,
    /// Whether the subscription is currently active.
    #[serde(default)]
    pub is_active: bool,
    /// Subscription plan, if known.
    #[serde(default)]
    pub plan: Option<Plan>,
    /// Capabilities granted to this account.
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

impl AccountProfile {
    /// Creates a signed-in, active profile on the given plan.
    pub fn signed_in(session_token: impl Into<String>, plan: Plan) -> Self {
        Self {
            session_token: session_token.into(),
            is_active: true,
            plan: Some(plan),
            capabilities: Vec::new(),
        }
    }

    /// Adds a capability, builder style.
    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// Sets the subscription active flag, builder style.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Returns true if a non-blank session token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.session_token.trim().is_empty()
    }

    /// Returns true if the account is entitled to multi-hop routing.
    #[must_use]
    pub fn has_multihop_entitlement(&self) -> bool {
        if self.capabilities.is_empty() {
            return self.plan.is_some_and(|p| p.includes_multihop());
        }
        self.capabilities.contains(&Capability::MultiHop)
    }

    /// Parses a profile from its JSON representation.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_signed_out() {
        let profile = AccountProfile::default();
        assert!(!profile.is_authenticated());
        assert!(!profile.is_active);
        assert!(!profile.has_multihop_entitlement());
    }

    #[test]
    fn whitespace_token_is_not_a_session() {
        let profile = AccountProfile::signed_in("   ", Plan::Pro);
        assert!(!profile.is_authenticated());
    }

    #[test]
    fn capabilities_override_plan() {
        let profile = AccountProfile::signed_in("token", Plan::Pro)
            .with_capability(Capability::PortForwarding);
        assert!(!profile.has_multihop_entitlement());
    }
}

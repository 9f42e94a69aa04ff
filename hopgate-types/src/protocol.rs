//! VPN protocols and their routing capabilities.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tunnel protocol the client can be configured to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// OpenVPN over UDP/TCP.
    OpenVpn,
    /// WireGuard.
    WireGuard,
}

impl Protocol {
    /// All known protocols, in display order.
    pub const ALL: [Protocol; 2] = [Protocol::OpenVpn, Protocol::WireGuard];

    /// Returns true if traffic can be routed through an entry and an exit
    /// relay with this protocol.
    #[must_use]
    pub fn supports_multihop(&self) -> bool {
        match self {
            Self::OpenVpn => true,
            Self::WireGuard => false,
        }
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenVpn => "openvpn",
            Self::WireGuard => "wireguard",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openvpn" => Ok(Self::OpenVpn),
            "wireguard" => Ok(Self::WireGuard),
            _ => Err(Error::UnknownProtocol(s.to_string())),
        }
    }
}

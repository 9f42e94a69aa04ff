//! Tunnel connection state as reported by the VPN service.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Connection state of the VPN tunnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// No tunnel session.
    #[default]
    Disconnected,
    /// Tunnel is being established.
    Connecting,
    /// Tunnel is up.
    Connected,
    /// Tunnel is being torn down.
    Disconnecting,
    /// The service could not report a state.
    Unknown,
}

impl ConnectionState {
    /// Returns true if a tunnel session is live or may be live.
    ///
    /// Only `Disconnected` counts as inactive: an unknown state blocks
    /// configuration changes the same way a live session does.
    #[must_use]
    pub fn is_tunnel_active(&self) -> bool {
        !matches!(self, Self::Disconnected)
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnecting => "disconnecting",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disconnected" => Ok(Self::Disconnected),
            "connecting" => Ok(Self::Connecting),
            "connected" => Ok(Self::Connected),
            "disconnecting" => Ok(Self::Disconnecting),
            "unknown" => Ok(Self::Unknown),
            _ => Err(Error::UnknownConnectionState(s.to_string())),
        }
    }
}

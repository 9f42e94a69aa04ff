//! Core type definitions for hopgate.
//!
//! This crate defines the plain domain types shared by the gate, the settings
//! store and the CLI:
//! - VPN protocols and their multi-hop capability
//! - Account profile, plans and capabilities (entitlement inputs)
//! - Tunnel connection state
//! - The derived multi-hop permission state
//!
//! Nothing here performs I/O.

mod account;
mod connection;
mod permission;
mod protocol;

pub use account::{AccountProfile, Capability, Plan};
pub use connection::ConnectionState;
pub use permission::PermissionState;
pub use protocol::Protocol;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing domain types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown protocol: {0}")]
    UnknownProtocol(String),

    #[error("unknown plan: {0}")]
    UnknownPlan(String),

    #[error("unknown connection state: {0}")]
    UnknownConnectionState(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

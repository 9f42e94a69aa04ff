//! Command handling for the `hopgate` binary.
//!
//! The binary wires file-backed collaborators into a [`MultiHopGate`]:
//! settings come from a JSON settings file, the account from a JSON profile
//! and the tunnel state from the command line.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hopgate_core::{
    AccountState, GateCollaborators, MultiHopGate, PermissionState, ProtocolSelection,
    SettingsStore, TunnelStatus,
};
use hopgate_settings::FileSettingsStore;
use hopgate_types::{ConnectionState, Protocol};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Protocol assumed when none has been selected yet.
pub const DEFAULT_PROTOCOL: Protocol = Protocol::OpenVpn;

#[derive(Parser, Debug)]
#[command(name = "hopgate")]
#[command(about = "Inspect and toggle multi-hop routing")]
pub struct Args {
    /// Path to the settings file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Path to a JSON account profile; signed out when omitted
    #[arg(short, long, global = true)]
    pub account: Option<PathBuf>,

    /// Current tunnel state
    #[arg(long, default_value = "disconnected", global = true)]
    pub tunnel: ConnectionState,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show whether multi-hop is available and whether it is on
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Turn multi-hop on
    Enable,
    /// Turn multi-hop off
    Disable,
    /// Select the tunnel protocol (openvpn, wireguard)
    Protocol { protocol: Protocol },
}

/// Machine-readable status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub permission: PermissionState,
    pub reason: &'static str,
    pub enabled: bool,
    pub permitted_by_plan: bool,
    pub protocol: Protocol,
    pub tunnel: ConnectionState,
}

/// A gate wired to file-backed collaborators.
pub struct Client {
    store: Arc<FileSettingsStore>,
    protocols: Arc<ProtocolSelection>,
    tunnel: Arc<TunnelStatus>,
    gate: MultiHopGate,
}

impl Client {
    /// Opens the settings and account files named in `args`.
    pub fn open(args: &Args) -> Result<Self> {
        let store = match &args.settings {
            Some(path) => FileSettingsStore::open(path),
            None => FileSettingsStore::open_default(),
        }
        .context("failed to open settings")?;
        debug!(path = %store.path().display(), "using settings file");

        let account = match &args.account {
            Some(path) => AccountState::load(path),
            None => AccountState::default(),
        };

        let protocol = store
            .protocol()
            .context("failed to read protocol selection")?
            .unwrap_or(DEFAULT_PROTOCOL);

        Ok(Self::new(store, account, protocol, args.tunnel))
    }

    pub fn new(
        store: FileSettingsStore,
        account: AccountState,
        protocol: Protocol,
        tunnel: ConnectionState,
    ) -> Self {
        let store = Arc::new(store);
        let account = Arc::new(account);
        let protocols = Arc::new(ProtocolSelection::new(Some(protocol)));
        let tunnel = Arc::new(TunnelStatus::new(tunnel));

        let gate = MultiHopGate::new(GateCollaborators {
            session: account.clone(),
            subscription: account,
            connection: tunnel.clone(),
            protocols: protocols.clone(),
            settings: store.clone(),
        });

        Self {
            store,
            protocols,
            tunnel,
            gate,
        }
    }

    pub fn gate(&self) -> &MultiHopGate {
        &self.gate
    }

    /// Builds the status report.
    pub fn status(&self) -> StatusReport {
        let permission = self.gate.permission_state();
        StatusReport {
            permission,
            reason: permission.reason(),
            enabled: self.gate.enabled(),
            permitted_by_plan: self.gate.is_permitted_by_plan(),
            protocol: self.protocols.current().unwrap_or(DEFAULT_PROTOCOL),
            tunnel: self.tunnel.state(),
        }
    }

    /// Runs a command and returns the text to print.
    pub fn execute(&self, command: &Command) -> Result<String> {
        match command {
            Command::Status { json } => {
                let report = self.status();
                if *json {
                    Ok(serde_json::to_string_pretty(&report)?)
                } else {
                    Ok(render_status(&report))
                }
            }
            Command::Enable => self.change(true),
            Command::Disable => self.change(false),
            Command::Protocol { protocol } => self.select_protocol(*protocol),
        }
    }

    fn change(&self, enabled: bool) -> Result<String> {
        let state = self.gate.permission_state();
        if !state.is_enabled() {
            bail!("cannot change multi-hop: {}", state.reason());
        }
        if enabled && !self.gate.is_permitted_by_plan() {
            bail!("cannot enable multi-hop: your plan does not include it");
        }

        self.gate.set_enabled(enabled);
        Ok(format!("multi-hop {}", on_off(self.gate.enabled())))
    }

    fn select_protocol(&self, protocol: Protocol) -> Result<String> {
        self.store
            .set_protocol(protocol)
            .context("failed to save protocol selection")?;
        self.protocols.select(protocol);
        info!(%protocol, "protocol selected");

        let enabled = self.gate.refresh_enabled();
        let mut out = format!("protocol {protocol}, multi-hop {}", on_off(enabled));
        if !enabled && self.store.multihop_intent() {
            out.push_str(&format!(" (suspended: {protocol} does not support multi-hop)"));
        }
        Ok(out)
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn render_status(report: &StatusReport) -> String {
    format!(
        "permission:  {} ({})\nmulti-hop:   {}\nplan allows: {}\nprotocol:    {}\ntunnel:      {}",
        report.permission,
        report.reason,
        on_off(report.enabled),
        if report.permitted_by_plan { "yes" } else { "no" },
        report.protocol,
        report.tunnel,
    )
}

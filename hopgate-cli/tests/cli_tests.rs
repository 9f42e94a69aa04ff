use clap::Parser;
use hopgate_cli::{Args, Client, Command, StatusReport};
use hopgate_core::PermissionState;
use hopgate_settings::FileSettingsStore;
use hopgate_types::{ConnectionState, Protocol};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PRO_ACCOUNT: &str =
    r#"{"session_token":"abc123","is_active":true,"plan":"pro","capabilities":["multi-hop"]}"#;
const STANDARD_ACCOUNT: &str = r#"{"session_token":"abc123","is_active":true,"plan":"standard"}"#;

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn settings(&self) -> PathBuf {
        self.dir.path().join("settings.json")
    }

    fn account(&self, json: &str) -> PathBuf {
        let path = self.dir.path().join("account.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    fn args(&self, account: Option<&Path>, extra: &[&str]) -> Args {
        let settings = self.settings();
        let mut argv = vec!["hopgate".to_string(), "--settings".into()];
        argv.push(settings.display().to_string());
        if let Some(account) = account {
            argv.push("--account".into());
            argv.push(account.display().to_string());
        }
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::try_parse_from(argv).unwrap()
    }

    fn run(&self, account: Option<&Path>, extra: &[&str]) -> anyhow::Result<String> {
        let args = self.args(account, extra);
        Client::open(&args)?.execute(&args.command)
    }

    fn status(&self, account: Option<&Path>, extra: &[&str]) -> StatusReport {
        let args = self.args(account, extra);
        Client::open(&args).unwrap().status()
    }

    fn persisted_intent(&self) -> bool {
        FileSettingsStore::open(self.settings())
            .unwrap()
            .load()
            .unwrap()
            .multihop_enabled
    }
}

// ── Argument parsing ─────────────────────────────────────────────

#[test]
fn parses_global_flags_after_subcommand() {
    let args = Args::try_parse_from([
        "hopgate",
        "status",
        "--json",
        "--tunnel",
        "connected",
        "-v",
    ])
    .unwrap();
    assert!(args.verbose);
    assert_eq!(args.tunnel, ConnectionState::Connected);
    assert!(matches!(args.command, Command::Status { json: true }));
}

#[test]
fn rejects_unknown_protocol() {
    assert!(Args::try_parse_from(["hopgate", "protocol", "ipsec"]).is_err());
}

#[test]
fn tunnel_defaults_to_disconnected() {
    let args = Args::try_parse_from(["hopgate", "enable"]).unwrap();
    assert_eq!(args.tunnel, ConnectionState::Disconnected);
}

// ── status ───────────────────────────────────────────────────────

#[test]
fn status_without_account_is_not_authenticated() {
    let env = Env::new();
    let report = env.status(None, &["status"]);
    assert_eq!(report.permission, PermissionState::NotAuthenticated);
    assert!(!report.enabled);
    assert!(!report.permitted_by_plan);
    assert_eq!(report.protocol, Protocol::OpenVpn);
}

#[test]
fn status_json_output() {
    let env = Env::new();
    let account = env.account(PRO_ACCOUNT);
    let out = env.run(Some(&account), &["status", "--json"]).unwrap();

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["permission"], "enabled");
    assert_eq!(value["enabled"], false);
    assert_eq!(value["permitted_by_plan"], true);
    assert_eq!(value["protocol"], "openvpn");
    assert_eq!(value["tunnel"], "disconnected");
}

#[test]
fn status_text_output() {
    let env = Env::new();
    let account = env.account(PRO_ACCOUNT);
    let out = env.run(Some(&account), &["status", "--tunnel", "connected"]).unwrap();
    assert!(out.contains("vpn_active"));
    assert!(out.contains("disconnect the VPN"));
    assert!(out.contains("tunnel:      connected"));
}

// ── enable / disable ─────────────────────────────────────────────

#[test]
fn enable_persists_intent() {
    let env = Env::new();
    let account = env.account(PRO_ACCOUNT);

    let out = env.run(Some(&account), &["enable"]).unwrap();
    assert_eq!(out, "multi-hop on");
    assert!(env.persisted_intent());

    let out = env.run(Some(&account), &["disable"]).unwrap();
    assert_eq!(out, "multi-hop off");
    assert!(!env.persisted_intent());
}

#[test]
fn enable_refused_while_connected() {
    let env = Env::new();
    let account = env.account(PRO_ACCOUNT);

    let err = env
        .run(Some(&account), &["enable", "--tunnel", "connected"])
        .unwrap_err();
    assert!(err.to_string().contains("disconnect the VPN"));
    assert!(!env.persisted_intent());
}

#[test]
fn enable_refused_when_signed_out() {
    let env = Env::new();
    let err = env.run(None, &["enable"]).unwrap_err();
    assert!(err.to_string().contains("sign in"));
}

#[test]
fn enable_refused_without_entitlement() {
    let env = Env::new();
    let account = env.account(STANDARD_ACCOUNT);
    let err = env.run(Some(&account), &["enable"]).unwrap_err();
    assert!(err.to_string().contains("plan does not include"));
    assert!(!env.persisted_intent());
}

#[test]
fn disable_allowed_without_entitlement() {
    let env = Env::new();
    let account = env.account(STANDARD_ACCOUNT);
    assert_eq!(env.run(Some(&account), &["disable"]).unwrap(), "multi-hop off");
}

// ── protocol ─────────────────────────────────────────────────────

#[test]
fn protocol_switch_suspends_and_restores() {
    let env = Env::new();
    let account = env.account(PRO_ACCOUNT);
    env.run(Some(&account), &["enable"]).unwrap();

    let out = env.run(Some(&account), &["protocol", "wireguard"]).unwrap();
    assert!(out.starts_with("protocol wireguard, multi-hop off"));
    assert!(out.contains("suspended"));
    assert!(env.persisted_intent());

    let report = env.status(Some(&account), &["status"]);
    assert_eq!(report.permission, PermissionState::DisabledByProtocol);
    assert_eq!(report.protocol, Protocol::WireGuard);
    assert!(!report.enabled);

    let out = env.run(Some(&account), &["protocol", "openvpn"]).unwrap();
    assert_eq!(out, "protocol openvpn, multi-hop on");
}

#[test]
fn protocol_switch_without_intent_is_not_suspended() {
    let env = Env::new();
    let out = env.run(None, &["protocol", "wireguard"]).unwrap();
    assert_eq!(out, "protocol wireguard, multi-hop off");
}

// ── Errors ───────────────────────────────────────────────────────

#[test]
fn corrupt_settings_file_is_reported() {
    let env = Env::new();
    std::fs::write(env.settings(), "not json").unwrap();

    let args = env.args(None, &["status"]);
    let err = Client::open(&args).err().unwrap();
    assert!(format!("{err:#}").contains("failed to open settings"));
}

#[test]
fn client_exposes_gate() {
    let env = Env::new();
    let args = env.args(None, &["status"]);
    let client = Client::open(&args).unwrap();
    assert_eq!(client.gate().listener_count(), 0);
}

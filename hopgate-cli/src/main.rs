//! hopgate: inspect and toggle multi-hop routing.
//!
//! Usage:
//!   hopgate --account account.json status
//!   hopgate --account account.json enable
//!   hopgate protocol wireguard
//!
//! Nothing here touches the network; the gate only reads the account
//! profile, the tunnel state given on the command line and the settings file.

use anyhow::Result;
use clap::Parser;
use hopgate_cli::{Args, Client};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();
    // RUST_LOG overrides the verbosity flag.
    match EnvFilter::try_from_default_env() {
        Ok(filter) => subscriber.with_env_filter(filter).init(),
        Err(_) => subscriber.init(),
    }

    let client = Client::open(&args)?;
    let output = client.execute(&args.command)?;
    println!("{output}");
    Ok(())
}

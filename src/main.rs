// src/main.rs

//! Entry point. Runs the server by default, or the interactive client with `--connect`.

use anyhow::{Context, Result, bail};
use fwgate::config::Config;
use fwgate::{client, server};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{filter::EnvFilter, prelude::*};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_CONFIG_PATH: &str = "config.toml";
const USAGE: &str = "\
Usage:
  fwgate [--config <path>] [--port <port>]   run the server
  fwgate --connect <host:port>               open an interactive client
  fwgate --version";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("fwgate: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|a| a == "--version") {
        println!("fwgate {VERSION}");
        return Ok(());
    }
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return Ok(());
    }

    if let Some(address) = flag_value(&args, "--connect")? {
        return client::run_interactive(address).await;
    }

    let mut config = match flag_value(&args, "--config")? {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default(DEFAULT_CONFIG_PATH)?,
    };
    if let Some(port) = flag_value(&args, "--port")? {
        config.port = port
            .parse::<u16>()
            .ok()
            .filter(|p| *p != 0)
            .with_context(|| format!("invalid port '{port}'"))?;
    }

    // RUST_LOG, when set, wins over the configured level.
    let filter = match env::var("RUST_LOG") {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) => EnvFilter::new(&config.log_level),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact().with_ansi(true))
        .init();

    info!("fwgate {} starting", VERSION);
    server::run(config).await.inspect_err(|e| error!("Server failed: {:#}", e))
}

/// The value following `flag`, if the flag is present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    let Some(index) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    match args.get(index + 1) {
        Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
        _ => bail!("{flag} requires a value\n{USAGE}"),
    }
}

// src/server/initialization.rs

//! Handles the server initialization process, from state setup to binding the listener.

use super::context::ServerContext;
use crate::config::Config;
use crate::core::state::ServerState;
use anyhow::{Result, anyhow};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Initializes all server components before starting the main loop.
pub async fn setup(config: Config) -> Result<ServerContext> {
    log_startup_info(&config);

    let server_state = ServerState::initialize(config);
    info!("Server state initialized.");

    server_state
        .core
        .lock()
        .await
        .store
        .initialize()
        .await
        .map_err(|e| anyhow!("Failed to initialize store: {}", e))?;

    let listener =
        TcpListener::bind((server_state.config.host.as_str(), server_state.config.port)).await?;
    info!(
        "fwgate server listening on {}:{}",
        server_state.config.host, server_state.config.port
    );

    Ok(ServerContext::new(server_state, listener))
}

/// Logs key configuration parameters at startup.
fn log_startup_info(config: &Config) {
    info!("Store file: {}", config.store_path);
    info!(
        "Firewall interfaces: LAN={} WAN={}, scripts in '{}'.",
        config.firewall.lan_interface, config.firewall.wan_interface, config.firewall.scripts_dir
    );
    if config.host != "127.0.0.1" && config.host != "localhost" {
        warn!(
            "Listening on {} without encryption. Credentials travel in plain text.",
            config.host
        );
    }
}

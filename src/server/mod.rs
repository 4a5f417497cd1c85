// src/server/mod.rs

use crate::config::Config;
use crate::core::state::ServerState;
use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;

mod connection_loop;
mod context;
mod initialization;

pub use context::ServerContext;

/// The main server startup function, orchestrating all setup phases.
pub async fn run(config: Config) -> Result<()> {
    // 1. Initialize server state, the store file and the listener.
    let server_context = initialization::setup(config).await?;

    // 2. Start the main connection acceptance loop. This function will run until shutdown.
    connection_loop::run(server_context).await
}

/// Serves connections from an already bound listener with caller-built state, until
/// SIGINT or SIGTERM. The store must already be initialized.
pub async fn serve(state: Arc<ServerState>, listener: TcpListener) -> Result<()> {
    connection_loop::run(ServerContext::new(state, listener)).await
}

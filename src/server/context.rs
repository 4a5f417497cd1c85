// src/server/context.rs

use crate::core::state::ServerState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{Semaphore, broadcast};

/// Holds all the initialized state required to run the server's main loop.
pub struct ServerContext {
    pub state: Arc<ServerState>,
    pub listener: TcpListener,
    pub shutdown_tx: broadcast::Sender<()>,
    /// Bounds the number of connections served at once.
    pub connection_permits: Arc<Semaphore>,
}

impl ServerContext {
    pub fn new(state: Arc<ServerState>, listener: TcpListener) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let connection_permits = Arc::new(Semaphore::new(state.config.max_clients));
        Self {
            state,
            listener,
            shutdown_tx,
            connection_permits,
        }
    }
}

// src/connection/guard.rs

//! Defines `ConnectionGuard`, an RAII guard for connection resource management.

use crate::core::state::ServerState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Updates the connection counters and logs the close, however the handler exits.
pub struct ConnectionGuard {
    state: Arc<ServerState>,
    connection_id: u64,
    addr: SocketAddr,
}

impl ConnectionGuard {
    pub fn new(state: Arc<ServerState>, connection_id: u64, addr: SocketAddr) -> Self {
        state.stats.connection_opened();
        Self {
            state,
            connection_id,
            addr,
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.state.stats.connection_closed();
        info!(
            "Closed connection {} from {} ({} still connected).",
            self.connection_id,
            self.addr,
            self.state.stats.connected_clients()
        );
    }
}

// src/core/handler/command_router.rs

//! The central component for routing command lines to their handlers.
//!
//! The `Router` takes the server-wide core lock, parses a line into a `Command` against
//! the current session, runs it against the store, session and firewall engine, and turns
//! the outcome into a `Response`. Every path yields a response; nothing is dropped silently.

use crate::core::commands::command_trait::ExecutableCommand;
use crate::core::state::ServerState;
use crate::core::{Command, ErrorKind, FwGateError, Response};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, Span, debug, error, field, info_span, warn};

/// Routes the commands of one connection.
pub struct Router {
    state: Arc<ServerState>,
    connection_id: u64,
    addr: SocketAddr,
}

impl Router {
    pub fn new(state: Arc<ServerState>, connection_id: u64, addr: SocketAddr) -> Self {
        Self {
            state,
            connection_id,
            addr,
        }
    }

    /// Parses, executes and answers one command line.
    pub async fn route(&self, line: &str) -> Response {
        // Instrument the entire command processing flow. The name is filled in once the
        // line parses.
        let span = info_span!(
            "command",
            name = field::Empty,
            client.addr = %self.addr,
            client.id = %self.connection_id,
        );

        async move {
            let start_time = Instant::now();
            let result = self.dispatch(line).await;
            self.state.stats.record_command(result.is_err());
            match &result {
                Ok(_) => debug!("Command succeeded in {:?}", start_time.elapsed()),
                Err(e) => match e.kind() {
                    ErrorKind::ExternalCommand | ErrorKind::CorruptStore | ErrorKind::Internal => {
                        error!("Command failed: {}", e)
                    }
                    ErrorKind::Connection => warn!("Command failed: {}", e),
                    kind => debug!("Command rejected ({:?}): {}", kind, e),
                },
            }
            Response::from(result)
        }
        .instrument(span)
        .await
    }

    async fn dispatch(&self, line: &str) -> Result<String, FwGateError> {
        let mut core = self.state.core.lock().await;
        let command = Command::parse_with_session(line, &core.session)?;
        Span::current().record("name", command.name());
        let mut ctx = core.context();
        command.execute(&mut ctx).await
    }
}

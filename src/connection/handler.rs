// src/connection/handler.rs

//! The per-connection loop: read a command line, route it, write the JSON reply.

use super::guard::ConnectionGuard;
use crate::core::handler::command_router::Router;
use crate::core::protocol::{CommandLineCodec, Response};
use crate::core::state::ServerState;
use crate::core::FwGateError;
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio_util::codec::Framed;
use tracing::{debug, info};

/// Owns one client socket and runs its receive, dispatch and respond loop.
pub struct ConnectionHandler {
    framed: Framed<TcpStream, CommandLineCodec>,
    addr: SocketAddr,
    state: Arc<ServerState>,
    connection_id: u64,
    shutdown_rx: broadcast::Receiver<()>,
}

impl ConnectionHandler {
    pub fn new(
        socket: TcpStream,
        addr: SocketAddr,
        state: Arc<ServerState>,
        connection_id: u64,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Self {
        let codec = CommandLineCodec::new(state.config.max_command_length);
        Self {
            framed: Framed::new(socket, codec),
            addr,
            state,
            connection_id,
            shutdown_rx,
        }
    }

    /// Serves commands until the peer disconnects, a connection-level error occurs, or
    /// the server shuts down. The server never closes a healthy connection on its own.
    pub async fn run(&mut self) -> Result<(), FwGateError> {
        let _guard = ConnectionGuard::new(self.state.clone(), self.connection_id, self.addr);
        let router = Router::new(self.state.clone(), self.connection_id, self.addr);

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown_rx.recv() => {
                    info!("Connection handler for {} received shutdown signal.", self.addr);
                    break;
                }
                result = self.framed.next() => {
                    match result {
                        Some(Ok(line)) => {
                            debug!("Connection {}: Received command: {}", self.connection_id, redact(&line));
                            let response = router.route(&line).await;
                            debug!("Connection {}: Sending response: {:?}", self.connection_id, response);
                            self.framed.send(response).await?;
                        }
                        Some(Err(e)) => {
                            if is_normal_disconnect(&e) {
                                debug!("Peer {} went away: {}", self.addr, e);
                                break;
                            }
                            // Tell the client why before hanging up; it may already be gone.
                            // The caller logs the error.
                            let _ = self.framed.send(Response::error(e.to_string())).await;
                            return Err(e);
                        }
                        None => {
                            debug!("Peer {} closed the connection.", self.addr);
                            break;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Hides the password token of `user create` and `user login` in logs.
fn redact(line: &str) -> String {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["user", "create" | "login", .., _] if tokens.len() >= 4 => {
            let mut shown = tokens[..tokens.len() - 1].join(" ");
            shown.push_str(" ****");
            shown
        }
        _ => line.to_string(),
    }
}

/// Errors that just mean the peer went away.
fn is_normal_disconnect(e: &FwGateError) -> bool {
    matches!(e, FwGateError::Io(io_err) if matches!(
        io_err.kind(),
        std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::BrokenPipe
            | std::io::ErrorKind::UnexpectedEof
            | std::io::ErrorKind::ConnectionAborted
    ))
}

// src/server/connection_loop.rs

//! Accepts connections until a termination signal arrives, then drains the open ones.

use super::context::ServerContext;
use crate::connection::ConnectionHandler;
use crate::core::protocol::Response;
use anyhow::{Context, Result};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::signal::unix::{SignalKind, signal};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// How long open connections get to finish once shutdown starts.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Runs until SIGINT or SIGTERM. Each accepted connection gets its own task and a
/// sequential id used in logs and spans.
pub async fn run(ctx: ServerContext) -> Result<()> {
    let mut next_connection_id: u64 = 0;
    let mut connections = JoinSet::new();

    let mut sigint = signal(SignalKind::interrupt()).context("Failed to register SIGINT handler")?;
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to register SIGTERM handler")?;

    loop {
        tokio::select! {
            biased;

            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down.");
                break;
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down.");
                break;
            }

            res = ctx.listener.accept() => {
                match res {
                    Ok((mut socket, addr)) => {
                        let Ok(permit) = ctx.connection_permits.clone().try_acquire_owned() else {
                            ctx.state.stats.connection_rejected();
                            warn!("Turning away {}: {} clients already connected.", addr, ctx.state.config.max_clients);
                            if let Ok(mut body) = serde_json::to_vec(&Response::error("limite de conexões atingido")) {
                                body.push(b'\n');
                                let _ = socket.write_all(&body).await;
                            }
                            continue;
                        };

                        next_connection_id = next_connection_id.wrapping_add(1);
                        info!("Connection {} opened from {}", next_connection_id, addr);
                        let mut handler = ConnectionHandler::new(
                            socket,
                            addr,
                            ctx.state.clone(),
                            next_connection_id,
                            ctx.shutdown_tx.subscribe(),
                        );

                        let connection_id = next_connection_id;
                        connections.spawn(async move {
                            // Released when the task ends, freeing a client slot.
                            let _permit = permit;
                            if let Err(e) = handler.run().await {
                                warn!("Dropping connection {} from {}: {}", connection_id, addr, e);
                            }
                        });
                    }
                    Err(e) => error!("accept() failed: {}", e),
                }
            },

            Some(res) = connections.join_next() => {
                if let Err(e) = res
                    && e.is_panic()
                {
                    error!("Connection task panicked: {e:?}");
                }
            },
        }
    }

    // No receivers just means no connection is open.
    let _ = ctx.shutdown_tx.send(());

    let drained = tokio::time::timeout(SHUTDOWN_GRACE, async {
        while connections.join_next().await.is_some() {}
    })
    .await;
    if drained.is_err() {
        warn!(
            "{} connection(s) still open after {:?}, aborting them.",
            connections.len(),
            SHUTDOWN_GRACE
        );
        connections.shutdown().await;
    }

    let stats = ctx.state.stats.snapshot();
    info!(
        "Server stopped. Connections: {} accepted, {} rejected. Commands: {} run, {} failed.",
        stats.accepted, stats.rejected, stats.commands, stats.failed_commands
    );
    Ok(())
}

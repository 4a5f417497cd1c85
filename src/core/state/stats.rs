// src/core/state/stats.rs

//! Process-wide counters for connections and commands, reported in the logs.

use std::sync::atomic::{AtomicU64, Ordering};

/// A point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub accepted: u64,
    pub rejected: u64,
    pub connected: u64,
    pub commands: u64,
    pub failed_commands: u64,
}

#[derive(Debug, Default)]
pub struct StatsState {
    accepted: AtomicU64,
    /// Connections turned away because `max_clients` was reached.
    rejected: AtomicU64,
    connected: AtomicU64,
    commands: AtomicU64,
    failed_commands: AtomicU64,
}

impl StatsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
        self.connected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.connected.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn connection_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connected_clients(&self) -> u64 {
        self.connected.load(Ordering::Relaxed)
    }

    /// Counts one executed command line and whether it ended in an error response.
    pub fn record_command(&self, failed: bool) {
        self.commands.fetch_add(1, Ordering::Relaxed);
        if failed {
            self.failed_commands.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            connected: self.connected.load(Ordering::Relaxed),
            commands: self.commands.load(Ordering::Relaxed),
            failed_commands: self.failed_commands.load(Ordering::Relaxed),
        }
    }
}

// src/core/state/core.rs

//! Defines the central `ServerState` struct, holding all shared server-wide state.

use super::stats::StatsState;
use crate::config::Config;
use crate::core::firewall::{
    ExternalCommandRunner, FirewallEngine, NetworkInterfaces, ShellScriptRunner,
};
use crate::core::session::Session;
use crate::core::store::JsonStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The mutable state every command works on: the store, the login slot and the
/// firewall engine. They sit behind one lock so a command's checks and writes are
/// never interleaved with another connection's.
#[derive(Debug)]
pub struct CoreState {
    pub store: JsonStore,
    pub session: Session,
    pub firewall: FirewallEngine,
}

impl CoreState {
    /// Borrows the pieces of the core state a command executes against.
    pub fn context(&mut self) -> ExecutionContext<'_> {
        ExecutionContext {
            store: &self.store,
            session: &mut self.session,
            firewall: &mut self.firewall,
        }
    }
}

/// What a command gets to touch while it runs. Only constructed while the core lock is held.
pub struct ExecutionContext<'a> {
    pub store: &'a JsonStore,
    pub session: &'a mut Session,
    pub firewall: &'a mut FirewallEngine,
}

/// The central struct holding all shared, server-wide state.
/// Wrapped in an `Arc` and handed to every connection handler.
#[derive(Debug)]
pub struct ServerState {
    /// The configuration the server was started with.
    pub config: Config,
    /// Store, session and firewall, guarded by the server-wide exclusive lock.
    pub core: Mutex<CoreState>,
    pub stats: StatsState,
}

impl ServerState {
    /// Builds the state with the shell-script firewall runner from the configuration.
    pub fn initialize(config: Config) -> Arc<Self> {
        let runner = Arc::new(ShellScriptRunner::new(config.firewall.clone()));
        Self::with_runner(config, runner)
    }

    /// Builds the state around a caller-supplied runner.
    pub fn with_runner(config: Config, runner: Arc<dyn ExternalCommandRunner>) -> Arc<Self> {
        let interfaces = NetworkInterfaces {
            lan: config.firewall.lan_interface.clone(),
            wan: config.firewall.wan_interface.clone(),
        };
        let core = CoreState {
            store: JsonStore::new(&config.store_path),
            session: Session::new(),
            firewall: FirewallEngine::new(runner, interfaces),
        };
        Arc::new(Self {
            config,
            core: Mutex::new(core),
            stats: StatsState::new(),
        })
    }
}

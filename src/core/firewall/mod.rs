// src/core/firewall/mod.rs

//! Applies stored rules to the host packet filter through external scripts.

pub mod engine;
pub mod runner;

pub use engine::{FirewallEngine, FirewallState, NetworkInterfaces, ScriptStep};
pub use runner::{ExternalCommandRunner, FirewallScript, ShellScriptRunner};

// src/core/state/mod.rs

//! Defines the central `ServerState` struct and all related state components.

mod core;
mod stats;

pub use core::{CoreState, ExecutionContext, ServerState};
pub use stats::{StatsSnapshot, StatsState};

// src/core/mod.rs

//! The central module containing the core logic and data structures of fwgate.

pub mod commands;
pub mod errors;
pub mod firewall;
pub mod handler;
pub mod model;
pub mod protocol;
pub mod session;
pub mod state;
pub mod store;

pub use commands::Command;
pub use errors::{ErrorKind, FwGateError};
pub use protocol::{Response, ResponseCode};

// src/connection/mod.rs

//! Manages the lifecycle of a single client TCP connection: framing, command routing
//! and response delivery.

mod guard;
mod handler;

pub use guard::ConnectionGuard;
pub use handler::ConnectionHandler;

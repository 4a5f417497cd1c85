// src/core/protocol/mod.rs

pub mod command_codec;
pub mod response;
pub use command_codec::CommandLineCodec;
pub use response::{Response, ResponseCode};

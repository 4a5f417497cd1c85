// src/core/commands/command_trait.rs

//! Defines the core traits for all executable commands.

use crate::core::FwGateError;
use crate::core::state::ExecutionContext;
use async_trait::async_trait;

/// A trait for parsing a command's arguments, i.e. the tokens after the command name.
pub trait ParseCommand: Sized {
    fn parse(args: &[&str]) -> Result<Self, FwGateError>;
}

/// A trait for the actual execution logic of a command. On success the returned string
/// becomes the `message` of an OK response.
#[async_trait]
pub trait ExecutableCommand {
    async fn execute<'a>(&self, ctx: &mut ExecutionContext<'a>) -> Result<String, FwGateError>;
}

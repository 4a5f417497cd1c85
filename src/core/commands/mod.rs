// src/core/commands/mod.rs

//! Parses command lines into the `Command` enum and dispatches their execution.
//!
//! The first whitespace-separated token selects the command by exact match; each command
//! then looks its sub-action up in its own table. `rule` and `firewall` only ever act for
//! the logged-in user, so the session is checked before their arguments are.

pub mod command_trait;
pub mod firewall;
pub mod helpers;
pub mod rule;
pub mod user;

use self::command_trait::{ExecutableCommand, ParseCommand};
use crate::core::FwGateError;
use crate::core::session::Session;
use crate::core::state::ExecutionContext;
use async_trait::async_trait;

pub use firewall::FirewallCommand;
pub use rule::RuleCommand;
pub use user::UserCommand;

/// Every command the server understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    User(UserCommand),
    Rule(RuleCommand),
    Firewall(FirewallCommand),
}

/// Commands whose every sub-action needs a logged-in user.
const SESSION_COMMANDS: &[&str] = &["rule", "firewall"];

impl Command {
    /// Parses `line` as it would run under `session`.
    pub fn parse_with_session(line: &str, session: &Session) -> Result<Self, FwGateError> {
        if let Some(name) = line.split_whitespace().next()
            && SESSION_COMMANDS.contains(&name)
        {
            session.require()?;
        }
        Command::try_from(line)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::User(_) => "user",
            Command::Rule(_) => "rule",
            Command::Firewall(_) => "firewall",
        }
    }
}

impl TryFrom<&str> for Command {
    type Error = FwGateError;

    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((name, args)) = tokens.split_first() else {
            return Err(FwGateError::InvalidCommand);
        };

        match *name {
            "user" => Ok(Command::User(UserCommand::parse(args)?)),
            "rule" => Ok(Command::Rule(RuleCommand::parse(args)?)),
            "firewall" => Ok(Command::Firewall(FirewallCommand::parse(args)?)),
            _ => Err(FwGateError::InvalidCommand),
        }
    }
}

#[async_trait]
impl ExecutableCommand for Command {
    async fn execute<'a>(&self, ctx: &mut ExecutionContext<'a>) -> Result<String, FwGateError> {
        match self {
            Command::User(cmd) => cmd.execute(ctx).await,
            Command::Rule(cmd) => cmd.execute(ctx).await,
            Command::Firewall(cmd) => cmd.execute(ctx).await,
        }
    }
}

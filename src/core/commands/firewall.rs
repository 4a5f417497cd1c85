// src/core/commands/firewall.rs

//! The `firewall` command: applies or clears the logged-in user's rules.

use super::command_trait::{ExecutableCommand, ParseCommand};
use super::helpers::{expect_args, split_action, unknown_action};
use crate::core::FwGateError;
use crate::core::state::ExecutionContext;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirewallCommand {
    Start,
    Stop,
}

impl ParseCommand for FirewallCommand {
    fn parse(args: &[&str]) -> Result<Self, FwGateError> {
        let (action, rest) = split_action("firewall", args)?;
        match action {
            "start" => {
                expect_args("firewall start", rest, 0)?;
                Ok(FirewallCommand::Start)
            }
            "stop" => {
                expect_args("firewall stop", rest, 0)?;
                Ok(FirewallCommand::Stop)
            }
            other => Err(unknown_action("firewall", other)),
        }
    }
}

#[async_trait]
impl ExecutableCommand for FirewallCommand {
    async fn execute<'a>(&self, ctx: &mut ExecutionContext<'a>) -> Result<String, FwGateError> {
        let owner = ctx.session.require()?.clone();

        match self {
            FirewallCommand::Start => {
                let doc = ctx.store.load().await?;
                let rules = doc.rules_owned_by(&owner.user_id);
                ctx.firewall.start(&rules).await?;
                Ok(format!("firewall iniciado com {} regra(s)", rules.len()))
            }
            FirewallCommand::Stop => {
                ctx.firewall.stop().await?;
                Ok("firewall parado".to_string())
            }
        }
    }
}

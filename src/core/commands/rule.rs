// src/core/commands/rule.rs

//! The `rule` command. Every sub-action needs a logged-in user and only ever sees the
//! rules that user owns.

use super::command_trait::{ExecutableCommand, ParseCommand};
use super::helpers::{expect_all, expect_args, format_rules, split_action, unknown_action};
use crate::core::FwGateError;
use crate::core::model::{Rule, RuleAction};
use crate::core::state::ExecutionContext;
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleCommand {
    /// `rule add <ip> <ACCEPT|DENY>`
    Add { ip: String, action: RuleAction },
    /// `rule list all`
    List,
    /// `rule remove <ip-or-id>`
    Remove { target: String },
}

impl ParseCommand for RuleCommand {
    fn parse(args: &[&str]) -> Result<Self, FwGateError> {
        let (action, rest) = split_action("rule", args)?;
        match action {
            "add" => {
                expect_args("rule add", rest, 2)?;
                Ok(RuleCommand::Add {
                    ip: rest[0].to_string(),
                    action: rest[1].parse()?,
                })
            }
            "list" => {
                expect_all("rule list", rest)?;
                Ok(RuleCommand::List)
            }
            "remove" => {
                expect_args("rule remove", rest, 1)?;
                Ok(RuleCommand::Remove {
                    target: rest[0].to_string(),
                })
            }
            other => Err(unknown_action("rule", other)),
        }
    }
}

#[async_trait]
impl ExecutableCommand for RuleCommand {
    async fn execute<'a>(&self, ctx: &mut ExecutionContext<'a>) -> Result<String, FwGateError> {
        let owner = ctx.session.require()?.clone();

        match self {
            RuleCommand::Add { ip, action } => {
                let rule = ctx
                    .store
                    .update(|doc| {
                        if doc
                            .rules_owned_by(&owner.user_id)
                            .iter()
                            .any(|r| r.ip_address == *ip)
                        {
                            return Err(FwGateError::DuplicateRule(ip.clone()));
                        }
                        let rule = Rule::create(&owner.user_id, ip, action.as_str())?;
                        doc.insert_rule(&rule);
                        Ok(rule)
                    })
                    .await?;
                info!(
                    "User {} added rule {} ({} {})",
                    owner.user_id, rule.id, rule.ip_address, rule.action
                );
                Ok(format!(
                    "regra {} criada: {} {}",
                    rule.id, rule.ip_address, rule.action
                ))
            }
            RuleCommand::List => {
                let doc = ctx.store.load().await?;
                let rules = doc.rules_owned_by(&owner.user_id);
                if rules.is_empty() {
                    return Err(FwGateError::NoRules);
                }
                Ok(format_rules(&rules))
            }
            RuleCommand::Remove { target } => {
                let rule = ctx
                    .store
                    .update(|doc| {
                        let rule = doc
                            .find_owned_rule(&owner.user_id, target)
                            .ok_or(FwGateError::RuleNotFound)?;
                        doc.remove_rule(&rule.id);
                        Ok(rule)
                    })
                    .await?;
                info!("User {} removed rule {}", owner.user_id, rule.id);
                Ok(format!("regra {} ({}) removida", rule.id, rule.ip_address))
            }
        }
    }
}

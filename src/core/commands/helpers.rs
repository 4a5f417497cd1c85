// src/core/commands/helpers.rs

use crate::core::FwGateError;
use crate::core::model::{Rule, User};

/// Splits `args` into the sub-action and its arguments.
pub fn split_action<'a, 'b>(
    command: &str,
    args: &'a [&'b str],
) -> Result<(&'b str, &'a [&'b str]), FwGateError> {
    match args.split_first() {
        Some((action, rest)) => Ok((*action, rest)),
        None => Err(FwGateError::WrongArgumentCount(command.to_string())),
    }
}

/// Checks the argument count of a sub-action.
pub fn expect_args(command: &str, args: &[&str], count: usize) -> Result<(), FwGateError> {
    if args.len() != count {
        return Err(FwGateError::WrongArgumentCount(command.to_string()));
    }
    Ok(())
}

/// Accepts exactly the literal `all`, as in `user list all`.
pub fn expect_all(command: &str, args: &[&str]) -> Result<(), FwGateError> {
    expect_args(command, args, 1)?;
    if args[0] != "all" {
        return Err(FwGateError::Syntax(format!("uso: {command} all")));
    }
    Ok(())
}

pub fn unknown_action(command: &str, action: &str) -> FwGateError {
    FwGateError::UnknownSubcommand {
        command: command.to_string(),
        action: action.to_string(),
    }
}

/// One line per user: `id | name | email`.
pub fn format_users<'a>(users: impl IntoIterator<Item = &'a User>) -> String {
    users
        .into_iter()
        .map(|u| format!("{} | {} | {}", u.id, u.name, u.email))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per rule: `id | address | action`.
pub fn format_rules<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> String {
    rules
        .into_iter()
        .map(|r| format!("{} | {} | {}", r.id, r.ip_address, r.action))
        .collect::<Vec<_>>()
        .join("\n")
}

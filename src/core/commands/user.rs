// src/core/commands/user.rs

//! The `user` command: account creation, listing, removal, login and logout.

use super::command_trait::{ExecutableCommand, ParseCommand};
use super::helpers::{expect_all, expect_args, format_users, split_action, unknown_action};
use crate::core::FwGateError;
use crate::core::model::User;
use crate::core::state::ExecutionContext;
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// `user create <name...> <email> <password>`
    Create {
        name: String,
        email: String,
        password: String,
    },
    /// `user list all`
    List,
    /// `user remove <email-or-id>`
    Remove { target: String },
    /// `user login <email> <password>`
    Login { email: String, password: String },
    /// `user logout`
    Logout,
}

impl ParseCommand for UserCommand {
    fn parse(args: &[&str]) -> Result<Self, FwGateError> {
        let (action, rest) = split_action("user", args)?;
        match action {
            "create" => {
                // The name may contain spaces; email and password are the last two tokens.
                if rest.len() < 3 {
                    return Err(FwGateError::WrongArgumentCount("user create".to_string()));
                }
                let (name_parts, credentials) = rest.split_at(rest.len() - 2);
                Ok(UserCommand::Create {
                    name: name_parts.join(" "),
                    email: credentials[0].to_string(),
                    password: credentials[1].to_string(),
                })
            }
            "list" => {
                expect_all("user list", rest)?;
                Ok(UserCommand::List)
            }
            "remove" => {
                expect_args("user remove", rest, 1)?;
                Ok(UserCommand::Remove {
                    target: rest[0].to_string(),
                })
            }
            "login" => {
                expect_args("user login", rest, 2)?;
                Ok(UserCommand::Login {
                    email: rest[0].to_string(),
                    password: rest[1].to_string(),
                })
            }
            "logout" => {
                expect_args("user logout", rest, 0)?;
                Ok(UserCommand::Logout)
            }
            other => Err(unknown_action("user", other)),
        }
    }
}

#[async_trait]
impl ExecutableCommand for UserCommand {
    async fn execute<'a>(&self, ctx: &mut ExecutionContext<'a>) -> Result<String, FwGateError> {
        match self {
            UserCommand::Create {
                name,
                email,
                password,
            } => {
                let user = ctx
                    .store
                    .update(|doc| {
                        if doc.find_user_by_email(email).is_some() {
                            return Err(FwGateError::EmailAlreadyRegistered(email.clone()));
                        }
                        let user = User::create(name, email, password)?;
                        doc.insert_user(&user);
                        Ok(user)
                    })
                    .await?;
                info!("Created user {} <{}>", user.id, user.email);
                Ok(format!("usuário '{}' criado com id {}", user.name, user.id))
            }
            UserCommand::List => {
                let doc = ctx.store.load().await?;
                let users: Vec<User> = doc.users().collect();
                if users.is_empty() {
                    return Err(FwGateError::NoUsers);
                }
                Ok(format_users(&users))
            }
            UserCommand::Remove { target } => {
                let session = &*ctx.session;
                let (user, rules_removed) = ctx
                    .store
                    .update(|doc| {
                        let user = doc.find_user(target).ok_or(FwGateError::UserNotFound)?;
                        if session.is_current(&user.id) {
                            return Err(FwGateError::RemovingLoggedInUser);
                        }
                        let rules_removed = doc.remove_user(&user.id);
                        Ok((user, rules_removed))
                    })
                    .await?;
                info!(
                    "Removed user {} <{}> and {} rule(s)",
                    user.id, user.email, rules_removed
                );
                Ok(format!("usuário '{}' removido", user.name))
            }
            UserCommand::Login { email, password } => {
                if ctx.session.current().is_some() {
                    return Err(FwGateError::AlreadyLoggedIn);
                }
                let doc = ctx.store.load().await?;
                let user = doc
                    .users()
                    .find(|u| u.email == *email && u.verify_password(password))
                    .ok_or(FwGateError::InvalidCredentials)?;
                ctx.session.login(&user)?;
                info!("User {} <{}> logged in", user.id, user.email);
                Ok(format!("bem-vindo, {}", user.name))
            }
            UserCommand::Logout => {
                let identity = ctx.session.logout()?;
                info!("User {} <{}> logged out", identity.user_id, identity.email);
                Ok(format!("até logo, {}", identity.name))
            }
        }
    }
}

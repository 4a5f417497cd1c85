// src/core/model/mod.rs

//! The domain records managed by the server: user accounts and their filtering rules.

pub mod rule;
pub mod user;

pub use rule::{Rule, RuleAction};
pub use user::User;

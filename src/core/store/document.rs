// src/core/store/document.rs

//! The in-memory shape of the store file and the lookups command handlers run against it.

use crate::core::model::{Rule, RuleAction, User};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A user as persisted under `users.<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub name: String,
    pub email: String,
    /// The password hash, never the plaintext.
    pub password: String,
}

/// A rule as persisted under `rules.<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRule {
    pub user_id: String,
    pub ip: String,
    pub action: RuleAction,
}

/// The whole persistent state. Both tables are required when deserializing; insertion
/// order is preserved so listings stay stable across restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    pub users: IndexMap<String, StoredUser>,
    pub rules: IndexMap<String, StoredRule>,
}

impl StoreDocument {
    pub fn users(&self) -> impl Iterator<Item = User> + '_ {
        self.users
            .iter()
            .map(|(id, stored)| User::from_stored(id, stored))
    }

    pub fn rules(&self) -> impl Iterator<Item = Rule> + '_ {
        self.rules
            .iter()
            .map(|(id, stored)| Rule::from_stored(id, stored))
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.users().find(|u| u.email == email)
    }

    /// Finds a user by id or by email.
    pub fn find_user(&self, target: &str) -> Option<User> {
        self.users().find(|u| u.id == target || u.email == target)
    }

    pub fn insert_user(&mut self, user: &User) {
        self.users.insert(user.id.clone(), user.to_stored());
    }

    /// Removes a user together with every rule it owns. Returns the number of rules removed.
    pub fn remove_user(&mut self, user_id: &str) -> usize {
        self.users.shift_remove(user_id);
        let before = self.rules.len();
        self.rules.retain(|_, rule| rule.user_id != user_id);
        before - self.rules.len()
    }

    /// All rules owned by `owner_user_id`, in insertion order.
    pub fn rules_owned_by(&self, owner_user_id: &str) -> Vec<Rule> {
        self.rules()
            .filter(|r| r.owner_user_id == owner_user_id)
            .collect()
    }

    /// Finds a rule by id or address, looking only at rules owned by `owner_user_id`.
    pub fn find_owned_rule(&self, owner_user_id: &str, target: &str) -> Option<Rule> {
        self.rules()
            .find(|r| r.owner_user_id == owner_user_id && r.matches(target))
    }

    pub fn insert_rule(&mut self, rule: &Rule) {
        self.rules.insert(rule.id.clone(), rule.to_stored());
    }

    pub fn remove_rule(&mut self, rule_id: &str) -> Option<StoredRule> {
        self.rules.shift_remove(rule_id)
    }
}

// src/core/model/rule.rs

use crate::core::FwGateError;
use crate::core::store::StoredRule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// What to do with traffic from a rule's address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleAction {
    Accept,
    Deny,
}

impl RuleAction {
    /// The packet-filter target this action translates to.
    pub fn verdict(self) -> &'static str {
        match self {
            RuleAction::Accept => "ACCEPT",
            RuleAction::Deny => "DROP",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleAction::Accept => "ACCEPT",
            RuleAction::Deny => "DENY",
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleAction {
    type Err = FwGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACCEPT" => Ok(RuleAction::Accept),
            "DENY" => Ok(RuleAction::Deny),
            other => Err(FwGateError::InvalidAction(other.to_string())),
        }
    }
}

/// A filtering rule for one address, owned by the user who created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub id: String,
    pub owner_user_id: String,
    pub ip_address: String,
    pub action: RuleAction,
}

impl Rule {
    /// Validates `action` and builds a rule with a fresh id.
    pub fn create(owner_user_id: &str, ip_address: &str, action: &str) -> Result<Self, FwGateError> {
        let action = action.parse::<RuleAction>()?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            owner_user_id: owner_user_id.to_string(),
            ip_address: ip_address.to_string(),
            action,
        })
    }

    pub fn from_stored(id: &str, stored: &StoredRule) -> Self {
        Self {
            id: id.to_string(),
            owner_user_id: stored.user_id.clone(),
            ip_address: stored.ip.clone(),
            action: stored.action,
        }
    }

    pub fn to_stored(&self) -> StoredRule {
        StoredRule {
            user_id: self.owner_user_id.clone(),
            ip: self.ip_address.clone(),
            action: self.action,
        }
    }

    /// True if `target` names this rule by id or by address.
    pub fn matches(&self, target: &str) -> bool {
        self.id == target || self.ip_address == target
    }
}

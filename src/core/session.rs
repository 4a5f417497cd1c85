// src/core/session.rs

//! Defines the server-wide login slot.
//!
//! There is one `Session` per server process, not per connection: a login made on one
//! connection is seen by every other connection until someone logs out. It lives inside
//! the server's core lock and is handed to each command through its execution context.

use crate::core::FwGateError;
use crate::core::model::User;

/// The identity of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for SessionIdentity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    current: Option<SessionIdentity>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&SessionIdentity> {
        self.current.as_ref()
    }

    /// True if `user_id` is the logged-in user.
    pub fn is_current(&self, user_id: &str) -> bool {
        self.current.as_ref().is_some_and(|s| s.user_id == user_id)
    }

    /// Returns the identity or `LoginRequired` if nobody is logged in.
    pub fn require(&self) -> Result<&SessionIdentity, FwGateError> {
        self.current.as_ref().ok_or(FwGateError::LoginRequired)
    }

    pub fn login(&mut self, user: &User) -> Result<&SessionIdentity, FwGateError> {
        if self.current.is_some() {
            return Err(FwGateError::AlreadyLoggedIn);
        }
        Ok(self.current.insert(SessionIdentity::from(user)))
    }

    pub fn logout(&mut self) -> Result<SessionIdentity, FwGateError> {
        self.current.take().ok_or(FwGateError::NotLoggedIn)
    }
}

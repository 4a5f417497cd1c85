// src/core/model/user.rs

use crate::core::FwGateError;
use crate::core::store::StoredUser;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use uuid::Uuid;

/// A user account able to log in and own filtering rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Generated at creation and never changed.
    pub id: String,
    pub name: String,
    /// Unique across all users.
    pub email: String,
    /// The Argon2 password hash in PHC string format.
    pub password_hash: String,
}

impl User {
    /// Builds a new user with a fresh id and a salted hash of `password`.
    ///
    /// Email uniqueness is the caller's concern.
    pub fn create(name: &str, email: &str, password: &str) -> Result<Self, FwGateError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| FwGateError::Internal("Password hashing failed".to_string()))?
            .to_string();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        })
    }

    /// Checks `candidate` against the stored hash. A hash that cannot be parsed never matches.
    pub fn verify_password(&self, candidate: &str) -> bool {
        match PasswordHash::new(&self.password_hash) {
            Ok(parsed_hash) => Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Rebuilds a user from its persisted form.
    pub fn from_stored(id: &str, stored: &StoredUser) -> Self {
        Self {
            id: id.to_string(),
            name: stored.name.clone(),
            email: stored.email.clone(),
            password_hash: stored.password.clone(),
        }
    }

    pub fn to_stored(&self) -> StoredUser {
        StoredUser {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password_hash.clone(),
        }
    }
}

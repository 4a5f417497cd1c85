// src/core/store/mod.rs

//! Persistence of users and rules as a single JSON document on disk.

pub mod document;
pub mod json_store;

pub use document::{StoreDocument, StoredRule, StoredUser};
pub use json_store::JsonStore;

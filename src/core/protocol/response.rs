// src/core/protocol/response.rs

//! Defines the JSON response object sent back to the client for every command.

use crate::core::FwGateError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The status carried in the `code` field of a response.
///
/// On the wire the code is the integer rendered as a string (`"0"`, `"1"`, `"2"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Ok = 0,
    Error = 1,
    /// Only produced locally by the client (`exit`); the server never sends it.
    Stop = 2,
}

impl ResponseCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Ok),
            1 => Some(Self::Error),
            2 => Some(Self::Stop),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl Serialize for ResponseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ResponseCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<u8>()
            .ok()
            .and_then(ResponseCode::from_u8)
            .ok_or_else(|| de::Error::custom(format!("unknown response code '{raw}'")))
    }
}

/// A `{"code": ..., "message": ...}` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub code: ResponseCode,
    pub message: String,
}

impl Response {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            code: ResponseCode::Ok,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: ResponseCode::Error,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == ResponseCode::Ok
    }
}

impl From<Result<String, FwGateError>> for Response {
    fn from(result: Result<String, FwGateError>) -> Self {
        match result {
            Ok(message) => Response::ok(message),
            Err(e) => Response::error(e.to_string()),
        }
    }
}

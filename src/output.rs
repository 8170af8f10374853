//! Output Module
//!
//! Presentation boundary: every CLI result, success or failure, is rendered
//! as one JSON envelope. This is the only place a null value is turned into
//! the `(nil)` display sentinel.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ErrorReport, KvError};
use crate::protocol::NIL;

/// Top-level JSON document printed by the CLI
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub ok: bool,
    pub command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(command: &'static str, data: T) -> Self {
        Self {
            ok: true,
            command,
            data: Some(data),
            error: None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Envelope<()> {
    pub fn failure(command: &'static str, error: &KvError) -> Self {
        Self {
            ok: false,
            command,
            data: None,
            error: Some(error.report()),
        }
    }
}

/// A single looked-up value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueView {
    pub key: String,
    /// `null` when the key does not exist
    pub value: Option<String>,
    #[serde(rename = "type")]
    pub value_type: &'static str,
    /// Human-readable form; `(nil)` for a missing key
    pub display: String,
}

impl ValueView {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        let (value_type, display) = match &value {
            Some(v) => ("string", v.clone()),
            None => ("none", NIL.to_string()),
        };
        Self {
            key: key.into(),
            value,
            value_type,
            display,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetView {
    pub key: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelView {
    pub keys: Vec<String>,
    pub deleted: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PingView {
    pub reply: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoView {
    pub fields: BTreeMap<String, String>,
}

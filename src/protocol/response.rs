//! Response definitions
//!
//! One decoded reply value. Arrays nest arbitrarily (bounded by the
//! decoder's depth limit).

use std::fmt;

use bytes::Bytes;

use crate::error::{KvError, Result};

/// Display sentinel for null replies
pub const NIL: &str = "(nil)";

/// A decoded reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `+` short status text
    Simple(String),

    /// `-` server-reported failure; a valid reply, not a decode failure
    Error(String),

    /// `:` signed 64-bit integer
    Integer(i64),

    /// `$` binary-safe string, `None` for `$-1`
    Bulk(Option<Bytes>),

    /// `*` sequence of replies, `None` for `*-1`
    Array(Option<Vec<Response>>),
}

impl Response {
    /// Caller-visible type name; both null forms report "none"
    pub fn type_name(&self) -> &'static str {
        match self {
            Response::Simple(_) => "string",
            Response::Error(_) => "error",
            Response::Integer(_) => "integer",
            Response::Bulk(Some(_)) => "bulk",
            Response::Array(Some(_)) => "array",
            Response::Bulk(None) | Response::Array(None) => "none",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Response::Bulk(None) | Response::Array(None))
    }

    /// Turn an `Error` reply into `KvError::Server`, pass anything else through
    pub fn into_result(self) -> Result<Response> {
        match self {
            Response::Error(message) => Err(KvError::Server(message)),
            other => Ok(other),
        }
    }

    /// Flatten into one printable string.
    ///
    /// Returns `None` for a top-level null. Array elements are flattened
    /// recursively and joined with `\n`; nested nulls become empty lines.
    pub fn into_text(self) -> Result<Option<String>> {
        match self {
            Response::Error(message) => Err(KvError::Server(message)),
            Response::Simple(text) => Ok(Some(text)),
            Response::Integer(n) => Ok(Some(n.to_string())),
            Response::Bulk(Some(bytes)) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Response::Array(Some(items)) => {
                let mut lines = Vec::with_capacity(items.len());
                for item in items {
                    lines.push(item.into_text()?.unwrap_or_default());
                }
                Ok(Some(lines.join("\n")))
            }
            Response::Bulk(None) | Response::Array(None) => Ok(None),
        }
    }

    /// Project an array of scalar replies into strings.
    ///
    /// A null array is an empty list. Nested arrays and null elements are
    /// rejected rather than guessed at.
    pub fn into_string_list(self) -> Result<Vec<String>> {
        match self.into_result()? {
            Response::Array(None) => Ok(Vec::new()),
            Response::Array(Some(items)) => items
                .into_iter()
                .map(|item| match item.into_result()? {
                    Response::Simple(text) => Ok(text),
                    Response::Integer(n) => Ok(n.to_string()),
                    Response::Bulk(Some(bytes)) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
                    other => Err(KvError::UnexpectedReply {
                        expected: "string element",
                        actual: other.type_name(),
                    }),
                })
                .collect(),
            other => Err(KvError::UnexpectedReply {
                expected: "array",
                actual: other.type_name(),
            }),
        }
    }

    /// Expect an integer reply
    pub fn into_integer(self) -> Result<i64> {
        match self.into_result()? {
            Response::Integer(n) => Ok(n),
            other => Err(KvError::UnexpectedReply {
                expected: "integer",
                actual: other.type_name(),
            }),
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Simple(text) => f.write_str(text),
            Response::Error(message) => write!(f, "(error) {}", message),
            Response::Integer(n) => write!(f, "(integer) {}", n),
            Response::Bulk(Some(bytes)) => f.write_str(&String::from_utf8_lossy(bytes)),
            Response::Bulk(None) | Response::Array(None) => f.write_str(NIL),
            Response::Array(Some(items)) if items.is_empty() => f.write_str("(empty array)"),
            Response::Array(Some(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{}) {}", i + 1, item)?;
                }
                Ok(())
            }
        }
    }
}

//! Client Module
//!
//! Caller-facing command helpers on top of a `Connection`.
//!
//! ## Projections
//! Every helper issues one command through the same decode routine and
//! then projects the reply:
//! - text: one flattened string, array elements joined with `\n`
//! - list: an array of scalar replies as `Vec<String>`
//! - integer: a single count

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::network::Connection;
use crate::protocol::{Command, Response};

/// Default cap on the number of keys returned by `keys`
pub const DEFAULT_KEYS_LIMIT: usize = 100;

/// Result of a `keys` listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyListing {
    pub pattern: String,
    pub keys: Vec<String>,
    /// Number of matches before the limit was applied
    pub total: usize,
    pub truncated: bool,
}

/// A single-session client
///
/// Owns its connection; dropping the client closes it.
pub struct Client {
    conn: Connection,
}

impl Client {
    /// Connect (and authenticate) using the given config
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            conn: Connection::open(config)?,
        })
    }

    /// Issue a command and return the raw decoded reply
    pub fn query(&mut self, command: &Command) -> Result<Response> {
        self.conn.execute(command)
    }

    /// Issue a command and flatten the reply to text
    pub fn query_text(&mut self, command: &Command) -> Result<Option<String>> {
        self.query(command)?.into_text()
    }

    /// Issue a command and project an array reply to strings
    pub fn query_list(&mut self, command: &Command) -> Result<Vec<String>> {
        self.query(command)?.into_string_list()
    }

    // =========================================================================
    // Commands
    // =========================================================================

    pub fn ping(&mut self) -> Result<String> {
        Ok(self.query_text(&Command::ping())?.unwrap_or_default())
    }

    /// GET; `None` when the key does not exist
    pub fn get(&mut self, key: impl Into<Bytes>) -> Result<Option<String>> {
        self.query_text(&Command::get(key))
    }

    /// SET with an optional expiry in seconds
    pub fn set(
        &mut self,
        key: impl Into<Bytes>,
        value: impl Into<Bytes>,
        ttl_secs: Option<u64>,
    ) -> Result<String> {
        Ok(self
            .query_text(&Command::set(key, value, ttl_secs))?
            .unwrap_or_default())
    }

    /// DEL; returns the number of keys removed
    pub fn del<I, K>(&mut self, keys: I) -> Result<i64>
    where
        I: IntoIterator<Item = K>,
        K: Into<Bytes>,
    {
        self.query(&Command::del(keys))?.into_integer()
    }

    /// KEYS, truncated to `limit` entries (`0` means unlimited)
    pub fn keys(&mut self, pattern: &str, limit: usize) -> Result<KeyListing> {
        let mut keys = self.query_list(&Command::keys(pattern.to_string()))?;
        let total = keys.len();
        let truncated = limit > 0 && total > limit;
        if truncated {
            keys.truncate(limit);
        }

        Ok(KeyListing {
            pattern: pattern.to_string(),
            keys,
            total,
            truncated,
        })
    }

    /// INFO, parsed into key/value pairs
    pub fn info(&mut self) -> Result<BTreeMap<String, String>> {
        let text = self.query_text(&Command::info())?.unwrap_or_default();
        Ok(parse_info(&text))
    }
}

/// Parse a server status block into key/value pairs
///
/// Splits each line on its first colon. Blank lines, `#` section headers
/// and lines without a colon are skipped.
pub fn parse_info(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}


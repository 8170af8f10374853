//! Configuration for kvlink
//!
//! Centralized client configuration with sensible defaults. Values are
//! supplied by the caller (the CLI reads flags and environment); this
//! module never touches files or the environment itself.

use crate::error::{KvError, Result};

/// Connection settings for a single client session
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Endpoint
    // -------------------------------------------------------------------------
    /// Target address (host:port)
    pub addr: String,

    /// Password sent with AUTH right after connecting
    pub password: Option<String>,

    // -------------------------------------------------------------------------
    // Deadlines
    // -------------------------------------------------------------------------
    /// TCP connect timeout (milliseconds)
    pub connect_timeout_ms: u64,

    /// Per read/write deadline (milliseconds)
    pub op_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            addr: "localhost:6379".to_string(),
            password: None,
            connect_timeout_ms: 5000,
            op_timeout_ms: 10_000,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Reject settings that would make the transport misbehave
    pub fn validate(&self) -> Result<()> {
        if self.addr.trim().is_empty() {
            return Err(KvError::Config("address must not be empty".to_string()));
        }
        // std sockets treat a zero timeout as an error, and "no deadline"
        // would allow an indefinite hang.
        if self.connect_timeout_ms == 0 {
            return Err(KvError::Config("connect timeout must be > 0".to_string()));
        }
        if self.op_timeout_ms == 0 {
            return Err(KvError::Config("operation timeout must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the target address (host:port)
    pub fn addr(mut self, addr: impl Into<String>) -> Self {
        self.config.addr = addr.into();
        self
    }

    /// Set the password; empty strings are treated as no password
    pub fn password(mut self, password: Option<String>) -> Self {
        self.config.password = password.filter(|p| !p.is_empty());
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the per-operation timeout (in milliseconds)
    pub fn op_timeout_ms(mut self, ms: u64) -> Self {
        self.config.op_timeout_ms = ms;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

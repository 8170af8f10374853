//! Error types for kvlink
//!
//! Provides a unified error type for all client operations, plus the
//! decode-level taxonomy the codec reports.

use serde::Serialize;
use thiserror::Error;

/// Result type alias using KvError
pub type Result<T> = std::result::Result<T, KvError>;

/// Unified error type for kvlink operations
#[derive(Debug, Error)]
pub enum KvError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot reach service at {addr}: {source}")]
    Unreachable {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{op} deadline of {after_ms}ms exceeded")]
    Timeout { op: &'static str, after_ms: u64 },

    #[error("connection closed by server")]
    ConnectionClosed,

    #[error("connection is unusable after a previous failure")]
    ConnectionBroken,

    // -------------------------------------------------------------------------
    // Authentication Errors
    // -------------------------------------------------------------------------
    #[error("authentication failed: {reason}")]
    Auth { reason: String },

    /// The transport failed while AUTH was in flight
    #[error("authentication failed during handshake: {source}")]
    Handshake {
        #[source]
        source: Box<KvError>,
    },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("unexpected reply: expected {expected}, got {actual}")]
    UnexpectedReply {
        expected: &'static str,
        actual: &'static str,
    },

    // -------------------------------------------------------------------------
    // Application Errors
    // -------------------------------------------------------------------------
    /// A well-formed error reply, converted on request by the caller
    #[error("server error: {0}")]
    Server(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Decode failures. Each malformed-input case gets its own variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty reply line")]
    EmptyLine,

    #[error("unknown type tag {0:?}")]
    UnknownTag(char),

    #[error("malformed integer payload {0:?}")]
    MalformedInteger(String),

    #[error("invalid declared length {0}")]
    InvalidLength(i64),

    #[error("bulk string of {len} bytes exceeds limit of {max}")]
    BulkTooLarge { len: i64, max: usize },

    #[error("reply line longer than {max} bytes")]
    LineTooLong { max: usize },

    #[error("missing CRLF terminator")]
    MissingTerminator,

    #[error("stream ended mid-frame")]
    Truncated,

    #[error("nesting too deep: more than {max} nested arrays")]
    DepthExceeded { max: usize },
}

impl KvError {
    /// Short, stable classification used by the output layer
    pub fn kind(&self) -> &'static str {
        match self {
            KvError::Io(_) => "io",
            KvError::Unreachable { .. } => "unreachable",
            KvError::Timeout { .. } => "timeout",
            KvError::ConnectionClosed | KvError::ConnectionBroken => "connection",
            KvError::Auth { .. } | KvError::Handshake { .. } => "auth",
            KvError::Protocol(_) | KvError::UnexpectedReply { .. } => "protocol",
            KvError::Server(_) => "server",
            KvError::Config(_) => "config",
        }
    }

    /// Operator-facing suggestion, where one is obvious
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            KvError::Unreachable { .. } => {
                Some("check that the server is running and --addr / KVLINK_ADDR is correct")
            }
            KvError::Timeout { .. } => Some("raise --timeout-ms or check network latency"),
            KvError::Auth { .. } => Some("check --password / KVLINK_PASSWORD"),
            KvError::Handshake { source } => source.hint(),
            KvError::Protocol(_) => Some("the peer may not speak RESP; verify the address"),
            KvError::Config(_) => Some("run with --help to see valid options"),
            _ => None,
        }
    }

    /// Whether the connection that produced this error may still be used.
    ///
    /// Only server-reported failures and local checks leave framing intact.
    pub fn is_fatal_to_connection(&self) -> bool {
        !matches!(
            self,
            KvError::Server(_) | KvError::UnexpectedReply { .. } | KvError::Config(_)
        )
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
            hint: self.hint(),
        }
    }
}

/// Structured error object handed to the output layer
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorReport {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

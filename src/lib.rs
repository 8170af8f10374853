//! # kvlink
//!
//! A small, synchronous client for RESP-speaking key-value servers:
//! - Length-prefixed command encoding
//! - Recursive reply decoding with a fixed nesting bound
//! - One TCP connection per session, with deadlines and inline AUTH
//! - JSON output envelope for terminal agents
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CLI (kvlink-cli)                         │
//! │              get / set / del / keys / info                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Client                                 │
//! │          (text / list / integer projections)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Connection  │          │    Codec    │
//!   │ (TCP, AUTH) │─────────▶│ (RESP wire) │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;
pub mod output;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorReport, KvError, ProtocolError, Result};
pub use config::ClientConfig;
pub use client::Client;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of kvlink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Network Module
//!
//! TCP transport for the client.
//!
//! ## Lifecycle
//! - One connection per invocation, opened within one connect timeout
//!   shared by every resolved address
//! - Optional AUTH handshake before the connection is handed out
//! - Sequential commands, each bounded by the per-operation deadline
//! - Closed on drop, never pooled

mod connection;

pub use connection::{connect_any, dial, Connection};

//! Protocol Module
//!
//! Client side of the RESP wire protocol spoken by in-memory data stores.
//!
//! ## Request Format
//! ```text
//! *<argc>\r\n ( $<len>\r\n <arg bytes> \r\n ) x argc
//! ```
//!
//! ## Reply Type Tags
//! - `+` simple string
//! - `-` error
//! - `:` integer
//! - `$` bulk string (`-1` length is null)
//! - `*` array (`-1` count is null), elements are replies themselves

mod command;
mod response;
mod codec;

pub use command::Command;
pub use response::{Response, NIL};
pub use codec::{
    encode_command, write_command,
    read_response, read_response_with_depth,
    CRLF, MAX_BULK_LEN, MAX_DEPTH, MAX_LINE_LEN,
};

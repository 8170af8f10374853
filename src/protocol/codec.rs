//! Protocol codec
//!
//! Encoding of commands and decoding of replies for the RESP wire format.
//!
//! ## Wire Format
//!
//! ### Request (Command) Format
//! ```text
//! *<argc>\r\n
//! $<len>\r\n<bytes>\r\n      (once per argument)
//! ```
//!
//! ### Reply Format
//! ```text
//! +<text>\r\n                simple string
//! -<message>\r\n             error
//! :<i64>\r\n                 integer
//! $<len>\r\n<bytes>\r\n      bulk string   ($-1\r\n is null)
//! *<count>\r\n<replies...>   array         (*-1\r\n is null)
//! ```

use std::io::{BufRead, Read, Write};

use bytes::Bytes;

use super::{Command, Response};
use crate::error::{KvError, ProtocolError, Result};

/// Line terminator
pub const CRLF: &[u8] = b"\r\n";

/// Maximum number of nested arrays in one reply
pub const MAX_DEPTH: usize = 64;

/// Maximum declared bulk string length (512 MB)
pub const MAX_BULK_LEN: usize = 512 * 1024 * 1024;

/// Maximum header line length, excluding CRLF (64 KB)
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Upper bound on up-front allocation for a declared bulk length
const PREALLOC_LIMIT: usize = 64 * 1024;

/// Up-front element slots per array; nested levels each reserve this many,
/// so it must stay small for the total to stay small
const ARRAY_PREALLOC: usize = 16;

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command to bytes
///
/// Arguments are length-prefixed, so any byte content is accepted.
pub fn encode_command(command: &Command) -> Vec<u8> {
    let args = command.args();
    let size = 16 + args.iter().map(|arg| arg.len() + 16).sum::<usize>();

    let mut message = Vec::with_capacity(size);
    push_header(&mut message, b'*', args.len());
    for arg in args {
        push_header(&mut message, b'$', arg.len());
        message.extend_from_slice(arg);
        message.extend_from_slice(CRLF);
    }

    message
}

fn push_header(out: &mut Vec<u8>, tag: u8, n: usize) {
    out.push(tag);
    out.extend_from_slice(n.to_string().as_bytes());
    out.extend_from_slice(CRLF);
}

/// Write a command to a stream and flush it
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let bytes = encode_command(command);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Reply Decoding
// =============================================================================

/// Read exactly one reply from a buffered stream
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Response> {
    read_response_with_depth(reader, MAX_DEPTH)
}

/// Read one reply, allowing at most `max_depth` nested arrays
///
/// On any error the stream position is undefined; callers must not try to
/// read another reply from the same stream.
pub fn read_response_with_depth<R: BufRead>(reader: &mut R, max_depth: usize) -> Result<Response> {
    read_value(reader, 0, max_depth)
}

fn read_value<R: BufRead>(reader: &mut R, depth: usize, max_depth: usize) -> Result<Response> {
    let line = read_line(reader, depth > 0)?;
    let (&tag, payload) = line.split_first().ok_or(ProtocolError::EmptyLine)?;

    match tag {
        b'+' => Ok(Response::Simple(String::from_utf8_lossy(payload).into_owned())),
        b'-' => Ok(Response::Error(String::from_utf8_lossy(payload).into_owned())),
        b':' => Ok(Response::Integer(parse_integer(payload)?)),
        b'$' => match declared_len(payload)? {
            None => Ok(Response::Bulk(None)),
            Some(len) => Ok(Response::Bulk(Some(read_bulk(reader, len)?))),
        },
        b'*' => match declared_len(payload)? {
            None => Ok(Response::Array(None)),
            Some(count) => {
                if depth >= max_depth {
                    return Err(ProtocolError::DepthExceeded { max: max_depth }.into());
                }
                // Children are collected locally; a failing child drops them all.
                let mut items = Vec::with_capacity(count.min(ARRAY_PREALLOC));
                for _ in 0..count {
                    items.push(read_value(reader, depth + 1, max_depth)?);
                }
                Ok(Response::Array(Some(items)))
            }
        },
        other => Err(ProtocolError::UnknownTag(other as char).into()),
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one CRLF-terminated line and strip the terminator
///
/// EOF before the first byte of a top-level reply means the peer hung up;
/// EOF anywhere else is a truncated frame.
fn read_line<R: BufRead>(reader: &mut R, mid_frame: bool) -> Result<Vec<u8>> {
    let limit = (MAX_LINE_LEN + CRLF.len()) as u64;
    let mut line = Vec::new();
    let n = (&mut *reader).take(limit).read_until(b'\n', &mut line)?;

    if n == 0 {
        return Err(if mid_frame {
            ProtocolError::Truncated.into()
        } else {
            KvError::ConnectionClosed
        });
    }

    if line.last() != Some(&b'\n') {
        return Err(if n as u64 == limit {
            ProtocolError::LineTooLong { max: MAX_LINE_LEN }.into()
        } else {
            ProtocolError::Truncated.into()
        });
    }

    if !line.ends_with(CRLF) {
        return Err(ProtocolError::MissingTerminator.into());
    }
    line.truncate(line.len() - CRLF.len());
    Ok(line)
}

/// Read a declared-length payload plus its CRLF
fn read_bulk<R: BufRead>(reader: &mut R, len: usize) -> Result<Bytes> {
    if len > MAX_BULK_LEN {
        return Err(ProtocolError::BulkTooLarge {
            len: len as i64,
            max: MAX_BULK_LEN,
        }
        .into());
    }

    let total = len + CRLF.len();
    let mut buf = Vec::with_capacity(total.min(PREALLOC_LIMIT));
    let n = (&mut *reader).take(total as u64).read_to_end(&mut buf)?;
    if n < total {
        return Err(ProtocolError::Truncated.into());
    }

    if &buf[len..] != CRLF {
        return Err(ProtocolError::MissingTerminator.into());
    }
    buf.truncate(len);
    Ok(Bytes::from(buf))
}

fn parse_integer(payload: &[u8]) -> Result<i64> {
    std::str::from_utf8(payload)
        .ok()
        .and_then(|text| text.parse::<i64>().ok())
        .ok_or_else(|| {
            ProtocolError::MalformedInteger(String::from_utf8_lossy(payload).into_owned()).into()
        })
}

/// Parse a bulk length or array count; `-1` is the null marker
fn declared_len(payload: &[u8]) -> Result<Option<usize>> {
    match parse_integer(payload)? {
        -1 => Ok(None),
        n if n < -1 => Err(ProtocolError::InvalidLength(n).into()),
        n => usize::try_from(n)
            .map(Some)
            .map_err(|_| ProtocolError::InvalidLength(n).into()),
    }
}

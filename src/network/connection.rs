//! Connection
//!
//! One live TCP socket to the server, with deadlines and optional
//! inline authentication. Exactly one command is in flight at a time.

use std::io::{self, BufReader, BufWriter};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use crate::config::ClientConfig;
use crate::error::{KvError, Result};
use crate::protocol::{read_response, write_command, Command, Response};

/// An exclusively owned client connection
///
/// Dropping the value closes the socket. After any transport or decode
/// failure the connection refuses further commands, since the framing
/// state of the stream is unknown.
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,

    /// Per-operation deadline, kept for error messages
    op_timeout_ms: u64,

    /// Set once a command fails mid-exchange
    broken: bool,
}

impl Connection {
    /// Dial the configured address and authenticate if a password is set
    ///
    /// Single attempt, no retry.
    pub fn open(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let stream = dial(&config.addr, Duration::from_millis(config.connect_timeout_ms))?;
        let mut conn = Self::from_stream(stream, config.op_timeout_ms)?;
        tracing::debug!("Connected to {}", conn.peer_addr);

        if let Some(password) = &config.password {
            conn.authenticate(password)?;
        }

        Ok(conn)
    }

    /// Wrap an already connected stream
    ///
    /// Disables Nagle and applies the read/write deadline, which must be
    /// non-zero.
    pub fn from_stream(stream: TcpStream, op_timeout_ms: u64) -> Result<Self> {
        if op_timeout_ms == 0 {
            return Err(KvError::Config("operation timeout must be > 0".to_string()));
        }

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(true)?;

        let deadline = Some(Duration::from_millis(op_timeout_ms));
        stream.set_read_timeout(deadline)?;
        stream.set_write_timeout(deadline)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
            op_timeout_ms,
            broken: false,
        })
    }

    /// Send one command and read its reply
    ///
    /// An `Error` reply is returned as `Ok(Response::Error(..))`; only
    /// transport and decode failures are `Err`.
    pub fn execute(&mut self, command: &Command) -> Result<Response> {
        if self.broken {
            return Err(KvError::ConnectionBroken);
        }

        tracing::debug!(
            "Sending {} ({} args) to {}",
            command.verb(),
            command.len(),
            self.peer_addr
        );

        match self.exchange(command) {
            Ok(response) => {
                tracing::trace!("Reply from {}: {}", self.peer_addr, response.type_name());
                Ok(response)
            }
            Err(e) => {
                if e.is_fatal_to_connection() {
                    tracing::warn!("Discarding connection to {}: {}", self.peer_addr, e);
                    self.broken = true;
                }
                Err(e)
            }
        }
    }

    fn exchange(&mut self, command: &Command) -> Result<Response> {
        if let Err(e) = write_command(&mut self.writer, command) {
            return Err(self.classify(e, "write"));
        }
        read_response(&mut self.reader).map_err(|e| self.classify(e, "read"))
    }

    /// Issue AUTH
    ///
    /// A rejection becomes `KvError::Auth`; a transport or decode failure
    /// becomes `KvError::Handshake` carrying the original error.
    fn authenticate(&mut self, password: &str) -> Result<()> {
        tracing::debug!("Authenticating with {}", self.peer_addr);

        match self.execute(&Command::auth(password.to_string())) {
            Ok(Response::Error(reason)) => {
                tracing::warn!("Authentication with {} rejected", self.peer_addr);
                Err(KvError::Auth { reason })
            }
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!("Authentication with {} failed: {}", self.peer_addr, e);
                Err(KvError::Handshake {
                    source: Box::new(e),
                })
            }
        }
    }

    /// Map deadline expiry onto `Timeout`, pass other errors through
    fn classify(&self, error: KvError, op: &'static str) -> KvError {
        match error {
            KvError::Io(ref e) if is_timeout(e) => KvError::Timeout {
                op,
                after_ms: self.op_timeout_ms,
            },
            KvError::Io(ref e) if is_disconnect(e) => KvError::ConnectionClosed,
            other => other,
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// Whether a previous failure has made this connection unusable
    pub fn is_broken(&self) -> bool {
        self.broken
    }
}

/// Resolve `addr` and connect within `timeout`
///
/// Each resolved address is tried once, in order, and all attempts share
/// the one budget: `localhost` resolving to `::1` and `127.0.0.1` still
/// waits at most `timeout` in total.
pub fn dial(addr: &str, timeout: Duration) -> Result<TcpStream> {
    let candidates: Vec<SocketAddr> = addr
        .to_socket_addrs()
        .map_err(|source| KvError::Unreachable {
            addr: addr.to_string(),
            source,
        })?
        .collect();
    if candidates.is_empty() {
        return Err(KvError::Config(format!("address {} resolved to nothing", addr)));
    }

    connect_any(addr, &candidates, timeout)
}

/// Connect to the first reachable candidate before `timeout` runs out
pub fn connect_any(addr: &str, candidates: &[SocketAddr], timeout: Duration) -> Result<TcpStream> {
    let deadline = Instant::now() + timeout;
    let mut last_err = None;

    for candidate in candidates {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            last_err = Some(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("connect timeout of {}ms spent", timeout.as_millis()),
            ));
            break;
        }

        match TcpStream::connect_timeout(candidate, remaining) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!("Connect to {} failed: {}", candidate, e);
                last_err = Some(e);
            }
        }
    }

    Err(KvError::Unreachable {
        addr: addr.to_string(),
        source: last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotConnected, "no address to connect to")
        }),
    })
}

fn is_timeout(e: &io::Error) -> bool {
    // Unix reports an expired socket deadline as WouldBlock, Windows as TimedOut
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

fn is_disconnect(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof
    )
}

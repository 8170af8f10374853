//! Command definitions
//!
//! A command is an ordered list of binary-safe arguments, verb first.

use bytes::Bytes;

/// A request to send to the server
///
/// Built once through the constructors below and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    args: Vec<Bytes>,
}

impl Command {
    /// Start a command with the given verb
    pub fn new(verb: impl Into<Bytes>) -> Self {
        Self {
            args: vec![verb.into()],
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<Bytes>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments in order
    pub fn args_from<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Bytes>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    // =========================================================================
    // Well-known commands
    // =========================================================================

    pub fn ping() -> Self {
        Self::new("PING")
    }

    pub fn auth(password: impl Into<Bytes>) -> Self {
        Self::new("AUTH").arg(password)
    }

    pub fn get(key: impl Into<Bytes>) -> Self {
        Self::new("GET").arg(key)
    }

    /// SET, with `EX <seconds>` appended when a ttl is given
    pub fn set(key: impl Into<Bytes>, value: impl Into<Bytes>, ttl_secs: Option<u64>) -> Self {
        let cmd = Self::new("SET").arg(key).arg(value);
        match ttl_secs {
            Some(ttl) => cmd.arg("EX").arg(ttl.to_string()),
            None => cmd,
        }
    }

    pub fn del<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Bytes>,
    {
        Self::new("DEL").args_from(keys)
    }

    pub fn keys(pattern: impl Into<Bytes>) -> Self {
        Self::new("KEYS").arg(pattern)
    }

    pub fn info() -> Self {
        Self::new("INFO")
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The verb, for logging
    pub fn verb(&self) -> String {
        String::from_utf8_lossy(&self.args[0]).to_ascii_uppercase()
    }

    /// All arguments including the verb
    pub fn args(&self) -> &[Bytes] {
        &self.args
    }

    /// Argument count including the verb
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Always false: a command has at least its verb
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

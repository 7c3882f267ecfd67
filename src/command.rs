//! Command descriptors.
//!
//! A [`Command`] is the immutable `(request type, arguments)` pair handed to
//! the command manager. Arguments are binary-safe and keep positional order.

use bytes::Bytes;

/// The closed set of request kinds the client can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    /// Arbitrary command; the first argument is the command name.
    CustomCommand,
    /// PING [message]
    Ping,
    /// INFO [section …]
    Info,
    /// GET key
    GetString,
    /// SET key value [options]
    SetString,
}

impl RequestType {
    /// Protocol verb for this request kind. `None` for custom commands,
    /// which carry their own name as the first argument.
    pub const fn verb(self) -> Option<&'static str> {
        match self {
            Self::CustomCommand => None,
            Self::Ping => Some("PING"),
            Self::Info => Some("INFO"),
            Self::GetString => Some("GET"),
            Self::SetString => Some("SET"),
        }
    }
}

/// An immutable command descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    request_type: RequestType,
    arguments: Vec<Bytes>,
}

impl Command {
    /// Start a command with no arguments.
    pub fn new(request_type: RequestType) -> Self {
        Self {
            request_type,
            arguments: Vec::new(),
        }
    }

    /// Build a custom command from its full argument vector.
    pub fn custom<I, A>(args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Bytes>,
    {
        Self::new(RequestType::CustomCommand).args(args)
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<Bytes>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    /// Append several arguments, preserving their order.
    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Bytes>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn request_type(&self) -> RequestType {
        self.request_type
    }

    pub fn arguments(&self) -> &[Bytes] {
        &self.arguments
    }

    /// Full argument vector for the wire: the verb (if any) followed by the
    /// arguments.
    pub fn to_argv(&self) -> Vec<Bytes> {
        let mut argv = Vec::with_capacity(self.arguments.len() + 1);
        if let Some(verb) = self.request_type.verb() {
            argv.push(Bytes::from_static(verb.as_bytes()));
        }
        argv.extend(self.arguments.iter().cloned());
        argv
    }
}

// ── Tests ──────────────────────────────────────────────────────────

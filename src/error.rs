use std::fmt;
use std::io;

// ── Error taxonomy ─────────────────────────────────────────────────
//
//  GlideError
//  ├── Encoding        (invalid option combination, never sent)
//  ├── TypeMismatch    (reply shape differs from the decoder's)
//  ├── Transport       (per-request or whole-connection fault)
//  ├── Redis           (server error marker, classified by prefix)
//  ├── Exhausted       (no free correlation id)
//  ├── Cancelled
//  ├── Config
//  └── Closed

/// Structured Redis error kinds for programmatic matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedisErrorKind {
    /// Generic ERR
    Err,
    /// WRONGTYPE Operation against a key holding the wrong kind of value
    WrongType,
    /// LOADING Redis is loading the dataset in memory
    Loading,
    /// READONLY You can't write against a read only replica
    ReadOnly,
    /// NOSCRIPT No matching script
    NoScript,
    /// BUSY Redis is busy running a script
    Busy,
    /// NOAUTH Authentication required
    NoAuth,
    /// Any other Redis error prefix
    Other(String),
}

impl RedisErrorKind {
    /// Classify a Redis error message by its leading word.
    pub fn from_error_msg(msg: &str) -> Self {
        let prefix = msg.split_whitespace().next().unwrap_or("UNKNOWN");
        match prefix {
            "ERR" => Self::Err,
            "WRONGTYPE" => Self::WrongType,
            "LOADING" => Self::Loading,
            "READONLY" => Self::ReadOnly,
            "NOSCRIPT" => Self::NoScript,
            "BUSY" => Self::Busy,
            "NOAUTH" => Self::NoAuth,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Faults reported by (or about) the external transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// `send` was called before the transport finished connecting.
    NotConnected,
    /// The connection dropped; the string carries the transport's reason.
    ConnectionLost(String),
    /// The transport was closed on purpose.
    Closed,
    /// Any other I/O-level failure, flattened to its message.
    Io(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected"),
            Self::ConnectionLost(reason) => write!(f, "connection lost: {reason}"),
            Self::Closed => write!(f, "transport closed"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl From<io::Error> for TransportError {
    fn from(e: io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// All error variants surfaced by the client.
///
/// `Clone` so that a single connection failure can be fanned out to every
/// pending request.
#[derive(Debug, Clone, PartialEq)]
pub enum GlideError {
    /// Option combination cannot be encoded into arguments.
    Encoding(String),
    /// The reply's shape does not match what the decoder expects.
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    /// Transport-level fault for one request or the whole connection.
    Transport(TransportError),
    /// Redis answered with an error marker.
    Redis {
        kind: RedisErrorKind,
        message: String,
    },
    /// No correlation id could be allocated.
    Exhausted(String),
    /// The caller cancelled the request before its reply arrived.
    Cancelled,
    /// Invalid client configuration.
    Config(String),
    /// The client (or its dispatcher) is gone.
    Closed,
}

impl GlideError {
    /// Create a Redis error from a raw error message, auto-parsing the kind.
    pub fn redis(msg: impl Into<String>) -> Self {
        let message = msg.into();
        let kind = RedisErrorKind::from_error_msg(&message);
        Self::Redis { kind, message }
    }

    /// Shorthand for a type mismatch.
    pub fn mismatch(expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch { expected, actual }
    }

    /// True for faults coming from the transport rather than the server or
    /// the caller.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl fmt::Display for GlideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding(msg) => write!(f, "encoding error: {msg}"),
            Self::TypeMismatch { expected, actual } => {
                write!(f, "unexpected return type from Redis: got {actual}, expected {expected}")
            }
            Self::Transport(e) => write!(f, "transport error: {e}"),
            Self::Redis { message, .. } => write!(f, "redis error: {message}"),
            Self::Exhausted(msg) => write!(f, "correlation ids exhausted: {msg}"),
            Self::Cancelled => write!(f, "request cancelled"),
            Self::Config(msg) => write!(f, "config error: {msg}"),
            Self::Closed => write!(f, "client closed"),
        }
    }
}

impl std::error::Error for GlideError {}

impl From<TransportError> for GlideError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<io::Error> for GlideError {
    fn from(e: io::Error) -> Self {
        Self::Transport(e.into())
    }
}

pub type Result<T> = std::result::Result<T, GlideError>;

// ── Tests ──────────────────────────────────────────────────────────

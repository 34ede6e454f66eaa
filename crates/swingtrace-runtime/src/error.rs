use std::fmt;

use swingtrace_types::Session;

use crate::relay::ChannelStatus;

/// Result type for swingtrace-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// The sensor source could not be opened; no readings were delivered
    SensorUnavailable(String),

    /// A movement was requested while no session is open
    NoActiveSession,

    /// Relay send attempted while the peer cannot be reached
    ChannelUnreachable(ChannelStatus),

    /// The relay channel rejected a message
    Send(String),

    /// Saving an ended session failed. The session is handed back so the
    /// caller can retry `insert` + `save` itself.
    PersistenceFailure {
        session: Box<Session>,
        source: swingtrace_index::Error,
    },

    /// Database/index layer error
    Index(swingtrace_index::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Invalid operation or state
    InvalidOperation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SensorUnavailable(msg) => write!(f, "Sensor unavailable: {}", msg),
            Error::NoActiveSession => write!(f, "No active session"),
            Error::ChannelUnreachable(status) => {
                write!(f, "Relay peer unreachable ({})", status.connectivity())
            }
            Error::Send(msg) => write!(f, "Relay send failed: {}", msg),
            Error::PersistenceFailure { session, source } => {
                write!(f, "Failed to persist session {}: {}", session.id, source)
            }
            Error::Index(err) => write!(f, "Index error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::PersistenceFailure { source, .. } => Some(source),
            Error::Index(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::SensorUnavailable(_)
            | Error::NoActiveSession
            | Error::ChannelUnreachable(_)
            | Error::Send(_)
            | Error::Config(_)
            | Error::InvalidOperation(_) => None,
        }
    }
}

impl From<swingtrace_index::Error> for Error {
    fn from(err: swingtrace_index::Error) -> Self {
        Error::Index(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

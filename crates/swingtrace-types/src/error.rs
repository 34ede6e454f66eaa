use std::fmt;

/// Result type for swingtrace-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// A movement was appended to a session that has already ended
    SessionClosed(String),

    /// A movement-type or hand tag could not be parsed
    InvalidTag { kind: &'static str, value: String },

    /// Malformed identifier
    InvalidId(String),

    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SessionClosed(id) => write!(f, "Session {} has already ended", id),
            Error::InvalidTag { kind, value } => write!(f, "Unknown {}: {}", kind, value),
            Error::InvalidId(msg) => write!(f, "Invalid identifier: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::SessionClosed(_) | Error::InvalidTag { .. } | Error::InvalidId(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

use std::fmt;

/// Result type for swingtrace-index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the index layer
#[derive(Debug)]
pub enum Error {
    /// Database operation failed
    Database(rusqlite::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// A stored value could not be decoded back into its domain type
    Corrupt {
        column: &'static str,
        value: String,
        reason: String,
    },

    /// Two samples of one movement share an index
    DuplicateSample { movement_id: String, index: u64 },

    /// Sample index does not fit the INTEGER column
    SampleIndexOutOfRange(u64),

    /// A short id matched more than one record
    AmbiguousPrefix { prefix: String, matches: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Database(err) => write!(f, "Database error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Corrupt {
                column,
                value,
                reason,
            } => write!(f, "Corrupt value '{}' in {}: {}", value, column, reason),
            Error::DuplicateSample { movement_id, index } => write!(
                f,
                "Duplicate sample index {} in movement {}",
                index, movement_id
            ),
            Error::SampleIndexOutOfRange(index) => {
                write!(f, "Sample index {} out of range", index)
            }
            Error::AmbiguousPrefix { prefix, matches } => write!(
                f,
                "Ambiguous id prefix '{}' matches {} records",
                prefix, matches
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Database(err) => Some(err),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// True when `err` is a primary-key or unique constraint violation.
pub(crate) fn is_key_conflict(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_value_names_column() {
        let err = Error::Corrupt {
            column: "movements.hand",
            value: "both".to_string(),
            reason: "unknown hand".to_string(),
        };
        let msg = err.to_string();

        assert!(msg.contains("movements.hand"));
        assert!(msg.contains("'both'"));
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_key_conflict_detection() {
        let pk = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY),
            Some("UNIQUE constraint failed: samples.movement_id, samples.idx".to_string()),
        );
        let fk = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY),
            None,
        );

        assert!(is_key_conflict(&pk));
        assert!(!is_key_conflict(&fk));
    }
}

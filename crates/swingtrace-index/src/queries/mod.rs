pub mod movement;
pub mod sample;
pub mod session;

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{Error, Result};

pub(crate) fn ts_to_sql(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn ts_from_sql(column: &'static str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| corrupt(column, raw, e))
}

/// Parse a stored text column back into its domain type.
pub(crate) fn decode<T>(column: &'static str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(|e| corrupt(column, raw, e))
}

fn corrupt(column: &'static str, raw: &str, reason: impl Display) -> Error {
    Error::Corrupt {
        column,
        value: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// `WHERE` clause matching ids that start with `?1`, taken literally.
pub(crate) const ID_PREFIX_MATCH: &str = "substr(id, 1, length(?1)) = ?1";

/// Resolve a unique id from a prefix; `Ok(None)` when nothing matches.
pub(crate) fn resolve_prefix(candidates: Vec<String>, prefix: &str) -> Result<Option<String>> {
    match candidates.len() {
        0 => Ok(None),
        1 => Ok(candidates.into_iter().next()),
        n => Err(Error::AmbiguousPrefix {
            prefix: prefix.to_string(),
            matches: n,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swingtrace_types::Hand;

    #[test]
    fn test_decode_reports_column_and_value() {
        let err = decode::<Hand>("movements.hand", "both").unwrap_err();
        match err {
            Error::Corrupt { column, value, .. } => {
                assert_eq!(column, "movements.hand");
                assert_eq!(value, "both");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_timestamp_is_corrupt() {
        let err = ts_from_sql("samples.captured_at", "yesterday").unwrap_err();
        assert!(matches!(err, Error::Corrupt { column: "samples.captured_at", .. }));
    }

    #[test]
    fn test_timestamp_round_trip_keeps_nanos() {
        let ts = DateTime::parse_from_rfc3339("2026-03-01T10:00:00.123456789Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(ts_from_sql("t", &ts_to_sql(&ts)).unwrap(), ts);
    }

    #[test]
    fn test_resolve_prefix() {
        assert_eq!(resolve_prefix(vec![], "ab").unwrap(), None);
        assert_eq!(
            resolve_prefix(vec!["abc".to_string()], "ab").unwrap(),
            Some("abc".to_string())
        );
        let err = resolve_prefix(vec!["abc".into(), "abd".into()], "ab").unwrap_err();
        assert!(matches!(err, Error::AmbiguousPrefix { matches: 2, .. }));
    }
}

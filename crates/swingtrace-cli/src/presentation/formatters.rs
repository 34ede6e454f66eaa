use chrono::{DateTime, Utc};

/// First eight characters of an id, like a short commit hash.
pub fn short_id(id: &impl ToString) -> String {
    id.to_string().chars().take(8).collect()
}

pub fn timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn seconds(secs: f64) -> String {
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else {
        format!("{:.2}s", secs)
    }
}

pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_short_id_takes_prefix() {
        assert_eq!(short_id(&"0123456789abcdef"), "01234567");
        assert_eq!(short_id(&"abc"), "abc");
    }

    #[test]
    fn test_seconds_switches_units() {
        assert_eq!(seconds(0.25), "250ms");
        assert_eq!(seconds(1.5), "1.50s");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "movement"), "1 movement");
        assert_eq!(plural(3, "sample"), "3 samples");
    }

    #[test]
    fn test_timestamp_format() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(timestamp(&ts), "2024-05-01 09:30:00");
    }
}

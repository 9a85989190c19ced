use crate::domain::ports::TimestampProvider;
use chrono::{DateTime, TimeDelta, Utc};

/// 北京時間相對 UTC 的固定偏移
const UTC8_OFFSET_HOURS: i64 = 8;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_utc8(now: DateTime<Utc>) -> String {
    (now.naive_utc() + TimeDelta::hours(UTC8_OFFSET_HOURS))
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Wall clock rendered at UTC+8.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeijingClock;

impl TimestampProvider for BeijingClock {
    fn timestamp(&self) -> String {
        format_utc8(Utc::now())
    }
}

/// Frozen timestamp, used for reproducible runs.
#[derive(Debug, Clone)]
pub struct FixedTimestamp(pub String);

impl TimestampProvider for FixedTimestamp {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_utc8_crosses_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 20, 5, 9).unwrap();
        assert_eq!(format_utc8(now), "2025-01-01 04:05:09");
    }

    #[test]
    fn test_beijing_clock_shape() {
        let ts = BeijingClock.timestamp();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
    }
}

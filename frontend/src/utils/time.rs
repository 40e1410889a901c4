use chrono::{DateTime, Utc};

pub const MINUTE_MS: i64 = 60_000;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Wall-clock source in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Whole minutes left until `deadline`, rounded up. Zero once it has passed.
pub fn minutes_until(now_ms: i64, deadline_ms: i64) -> u32 {
    let remaining = deadline_ms.saturating_sub(now_ms);
    if remaining <= 0 {
        return 0;
    }
    let minutes = (remaining + MINUTE_MS - 1) / MINUTE_MS;
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

pub fn format_timestamp(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_until_rounds_up() {
        assert_eq!(minutes_until(0, 15 * MINUTE_MS), 15);
        assert_eq!(minutes_until(1, 15 * MINUTE_MS), 15);
        assert_eq!(minutes_until(0, MINUTE_MS + 1), 2);
        assert_eq!(minutes_until(0, 1), 1);
        assert_eq!(minutes_until(10, 10), 0);
        assert_eq!(minutes_until(20, 10), 0);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }

    #[test]
    fn format_timestamp_renders_utc() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00 UTC");
    }
}

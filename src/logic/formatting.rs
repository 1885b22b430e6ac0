//! Formatting and display logic
//!
//! Pure functions for turning timestamps and durations into text.

use chrono::{DateTime, Local};

/// Current time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format an epoch-millisecond timestamp in local time
///
/// Zero means "never downloaded".
pub fn format_timestamp(millis: i64) -> String {
    if millis <= 0 {
        return "Never".to_string();
    }

    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "Unknown".to_string(),
    }
}

/// Format a duration in seconds using the two most significant units
///
/// # Examples
/// ```
/// use arx_launcher::logic::formatting::format_duration_compact;
///
/// assert_eq!(format_duration_compact(45), "45s");
/// assert_eq!(format_duration_compact(60), "1m 0s");
/// assert_eq!(format_duration_compact(600), "10m 0s");
/// assert_eq!(format_duration_compact(3660), "1h 1m");
/// ```
pub fn format_duration_compact(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_zero_is_never() {
        assert_eq!(format_timestamp(0), "Never");
        assert_eq!(format_timestamp(-5), "Never");
    }

    #[test]
    fn test_format_timestamp_matches_local_time() {
        let millis = 1_700_000_000_000;
        let expected = DateTime::from_timestamp_millis(millis)
            .unwrap()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(format_timestamp(millis), expected);
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(i64::MAX), "Unknown");
    }

    #[test]
    fn test_now_millis_is_recent() {
        // 2023-11-14 as a lower bound
        assert!(now_millis() > 1_700_000_000_000);
    }

    #[test]
    fn test_format_duration_compact() {
        assert_eq!(format_duration_compact(0), "0s");
        assert_eq!(format_duration_compact(59), "59s");
        assert_eq!(format_duration_compact(61), "1m 1s");
        assert_eq!(format_duration_compact(7200), "2h 0m");
    }
}

//! Display formatting for durations and timestamps.

use crate::identity::Timestamp;
use chrono::Local;

/// Placeholder for values the backend has not reported.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a call duration as `m:ss`.
///
/// Absent and non-positive durations render as `N/A`: the backend only fills the
/// field once a call has ended with measurable talk time.
pub fn format_duration(seconds: Option<i64>) -> String {
    match seconds {
        Some(total) if total > 0 => format!("{}:{:02}", total / 60, total % 60),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Local date and time, e.g. `2024-05-01 11:30:00`.
pub fn format_datetime(ts: &Timestamp) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Local date only.
pub fn format_date(ts: &Timestamp) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Local time of day only.
pub fn format_time(ts: &Timestamp) -> String {
    ts.with_timezone(&Local).format("%H:%M:%S").to_string()
}

pub fn format_optional_datetime(ts: Option<&Timestamp>) -> String {
    ts.map(format_datetime)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_zero_padded_seconds() {
        assert_eq!(format_duration(Some(125)), "2:05");
        assert_eq!(format_duration(Some(59)), "0:59");
        assert_eq!(format_duration(Some(600)), "10:00");
    }

    #[test]
    fn absent_duration_is_placeholder() {
        assert_eq!(format_duration(None), "N/A");
        assert_eq!(format_duration(Some(0)), "N/A");
    }

    #[test]
    fn absent_timestamp_is_placeholder() {
        assert_eq!(format_optional_datetime(None), "N/A");
    }

    #[test]
    fn datetime_has_date_and_time_parts() {
        let ts = crate::identity::parse_timestamp("2024-05-01T12:00:00Z").unwrap();
        let rendered = format_datetime(&ts);
        assert_eq!(rendered.len(), "2024-05-01 12:00:00".len());
        assert_eq!(format_date(&ts).len(), 10);
        assert_eq!(format_time(&ts).len(), 8);
    }
}

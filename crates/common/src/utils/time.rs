use chrono::{DateTime, Utc};

/// Display format used when listing records for humans.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render an instant as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn timestamp_to_string(ts: DateTime<Utc>) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn renders_second_precision() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(timestamp_to_string(ts), "2024-03-09 07:05:01");
    }
}

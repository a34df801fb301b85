//! Wall-clock helpers.
//!
//! The planner runs on a minutes-since-midnight clock that is allowed to run
//! past 24h. Only display wraps.

use chrono::{NaiveTime, Timelike};

pub const MINUTES_PER_DAY: i32 = 24 * 60;

pub fn default_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).expect("valid static default start")
}

pub fn to_minutes(time: NaiveTime) -> i32 {
    (time.num_seconds_from_midnight() / 60) as i32
}

/// Format a clock value as "HH:MM", wrapping past midnight.
pub fn format_minutes(minutes: i32) -> String {
    let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// Serde adapter for "HH:MM" strings.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw)
            .ok_or_else(|| D::Error::custom(format!("expected HH:MM time, got {raw:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads() {
        assert_eq!(format_minutes(8 * 60 + 5), "08:05");
        assert_eq!(format_minutes(0), "00:00");
    }

    #[test]
    fn test_format_wraps_past_midnight() {
        assert_eq!(format_minutes(MINUTES_PER_DAY + 90), "01:30");
        assert_eq!(format_minutes(2 * MINUTES_PER_DAY), "00:00");
    }

    #[test]
    fn test_parse_and_minutes() {
        let time = parse_hhmm("13:45").unwrap();
        assert_eq!(to_minutes(time), 13 * 60 + 45);
        assert!(parse_hhmm("25:00").is_none());
        assert!(parse_hhmm("noon").is_none());
    }

    #[test]
    fn test_default_start() {
        assert_eq!(to_minutes(default_start_time()), 480);
    }
}

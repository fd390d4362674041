//! # Date Handling Utilities
//!
//! Timestamps attached to prospect submissions and their display form in the
//! admin list.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};

/// Format an instant as the ISO-8601 `contactDate` sent with submissions.
///
/// Millisecond precision with a `Z` suffix, e.g. `2024-03-01T17:05:09.120Z`.
pub fn contact_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Returns true if a JSON key looks like a date field.
///
/// Checks common suffixes (`_at`, `_on`, `_date`, `Date`) and a few bare
/// names (`created`, `updated`).
pub fn is_date_like_key(key: &str) -> bool {
    let normalized_key = normalize_date_key(key);
    normalized_key.ends_with("_at")
        || normalized_key.ends_with("_on")
        || normalized_key.ends_with("_date")
        || normalized_key == "created"
        || normalized_key == "updated"
}

/// Lowercase the key and turn camelCase, spaces and hyphens into snake_case.
fn normalize_date_key(key: &str) -> String {
    let mut normalized = String::with_capacity(key.len() + 4);
    for (index, character) in key.chars().enumerate() {
        if character.is_ascii_uppercase() && index > 0 && !normalized.ends_with('_') {
            normalized.push('_');
        }
        match character {
            ' ' | '-' => normalized.push('_'),
            other => normalized.push(other.to_ascii_lowercase()),
        }
    }
    normalized.replace("__", "_")
}

/// Formats common date strings into MM/DD/YYYY if parsable.
///
/// Supports RFC3339 timestamps and `YYYY-MM-DD` / `YYYY/MM/DD` dates.
pub fn format_date_mmddyyyy(date_string: &str) -> Option<String> {
    let date = parse_rfc3339_date(date_string).or_else(|| parse_iso_date(date_string))?;
    Some(format!("{:02}/{:02}/{}", date.month(), date.day(), date.year()))
}

fn parse_rfc3339_date(date_string: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(date_string)
        .ok()
        .map(|date_time| date_time.date_naive())
}

fn parse_iso_date(date_string: &str) -> Option<NaiveDate> {
    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|format_string| NaiveDate::parse_from_str(date_string, format_string).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn contact_timestamp_round_trips_as_rfc3339() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 17, 5, 9).unwrap();
        let stamp = contact_timestamp(instant);
        assert_eq!(stamp, "2024-03-01T17:05:09.000Z");
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[test]
    fn test_date_key_detection() {
        assert!(is_date_like_key("contactDate"));
        assert!(is_date_like_key("created_at"));
        assert!(is_date_like_key("updated-on"));
        assert!(is_date_like_key("created"));
        assert!(!is_date_like_key("name"));
        assert!(!is_date_like_key("state"));
    }

    #[test]
    fn test_key_normalization() {
        assert_eq!(normalize_date_key("contactDate"), "contact_date");
        assert_eq!(normalize_date_key("Release Date"), "release_date");
        assert_eq!(normalize_date_key("updated-on"), "updated_on");
    }

    #[test]
    fn test_date_formatting() {
        assert_eq!(format_date_mmddyyyy("2023-12-25T10:30:00Z"), Some("12/25/2023".to_string()));
        assert_eq!(format_date_mmddyyyy("2023-06-15T14:22:30.512+00:00"), Some("06/15/2023".to_string()));
        assert_eq!(format_date_mmddyyyy("2023/06/15"), Some("06/15/2023".to_string()));
        assert_eq!(format_date_mmddyyyy("2023-13-45"), None);
        assert_eq!(format_date_mmddyyyy(""), None);
    }
}

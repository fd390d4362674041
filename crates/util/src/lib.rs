//! Shared helpers for the Groundwork client: configuration, localization,
//! date display and log redaction.

pub mod config;
pub mod dates;
pub mod i18n;

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

pub use config::{ConfigError, SiteConfig, SocialHandles};
pub use i18n::{Locale, Localizer, MessageKey};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("valid email pattern"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\(?\d[\d\s().\-]{8,}\d").expect("valid phone pattern"));

/// Redacts values that look like a prospect's email or phone number.
///
/// Used before writing request summaries to the log so captured leads do not
/// end up in plain-text log files.
pub fn redact_contact_details(input: &str) -> String {
    let without_emails = EMAIL_PATTERN.replace_all(input, "<redacted-email>");
    PHONE_PATTERN.replace_all(&without_emails, "<redacted-phone>").into_owned()
}

/// Directory for log files written while the terminal UI owns the screen.
pub fn log_directory() -> PathBuf {
    dirs_next::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("groundwork")
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_emails_and_phone_numbers() {
        let line = "submitted jane.doe@example.com / (555) 123-4567 for 123 Main St";
        let redacted = redact_contact_details(line);
        assert_eq!(redacted, "submitted <redacted-email> / <redacted-phone> for 123 Main St");
    }

    #[test]
    fn leaves_short_numbers_alone() {
        assert_eq!(redact_contact_details("zip 90210, limit 5"), "zip 90210, limit 5");
    }
}

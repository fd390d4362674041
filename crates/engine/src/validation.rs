//! Submit-time validation of a [`FormRecord`].

use groundwork_types::{Field, FormRecord, ValidationErrors, ValidationIssue};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9+\-\s()]{10,15}$").expect("valid phone pattern"));

/// Check required fields and the email/phone formats.
///
/// Required fields must be non-empty after trimming. Email and phone are
/// format-checked only when non-empty; an empty required email reports
/// [`ValidationIssue::Required`] rather than a format issue.
pub fn validate_record(record: &FormRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for field in record.kind().required_fields() {
        if record.get(*field).trim().is_empty() {
            errors.insert(*field, ValidationIssue::Required);
        }
    }

    let email = record.get(Field::Email).trim();
    if !email.is_empty() && !is_valid_email(email) {
        errors.insert(Field::Email, ValidationIssue::InvalidEmail);
    }

    let phone = record.get(Field::Phone).trim();
    if !phone.is_empty() && !is_valid_phone(phone) {
        errors.insert(Field::Phone, ValidationIssue::InvalidPhone);
    }

    errors
}

/// Basic `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Digits, spaces, `+`, `-` and parentheses only, 10 to 15 characters long.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundwork_types::FormKind;

    fn record_with(values: &[(Field, &str)]) -> FormRecord {
        let mut record = FormRecord::new(FormKind::Contact);
        for (field, value) in values {
            record.set(*field, *value);
        }
        record
    }

    #[test]
    fn empty_record_flags_name_and_email() {
        let errors = validate_record(&FormRecord::new(FormKind::Quote));
        assert_eq!(errors.get(Field::Name), Some(ValidationIssue::Required));
        assert_eq!(errors.get(Field::Email), Some(ValidationIssue::Required));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let errors = validate_record(&record_with(&[(Field::Name, "   "), (Field::Email, "a@b.co")]));
        assert!(errors.contains(Field::Name));
        assert!(!errors.contains(Field::Email));
    }

    #[test]
    fn email_shapes() {
        for valid in ["jane@x.com", "first.last+tag@mail.example.org", "a@b.c"] {
            assert!(is_valid_email(valid), "{valid} should be accepted");
        }
        for invalid in ["jane", "jane@", "jane@x", "@x.com", "ja ne@x.com", "jane@x .com", "a@@b.com"] {
            assert!(!is_valid_email(invalid), "{invalid} should be rejected");
        }
    }

    #[test]
    fn malformed_email_is_flagged_as_format_issue() {
        let errors = validate_record(&record_with(&[(Field::Name, "Jane"), (Field::Email, "jane.x.com")]));
        assert_eq!(errors.get(Field::Email), Some(ValidationIssue::InvalidEmail));
    }

    #[test]
    fn phone_length_bounds() {
        assert!(!is_valid_phone("555123456"));
        assert!(is_valid_phone("5551234567"));
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(is_valid_phone("+1 555 123 4567"));
        assert!(is_valid_phone("123456789012345"));
        assert!(!is_valid_phone("1234567890123456"));
        assert!(!is_valid_phone("555.123.4567"));
        assert!(!is_valid_phone("555-CALL-NOW"));
    }

    #[test]
    fn phone_is_optional() {
        let base = [(Field::Name, "Jane"), (Field::Email, "jane@x.com")];
        assert!(validate_record(&record_with(&base)).is_empty());

        let errors = validate_record(&record_with(&[base[0], base[1], (Field::Phone, "12345")]));
        assert_eq!(errors.get(Field::Phone), Some(ValidationIssue::InvalidPhone));
    }
}

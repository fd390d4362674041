use std::fmt;

use indexmap::IndexMap;

use crate::Field;

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationIssue {
    /// Required field is empty after trimming.
    Required,
    /// Email does not look like `local@domain.tld`.
    InvalidEmail,
    /// Phone has characters other than digits and separators, or a bad length.
    InvalidPhone,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Required => "required",
            Self::InvalidEmail => "invalid email",
            Self::InvalidPhone => "invalid phone",
        };
        f.write_str(text)
    }
}

/// Per-field validation failures from the most recent submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: IndexMap<Field, ValidationIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, issue: ValidationIssue) {
        self.issues.insert(field, issue);
    }

    pub fn get(&self, field: Field) -> Option<ValidationIssue> {
        self.issues.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.issues.contains_key(&field)
    }

    /// Drop the entry for `field`. Returns whether one was present.
    pub fn clear_field(&mut self, field: Field) -> bool {
        self.issues.shift_remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, ValidationIssue)> + '_ {
        self.issues.iter().map(|(field, issue)| (*field, *issue))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(field, issue)| format!("{field}: {issue}")).collect();
        f.write_str(&parts.join(", "))
    }
}

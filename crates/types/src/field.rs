//! Form field names and the per-variant field schemas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named input on one of the lead forms.
///
/// The serialized form is the camelCase key the prospect API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    LastName,
    Email,
    Phone,
    Address,
    City,
    State,
    Postal,
    Message,
    Company,
    Country,
    Website,
    ServiceType,
    Link,
    ReturnFormat,
    Quantity,
    DeliveryTime,
}

const CONTACT_FIELDS: &[Field] = &[
    Field::Name,
    Field::LastName,
    Field::Email,
    Field::Phone,
    Field::Address,
    Field::City,
    Field::State,
    Field::Postal,
    Field::Message,
];

const QUOTE_FIELDS: &[Field] = &[
    Field::Name,
    Field::LastName,
    Field::Company,
    Field::Email,
    Field::Phone,
    Field::Website,
    Field::Address,
    Field::City,
    Field::State,
    Field::Postal,
    Field::Country,
    Field::ServiceType,
    Field::Link,
    Field::ReturnFormat,
    Field::Quantity,
    Field::DeliveryTime,
    Field::Message,
];

const REQUIRED_FIELDS: &[Field] = &[Field::Name, Field::Email];

impl Field {
    /// Wire name used in JSON payloads and remote records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::Postal => "postal",
            Self::Message => "message",
            Self::Company => "company",
            Self::Country => "country",
            Self::Website => "website",
            Self::ServiceType => "serviceType",
            Self::Link => "link",
            Self::ReturnFormat => "returnFormat",
            Self::Quantity => "quantity",
            Self::DeliveryTime => "deliveryTime",
        }
    }

    /// Free-form multi-line input.
    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::Message)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError(pub String);

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown form field '{}'", self.0)
    }
}

impl std::error::Error for ParseFieldError {}

impl FromStr for Field {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QUOTE_FIELDS
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ParseFieldError(s.to_string()))
    }
}

/// The form variants captured by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormKind {
    /// Short contact form: identity, address and a message.
    #[default]
    Contact,
    /// Quote request form with project details.
    Quote,
}

impl FormKind {
    /// Fields of this variant in display order.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::Contact => CONTACT_FIELDS,
            Self::Quote => QUOTE_FIELDS,
        }
    }

    /// Fields that must be non-empty before the form can be submitted.
    pub fn required_fields(&self) -> &'static [Field] {
        REQUIRED_FIELDS
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.fields().contains(&field)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Quote => "quote",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_fields_extend_contact_fields() {
        for field in FormKind::Contact.fields() {
            assert!(FormKind::Quote.has_field(*field), "quote form is missing {field}");
        }
        assert!(!FormKind::Contact.has_field(Field::Company));
    }

    #[test]
    fn wire_names_parse_back() {
        assert_eq!("lastName".parse::<Field>(), Ok(Field::LastName));
        assert_eq!("deliveryTime".parse::<Field>(), Ok(Field::DeliveryTime));
        assert!("last_name".parse::<Field>().is_err());
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_string(&Field::ServiceType).unwrap();
        assert_eq!(json, "\"serviceType\"");
    }
}

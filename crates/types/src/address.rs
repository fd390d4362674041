//! Geocoding wire types and the normalized address suggestion.

use serde::{Deserialize, Serialize};

/// One raw result from the geocoding provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodePlace {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub address: GeocodeAddress,
}

/// Structured address details attached to a [`GeocodePlace`].
///
/// The provider omits keys it has no value for, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeAddress {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
}

/// A candidate address the user can commit into a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSuggestion {
    /// Human readable label, verbatim from the provider.
    pub label: String,
    pub city: String,
    pub state: String,
    pub postal: String,
}

impl AddressSuggestion {
    /// Street portion of the label: the first comma-delimited segment.
    pub fn street(&self) -> &str {
        self.label.split(',').next().unwrap_or_default().trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_tolerates_missing_address_details() {
        let place: GeocodePlace = serde_json::from_str(r#"{"display_name":"Somewhere, USA"}"#).unwrap();
        assert_eq!(place.display_name, "Somewhere, USA");
        assert_eq!(place.address, GeocodeAddress::default());
    }

    #[test]
    fn street_is_first_label_segment() {
        let suggestion = AddressSuggestion {
            label: "123 Main St, Anytown, CA".into(),
            ..Default::default()
        };
        assert_eq!(suggestion.street(), "123 Main St");
    }
}

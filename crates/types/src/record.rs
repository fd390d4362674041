//! Field values for one form instance.

use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value};

use crate::{Field, FormKind};

/// Current values of every field of one form variant.
///
/// Keys are fixed at construction and always initialised to the empty
/// string; values are replaced, never appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    kind: FormKind,
    values: IndexMap<Field, String>,
}

impl FormRecord {
    pub fn new(kind: FormKind) -> Self {
        let values = kind.fields().iter().map(|field| (*field, String::new())).collect();
        Self { kind, values }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// Value of `field`, or the empty string when the field is not part of
    /// this variant.
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Overwrite `field`. Returns `false` (and changes nothing) when the
    /// field does not belong to this variant.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        match self.values.get_mut(&field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// True when every field is empty.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|value| value.is_empty())
    }

    /// Reset every field to the empty string.
    pub fn clear(&mut self) {
        self.values.values_mut().for_each(String::clear);
    }

    /// Copy values from a remote JSON object onto this record.
    ///
    /// Missing keys and `null` become the empty string; numbers and booleans
    /// are stringified; nested values are ignored.
    pub fn populate_from_json(&mut self, remote: &JsonMap<String, Value>) {
        for (field, slot) in self.values.iter_mut() {
            *slot = match remote.get(field.as_str()) {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Number(number)) => number.to_string(),
                Some(Value::Bool(flag)) => flag.to_string(),
                _ => String::new(),
            };
        }
    }

    /// Record as a JSON object keyed by wire names.
    pub fn to_json_map(&self) -> JsonMap<String, Value> {
        self.values
            .iter()
            .map(|(field, value)| (field.as_str().to_string(), Value::String(value.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_record_is_blank_with_fixed_keys() {
        let record = FormRecord::new(FormKind::Contact);
        assert!(record.is_blank());
        assert_eq!(record.iter().count(), FormKind::Contact.fields().len());
    }

    #[test]
    fn set_rejects_fields_outside_the_variant() {
        let mut record = FormRecord::new(FormKind::Contact);
        assert!(!record.set(Field::Company, "Acme"));
        assert_eq!(record.get(Field::Company), "");
        assert!(record.set(Field::Name, "John"));
        assert_eq!(record.get(Field::Name), "John");
    }

    #[test]
    fn populate_defaults_missing_values_to_empty() {
        let mut record = FormRecord::new(FormKind::Contact);
        record.set(Field::Message, "stale");
        let remote = json!({ "name": "Ana", "postal": 90210, "city": null });
        record.populate_from_json(remote.as_object().unwrap());
        assert_eq!(record.get(Field::Name), "Ana");
        assert_eq!(record.get(Field::Postal), "90210");
        assert_eq!(record.get(Field::City), "");
        assert_eq!(record.get(Field::Message), "");
    }
}

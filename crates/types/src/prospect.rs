use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a prospect record on the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProspectId(String);

impl ProspectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read the identifier from a remote prospect object (`id` or `_id`).
    pub fn from_record(record: &Value) -> Option<Self> {
        let raw = record.get("id").or_else(|| record.get("_id"))?;
        match raw {
            Value::String(text) if !text.is_empty() => Some(Self(text.clone())),
            Value::Number(number) => Some(Self(number.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for ProspectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_either_id_key() {
        assert_eq!(ProspectId::from_record(&json!({"id": 7})), Some(ProspectId::new("7")));
        assert_eq!(ProspectId::from_record(&json!({"_id": "abc"})), Some(ProspectId::new("abc")));
        assert_eq!(ProspectId::from_record(&json!({"name": "x"})), None);
    }
}

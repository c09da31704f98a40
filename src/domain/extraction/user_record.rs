//! User record produced by structured extraction.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Name under which the schema is declared to the provider.
pub const USER_RECORD_SCHEMA_NAME: &str = "user_info";

/// Strict JSON Schema for [`UserRecord`].
///
/// Strict structured output requires every property to be listed as required,
/// so optionality is expressed by allowing `null`.
pub static USER_RECORD_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": ["string", "null"] },
            "email": { "type": ["string", "null"] },
            "age": { "type": ["integer", "null"], "minimum": 0 }
        },
        "required": ["name", "email", "age"],
        "additionalProperties": false
    })
});

/// User information extracted from text.
///
/// Nothing is guaranteed by construction: any field may be missing or blank.
/// Callers go through [`PresenceOutcome`](super::PresenceOutcome) before
/// presenting it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

impl UserRecord {
    /// Creates a record from its parts.
    pub fn new(name: Option<String>, email: Option<String>, age: Option<u32>) -> Self {
        Self { name, email, age }
    }

    /// Decodes provider output text into a record.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Name, if present and not blank.
    pub fn present_name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    /// Email, if present and not blank.
    pub fn present_email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_record() {
        let record =
            UserRecord::from_json(r#"{"name":"John","email":"john@example.com","age":38}"#)
                .unwrap();
        assert_eq!(
            record,
            UserRecord::new(
                Some("John".to_string()),
                Some("john@example.com".to_string()),
                Some(38)
            )
        );
    }

    #[test]
    fn nulls_and_missing_keys_decode_as_none() {
        let record = UserRecord::from_json(r#"{"name":null,"email":"john@example.com"}"#).unwrap();
        assert_eq!(record.name, None);
        assert_eq!(record.age, None);
        assert_eq!(record.present_email(), Some("john@example.com"));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(UserRecord::from_json(r#"{"name":"John","phone":"555"}"#).is_err());
    }

    #[test]
    fn rejects_negative_age() {
        assert!(UserRecord::from_json(r#"{"name":"John","email":null,"age":-4}"#).is_err());
    }

    #[test]
    fn blank_text_is_not_present() {
        let record = UserRecord::new(Some("   ".to_string()), Some(String::new()), None);
        assert_eq!(record.present_name(), None);
        assert_eq!(record.present_email(), None);
    }

    #[test]
    fn present_values_are_trimmed() {
        let record = UserRecord::new(Some(" John ".to_string()), None, None);
        assert_eq!(record.present_name(), Some("John"));
    }

    #[test]
    fn schema_requires_every_property() {
        let required = USER_RECORD_SCHEMA["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
        assert_eq!(USER_RECORD_SCHEMA["additionalProperties"], Value::Bool(false));
    }
}

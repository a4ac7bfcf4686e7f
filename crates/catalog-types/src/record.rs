//! Opaque server record.
//!
//! The catalog backend owns the shape of a server entry. The client keeps
//! whatever JSON it receives and only reaches into it for the `id` field
//! (identity lookups) and a handful of display fields.

use serde::{Deserialize, Serialize};

use crate::ids::ServerId;

/// A server summary or detail record exactly as returned by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerRecord(serde_json::Value);

impl ServerRecord {
    /// Wrap a raw JSON payload.
    pub const fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// The record's identifier, if it carries an integer or string `id`.
    pub fn id(&self) -> Option<ServerId> {
        self.0.get("id").and_then(ServerId::from_json)
    }

    /// Whether the record's `id` field equals `id` exactly.
    pub fn has_id(&self, id: &ServerId) -> bool {
        self.0.get("id").is_some_and(|value| id.matches(value))
    }

    /// Look up a top-level field.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// The `name` field, when it is a string.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(serde_json::Value::as_str)
    }

    /// The `description` field, when it is a string.
    pub fn description(&self) -> Option<&str> {
        self.get("description").and_then(serde_json::Value::as_str)
    }

    /// The `version` field, when it is a string.
    pub fn version(&self) -> Option<&str> {
        self.get("version").and_then(serde_json::Value::as_str)
    }

    /// Borrow the raw payload.
    pub const fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    /// Return the raw payload.
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for ServerRecord {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_and_display_fields() {
        let record = ServerRecord::new(serde_json::json!({
            "id": 42,
            "name": "x",
            "description": "a test server",
            "version": "1.0.2"
        }));
        assert_eq!(record.id(), Some(ServerId::Numeric(42)));
        assert!(record.has_id(&ServerId::from(42)));
        assert!(!record.has_id(&ServerId::from("42")));
        assert_eq!(record.name(), Some("x"));
        assert_eq!(record.description(), Some("a test server"));
        assert_eq!(record.version(), Some("1.0.2"));
    }

    #[test]
    fn non_object_payload_has_no_id() {
        let record = ServerRecord::new(serde_json::json!([1, 2, 3]));
        assert_eq!(record.id(), None);
        assert_eq!(record.name(), None);
    }

    #[test]
    fn serializes_transparently() {
        let payload = serde_json::json!({"id": "alpha", "extra": {"nested": true}});
        let record: ServerRecord =
            serde_json::from_value(payload.clone()).unwrap_or_default();
        assert_eq!(record.as_json(), &payload);
        assert_eq!(serde_json::to_value(&record).unwrap_or_default(), payload);
    }
}

//! Server identifiers.
//!
//! The upstream catalog does not commit to a single identifier type: some
//! deployments hand out integer ids, others use namespaced names such as
//! `io.example/weather`. [`ServerId`] carries either form and compares them
//! strictly, so the number `1` never matches the string `"1"`.

use core::convert::Infallible;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifier of a server entry in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum ServerId {
    /// Integer identifier.
    Numeric(i64),
    /// Textual identifier (name, slug or UUID string).
    Text(String),
}

impl ServerId {
    /// Extract an identifier from a JSON value.
    ///
    /// Returns `None` for anything that is not an integer or a string.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(Self::Numeric),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Interpret a URL path segment.
    ///
    /// A segment becomes [`ServerId::Numeric`] only when it is the canonical
    /// spelling of an `i64`, so displaying the id reproduces the segment
    /// exactly. `007`, `+5` and `-0` stay [`ServerId::Text`].
    pub fn from_path_segment(segment: &str) -> Self {
        match segment.parse::<i64>() {
            Ok(n) if n.to_string() == segment => Self::Numeric(n),
            _ => Self::Text(segment.to_owned()),
        }
    }

    /// Whether this identifier matches the given JSON value exactly.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match (self, value) {
            (Self::Numeric(id), serde_json::Value::Number(n)) => n.as_i64() == Some(*id),
            (Self::Text(id), serde_json::Value::String(s)) => id == s,
            _ => false,
        }
    }
}

impl core::fmt::Display for ServerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl FromStr for ServerId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_path_segment(s))
    }
}

impl From<i64> for ServerId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for ServerId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<String> for ServerId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segment_parsing() {
        assert_eq!("42".parse::<ServerId>(), Ok(ServerId::Numeric(42)));
        assert_eq!(
            "io.example/weather".parse::<ServerId>(),
            Ok(ServerId::Text("io.example/weather".to_owned()))
        );
        assert_eq!("-7".parse::<ServerId>(), Ok(ServerId::Numeric(-7)));
    }

    #[test]
    fn non_canonical_numbers_stay_text() {
        for segment in ["007", "+5", "-0", "00"] {
            let id = ServerId::from_path_segment(segment);
            assert_eq!(id, ServerId::Text(segment.to_owned()));
            assert_eq!(id.to_string(), segment);
        }
        assert_eq!(ServerId::from_path_segment("0"), ServerId::Numeric(0));
    }

    #[test]
    fn matching_is_strict() {
        let numeric = ServerId::from(1);
        assert!(numeric.matches(&serde_json::json!(1)));
        assert!(!numeric.matches(&serde_json::json!("1")));

        let text = ServerId::from("1");
        assert!(text.matches(&serde_json::json!("1")));
        assert!(!text.matches(&serde_json::json!(1)));
        assert!(!text.matches(&serde_json::Value::Null));
    }

    #[test]
    fn from_json_rejects_non_scalar_ids() {
        assert_eq!(
            ServerId::from_json(&serde_json::json!(9)),
            Some(ServerId::Numeric(9))
        );
        assert_eq!(ServerId::from_json(&serde_json::json!(1.5)), None);
        assert_eq!(ServerId::from_json(&serde_json::json!({"id": 1})), None);
    }

    #[test]
    fn serde_untagged_round_trip() {
        let parsed: ServerId = serde_json::from_str("\"abc\"").unwrap_or(ServerId::Numeric(0));
        assert_eq!(parsed, ServerId::from("abc"));
        let json = serde_json::to_string(&ServerId::Numeric(5)).unwrap_or_default();
        assert_eq!(json, "5");
    }

    #[test]
    fn display_is_bare() {
        assert_eq!(ServerId::from(42).to_string(), "42");
        assert_eq!(ServerId::from("alpha").to_string(), "alpha");
    }
}

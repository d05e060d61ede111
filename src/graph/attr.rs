//! Attribute values for graph nodes and edges.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute map carried by nodes and edges.
pub type AttrMap = HashMap<String, AttrValue>;

/// An attribute value as found in the serialized graph.
///
/// Wiki exports carry free-form metadata per node and edge (titles,
/// namespaces, link counts); the engine never interprets these, it only
/// preserves them for the render adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl AttrValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttrValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get float value if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttrValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get boolean value if this is a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            AttrValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::String(s) => write!(f, "\"{}\"", s),
            AttrValue::Integer(i) => write!(f, "{}", i),
            AttrValue::Float(fl) => write!(f, "{}", fl),
            AttrValue::Boolean(b) => write!(f, "{}", b),
            AttrValue::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::String(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::String(s)
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Integer(i)
    }
}

impl From<f64> for AttrValue {
    fn from(f: f64) -> Self {
        AttrValue::Float(f)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let v: AttrValue = "Dragon".into();
        assert_eq!(v.as_string(), Some("Dragon"));
        assert_eq!(v.as_integer(), None);

        let v: AttrValue = 42i64.into();
        assert_eq!(v.as_integer(), Some(42));

        let v: AttrValue = 0.5.into();
        assert_eq!(v.as_float(), Some(0.5));

        assert!(AttrValue::Null.is_null());
    }

    #[test]
    fn test_untagged_json() {
        let v: AttrValue = serde_json::from_str("\"page\"").unwrap();
        assert_eq!(v.as_string(), Some("page"));
        let v: AttrValue = serde_json::from_str("7").unwrap();
        assert_eq!(v.as_integer(), Some(7));
        let v: AttrValue = serde_json::from_str("true").unwrap();
        assert_eq!(v.as_boolean(), Some(true));
    }
}

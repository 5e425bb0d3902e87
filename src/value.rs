//! Field value type shared by filters, validators, and objects.
//!
//! Gateway payloads are loosely typed: a card number arrives as a string, an
//! expiry month may arrive as a string or an integer, adapter options may be
//! booleans. `Value` is the uniform representation every pipeline stage
//! operates on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dynamically typed field value.
///
/// The `untagged` serde representation maps each variant onto its natural
/// JSON shape, so values can be lifted straight out of request payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicitly supplied null. Distinct from "never set" (see
    /// [`ValidatedObject::get_raw`](crate::ValidatedObject::get_raw)).
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    /// Returns `true` for null, the empty string, and the empty list.
    ///
    /// This is the emptiness test used by the optional-field short-circuit:
    /// `false` and `0` are deliberately non-empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Str(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Bool(_) | Value::Int(_) => false,
        }
    }

    /// Returns the contained string, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the contained integer, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                let mut first = true;
                for item in items {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness_follows_value_shape() {
        assert!(Value::Null.is_empty());
        assert!(Value::from("").is_empty());
        assert!(Value::List(vec![]).is_empty());

        assert!(!Value::from("0").is_empty());
        assert!(!Value::from(0).is_empty());
        assert!(!Value::from(false).is_empty());
        assert!(!Value::List(vec![Value::Null]).is_empty());
    }

    #[test]
    fn test_accessors_match_variant() {
        assert_eq!(Value::from("abc").as_str(), Some("abc"));
        assert_eq!(Value::from(42).as_int(), Some(42));
        assert_eq!(Value::from(true).as_bool(), Some(true));

        assert_eq!(Value::from("abc").as_int(), None);
        assert_eq!(Value::Null.as_str(), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let values = vec![
            Value::Null,
            Value::from(true),
            Value::from(12),
            Value::from("4111111111111111"),
            Value::List(vec![Value::from(1), Value::from("two")]),
        ];

        for value in values {
            let json = serde_json::to_string(&value).unwrap();
            let back: Value = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value);
        }
    }

    #[test]
    fn test_display_is_plain() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(7).to_string(), "7");
        assert_eq!(
            Value::List(vec![Value::from(1), Value::from(2)]).to_string(),
            "1, 2"
        );
    }
}

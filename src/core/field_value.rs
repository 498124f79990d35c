//! Argument values carried by a log call
//!
//! A log call takes an ordered list of [`FieldValue`]s. Their `Display` form is
//! used when the message is concatenated or substituted into a template; their
//! serde form is used when the JSON formatter writes arguments as records.

use serde::Serialize;
use std::fmt;

/// One argument of a log call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
    /// Arbitrary structured value, serialized as-is by the JSON formatter
    Json(serde_json::Value),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => f.write_str("null"),
            FieldValue::Json(serde_json::Value::String(s)) => f.write_str(s),
            FieldValue::Json(value) => write!(f, "{}", value),
        }
    }
}

impl FieldValue {
    /// Whether the value renders as text rather than as a number, bool or
    /// structure
    pub fn is_string(&self) -> bool {
        matches!(
            self,
            FieldValue::String(_) | FieldValue::Json(serde_json::Value::String(_))
        )
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<char> for FieldValue {
    fn from(c: char) -> Self {
        FieldValue::String(c.to_string())
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(i: $t) -> Self {
                FieldValue::Int(i as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(u: $t) -> Self {
                FieldValue::UInt(u as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        FieldValue::Json(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_default_stringification() {
        assert_eq!(FieldValue::from("plain").to_string(), "plain");
        assert_eq!(FieldValue::from(-42).to_string(), "-42");
        assert_eq!(FieldValue::from(7u64).to_string(), "7");
        assert_eq!(FieldValue::from(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::from(true).to_string(), "true");
        assert_eq!(FieldValue::from(None::<i32>).to_string(), "null");
    }

    #[test]
    fn test_json_display() {
        let value = FieldValue::from(serde_json::json!({"id": 1}));
        assert_eq!(value.to_string(), r#"{"id":1}"#);

        let value = FieldValue::from(serde_json::json!("bare"));
        assert_eq!(value.to_string(), "bare");
    }

    #[test]
    fn test_serialize_untagged() {
        assert_eq!(serde_json::to_string(&FieldValue::from("a")).unwrap(), "\"a\"");
        assert_eq!(serde_json::to_string(&FieldValue::from(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&FieldValue::Null).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&FieldValue::from(serde_json::json!([1, 2]))).unwrap(),
            "[1,2]"
        );
    }

    #[test]
    fn test_is_string() {
        assert!(FieldValue::from("x").is_string());
        assert!(FieldValue::from(serde_json::json!("x")).is_string());
        assert!(FieldValue::from('c').is_string());
        assert!(!FieldValue::from(1).is_string());
        assert!(!FieldValue::from(serde_json::json!({"a": 1})).is_string());
        assert!(!FieldValue::Null.is_string());
    }
}

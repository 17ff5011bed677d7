//! Log message payloads.
//!
//! A [`Message`] is either a primitive (text or number), a structured JSON
//! value, or an error-like record. Primitives are rendered as text with
//! optional prefixes; everything else is kept structured for sinks that can
//! handle it and serialized for those that cannot.

use std::fmt;

use serde::Serialize;
use serde_json::{Number, Value};

/// Payload of a single log call.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Plain text.
    Text(String),
    /// A number, rendered the way JSON renders it.
    Number(Number),
    /// Any non-primitive JSON value (object, array, bool, null).
    Structured(Value),
    /// An error with optional stack and context.
    Error(ErrorLike),
}

impl Message {
    /// Build a structured message from any serializable value.
    ///
    /// Values that fail to serialize degrade to their `Debug` text.
    pub fn structured<T>(value: &T) -> Self
    where
        T: Serialize + fmt::Debug + ?Sized,
    {
        match serde_json::to_value(value) {
            Ok(v) => Message::from(v),
            Err(_) => Message::Text(format!("{value:?}")),
        }
    }

    /// Whether this message is rendered directly (text or number).
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(self, Message::Text(_) | Message::Number(_))
    }

    /// The primitive text form, if any.
    #[must_use]
    pub fn as_primitive_text(&self) -> Option<String> {
        match self {
            Message::Text(s) => Some(s.clone()),
            Message::Number(n) => Some(n.to_string()),
            Message::Structured(_) | Message::Error(_) => None,
        }
    }

    /// Lossless JSON value for this message.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Message::Text(s) => Value::String(s.clone()),
            Message::Number(n) => Value::Number(n.clone()),
            Message::Structured(v) => v.clone(),
            Message::Error(e) => {
                serde_json::to_value(e).unwrap_or_else(|_| Value::String(e.to_string()))
            }
        }
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::Text(s.to_string())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::Text(s)
    }
}

impl From<&String> for Message {
    fn from(s: &String) -> Self {
        Message::Text(s.clone())
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Message {
                fn from(n: $t) -> Self {
                    Message::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Message {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or_else(|| Message::Text(n.to_string()), Message::Number)
    }
}

impl From<f32> for Message {
    fn from(n: f32) -> Self {
        Message::from(f64::from(n))
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Message::Text(s),
            Value::Number(n) => Message::Number(n),
            other => Message::Structured(other),
        }
    }
}

impl From<ErrorLike> for Message {
    fn from(e: ErrorLike) -> Self {
        Message::Error(e)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text(s) => f.write_str(s),
            Message::Number(n) => write!(f, "{n}"),
            Message::Structured(v) => write!(f, "{v}"),
            Message::Error(e) => write!(f, "{e}"),
        }
    }
}

/// An error reduced to data that can cross a sink boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorLike {
    /// Error kind or type name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Extra structured data attached by the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl ErrorLike {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: None,
            message: message.into(),
            stack: None,
            context: None,
        }
    }

    /// Capture a `std::error::Error`, recording its `source()` chain as the stack.
    #[must_use]
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(format!("caused by: {cause}"));
            source = cause.source();
        }

        Self {
            name: None,
            message: err.to_string(),
            stack: if causes.is_empty() {
                None
            } else {
                Some(causes.join("\n"))
            },
            context: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }
}

impl fmt::Display for ErrorLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitives_are_detected() {
        assert!(Message::from("hello").is_primitive());
        assert!(Message::from(42).is_primitive());
        assert!(Message::from(1.5).is_primitive());
        assert!(!Message::from(json!({"a": 1})).is_primitive());
        assert!(!Message::from(ErrorLike::new("boom")).is_primitive());
    }

    #[test]
    fn json_strings_and_numbers_become_primitives() {
        assert_eq!(Message::from(json!("text")), Message::Text("text".into()));
        assert_eq!(Message::from(json!(7)), Message::Number(7.into()));
        assert!(matches!(Message::from(json!([1, 2])), Message::Structured(_)));
        assert!(matches!(Message::from(json!(null)), Message::Structured(_)));
    }

    #[test]
    fn non_finite_floats_degrade_to_text() {
        assert_eq!(Message::from(f64::NAN), Message::Text("NaN".into()));
        assert_eq!(Message::from(f64::INFINITY), Message::Text("inf".into()));
    }

    #[test]
    fn structured_from_serializable() {
        #[derive(Debug, Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }
        let msg = Message::structured(&Point { x: 1, y: 2 });
        assert_eq!(msg, Message::Structured(json!({"x": 1, "y": 2})));
    }

    #[test]
    fn structured_falls_back_to_debug_text() {
        use std::collections::HashMap;
        // Non-string map keys cannot be represented in JSON.
        let mut map = HashMap::new();
        map.insert(vec![1u8], "v");
        let msg = Message::structured(&map);
        assert!(matches!(msg, Message::Text(ref s) if s.contains("[1]")));
    }

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("config load failed")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn error_like_captures_source_chain() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::NotFound, "disk gone"));
        let e = ErrorLike::from_error(&err);
        assert_eq!(e.message, "config load failed");
        assert_eq!(e.stack.as_deref(), Some("caused by: disk gone"));
    }

    #[test]
    fn error_like_serializes_without_empty_fields() {
        let e = ErrorLike::new("boom").with_name("IoError");
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v, json!({"name": "IoError", "message": "boom"}));
    }
}

//! A small JSON-like parser: a pull-based tokenizer feeding a recursive
//! descent parser that builds a [`Value`] tree.
//!
//! The accepted grammar is a strict subset of JSON. String literals are taken
//! verbatim between their quotes (no escape decoding) and numbers have no
//! exponent part.
//!
//! ```
//! use json_descent::{parse, Value};
//!
//! let value = parse(r#"{"name": "Elie", "tags": [1, 2]}"#).unwrap();
//! assert_eq!(value.get("name").and_then(Value::as_str), Some("Elie"));
//! assert_eq!(value.get("tags").and_then(Value::as_array).map(Vec::len), Some(2));
//! ```

use std::collections::HashMap;

mod options;
mod parse;
mod tokenize;

pub use options::{ParseOptions, STRICT_MAX_DEPTH};
pub use parse::{parse, parse_with, ParseError, Parser};
pub use tokenize::{Token, TokenType, TokenizeError, Tokenizer, Whitespace};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// literal characters `null`
    Null,

    /// literal characters `true` or `false`
    Boolean(bool),

    /// a number, either integer or with a fractional part
    Number(f64),

    /// the characters between a pair of double quotes, taken verbatim
    String(String),

    /// an array of values
    Array(Vec<Value>),

    /// an object with key-value pairs
    Object(HashMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` if this is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Looks up the element at `index` if this is an array.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|array| array.get(index))
    }
}

/// Failure categories shared by [`TokenizeError`] and [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A character that cannot begin any token
    UnexpectedCharacter,
    UnterminatedString,
    InvalidNumber,
    InvalidKeyword,
    /// A token the grammar does not allow at that position
    UnexpectedToken,
    /// A missing string key or colon inside an object
    ObjectSyntaxError,
    NestingTooDeep,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accessors() {
        let value = parse(r#"{"s": "x", "n": 2.5, "b": false, "z": null, "a": [true]}"#).unwrap();

        assert!(value.is_object());
        assert_eq!(value.get("s").and_then(Value::as_str), Some("x"));
        assert_eq!(value.get("n").and_then(Value::as_f64), Some(2.5));
        assert_eq!(value.get("b").and_then(Value::as_bool), Some(false));
        assert!(value.get("z").is_some_and(Value::is_null));
        assert_eq!(
            value.get("a").and_then(|a| a.get_index(0)),
            Some(&Value::Boolean(true))
        );
        assert_eq!(value.get("missing"), None);

        let s = value.get("s").unwrap();
        assert!(s.is_string());
        assert!(!s.is_number());
        assert_eq!(s.as_f64(), None);
        assert_eq!(s.get("s"), None);
        assert_eq!(s.get_index(0), None);
        assert!(value.get("a").is_some_and(Value::is_array));
        assert!(value.get("b").is_some_and(Value::is_boolean));
        assert!(value.get("n").is_some_and(Value::is_number));
    }
}

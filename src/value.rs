//! The in-memory value tree produced by the parser.
//!
//! Every grammar production maps onto one [`Value`] variant. Dictionaries keep
//! insertion order so that re-serialization is deterministic.

use indexmap::IndexMap;
use serde::Serialize;

/// An ordered mapping from keys to values. Keys are unique.
pub type Dictionary = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Dictionary(Dictionary),
}

impl Value {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Looks up `key` when this value is a dictionary.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_dictionary().and_then(|dict| dict.get(key))
    }

    /// Short name of the variant, used in log output.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Dictionary(_) => "dictionary",
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Dictionary> for Value {
    fn from(dict: Dictionary) -> Self {
        Value::Dictionary(dict)
    }
}

/// Returns true when `token` has the shape `-?\d+(\.\d+)?`.
///
/// The grammar does not separate numeric literals from barewords lexically, so
/// this check runs once on every scalar token after it has been read in full.
pub fn looks_numeric(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && fraction.map_or(true, all_digits)
}

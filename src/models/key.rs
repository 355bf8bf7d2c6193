//! Primary key values
//!
//! A record's identity is an integer or a string. Anything else found in the
//! primary-key field (null, false, 0, "", "0", a missing field) means the
//! record has no identity yet.
//!
//! A string holding a canonical integer ("5", "-12") is the same identity as
//! that integer, whether it comes from a stored field or the command line.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The identity of a persisted record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryKey {
    Int(i64),
    Text(String),
}

impl PrimaryKey {
    /// Read a primary key from a field value, returning `None` when the value
    /// counts as empty
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    (i != 0).then_some(Self::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Self::Text(u.to_string()))
                } else {
                    let f = n.as_f64()?;
                    if f == 0.0 {
                        None
                    } else if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                        Some(Self::Int(f as i64))
                    } else {
                        Some(Self::Text(n.to_string()))
                    }
                }
            }
            Value::String(s) if s.is_empty() || s == "0" => None,
            Value::String(s) => Some(Self::from_text(s)),
            _ => None,
        }
    }

    /// Integer key for canonical integer text, text key otherwise
    fn from_text(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(i) if i.to_string() == s => Self::Int(i),
            _ => Self::Text(s.to_string()),
        }
    }

    /// Read the primary key named `field` out of a nested record
    pub fn from_record(nested: &Value, field: &str) -> Option<Self> {
        nested.get(field).and_then(Self::from_value)
    }

    /// The JSON form stored in the primary-key field
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(i) => Value::from(*i),
            Self::Text(s) => Value::from(s.as_str()),
        }
    }

    /// Integer value, if this is an integer key
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for PrimaryKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_text(s))
    }
}

impl From<i64> for PrimaryKey {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for PrimaryKey {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

// used to print out readable forms of values and field types
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BreezeError, Result};

/// A dynamically typed value, as stored in an element or returned by a query.
///
/// Serialized untagged, so a database document reads and writes as plain JSON
/// scalars (`true`, `42`, `"text"`) rather than wrapped objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// The declared type of a field. Every element of the field holds a value of
/// this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Str,
    Int,
    Bool,
}

impl FieldType {
    /// Parse a raw type token as it appears in a CREATE FIELD statement.
    pub fn parse(token: &str) -> Result<Self> {
        match token.trim() {
            "str" | "string" => Ok(Self::Str),
            "int" => Ok(Self::Int),
            "bool" => Ok(Self::Bool),
            _ => Err(BreezeError::ArgumentType {
                token: token.to_owned(),
                expected: "a field type (str, int or bool)",
            }),
        }
    }

    /// Coerce a raw string token into a value of this type.
    pub fn coerce(&self, raw: &str) -> Result<Value> {
        match self {
            Self::Str => Ok(Value::Str(raw.to_owned())),
            Self::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| BreezeError::ArgumentType {
                    token: raw.to_owned(),
                    expected: "an integer",
                }),
            Self::Bool => match raw.trim() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(BreezeError::ArgumentType {
                    token: raw.to_owned(),
                    expected: "true or false",
                }),
            },
        }
    }

    /// The value an element of this type holds after being emptied.
    /// Elements are emptied rather than removed so that sibling fields
    /// stay index-aligned.
    pub fn empty_value(&self) -> Value {
        match self {
            Self::Str => Value::Str(String::new()),
            Self::Int => Value::Int(0),
            Self::Bool => Value::Bool(false),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Str => write!(f, "str"),
            Self::Int => write!(f, "int"),
            Self::Bool => write!(f, "bool"),
        }
    }
}

//! value representation
//!
//! A document contains the following data types
//! - boolean (true/false)
//! - integer (signed, i64)
//! - string (utf-8)
//! - list (of values)
//! - document (order-preserving "map", where the key is of type string)
//!
//! Additionally:
//! - there is no `null`/`None` value.
//! - there are no decimals. A float in the input is a type error, as is any integer outside of the i64 range.
//!
use crate::document::Document;
use crate::key_path::KeyPath;
use serde::{
    ser::{SerializeMap, SerializeSeq},
    Serializer,
};

/// All possible value types
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(try_from = "serde_yaml::Value")]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    String(String),
    List(Vec<Value>),
    Document(Document),
}

impl Value {
    /// Name of the value type, for log and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Document(_) => "document",
        }
    }

    /// Convert a generic yaml value found at `path`
    pub fn from_yaml(value: serde_yaml::Value, path: &KeyPath) -> Result<Value, ValueError> {
        use serde_yaml::Value as Yaml;

        let unsupported = |kind: &'static str| ValueError::Unsupported {
            path: path.to_string(),
            kind,
        };

        match value {
            Yaml::Bool(bool) => Ok(bool.into()),
            Yaml::Number(num) => {
                if let Some(int) = num.as_i64() {
                    return Ok(Value::Integer(int));
                }

                if num.is_f64() {
                    return Err(unsupported("float"));
                }

                Err(unsupported("out of bounds integer"))
            }
            Yaml::String(s) => Ok(s.into()),
            Yaml::Sequence(sequence) => sequence
                .into_iter()
                .enumerate()
                .map(|(index, element)| Value::from_yaml(element, &path.index(index)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Yaml::Mapping(mapping) => document_from_mapping(mapping, path).map(Value::Document),
            Yaml::Null => Err(unsupported("null")),
            Yaml::Tagged(_) => Err(unsupported("tagged value")),
        }
    }
}

/// Convert a yaml mapping found at `prefix` into a [Document]
pub fn document_from_mapping(
    mapping: serde_yaml::Mapping,
    prefix: &KeyPath,
) -> Result<Document, ValueError> {
    mapping
        .into_iter()
        .map(|(key, value)| {
            let serde_yaml::Value::String(key) = key else {
                return Err(ValueError::NonStringKey {
                    path: prefix.to_string(),
                    key: format!("{key:?}"),
                });
            };

            let value = Value::from_yaml(value, &prefix.join(&key))?;
            Ok((key, value))
        })
        .collect()
}

/// A value outside of the supported set of types
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValueError {
    #[error("unsupported value type `{kind}` at {path}")]
    Unsupported { path: String, kind: &'static str },
    #[error("unsupported key {key} in {path}, keys must be strings")]
    NonStringKey { path: String, key: String },
}

impl TryFrom<serde_yaml::Value> for Value {
    type Error = ValueError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        Value::from_yaml(value, &KeyPath::root())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Document(value)
    }
}

impl serde::ser::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Boolean(value) => serializer.serialize_bool(*value),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::List(value) => {
                let mut ser = serializer.serialize_seq(Some(value.len()))?;
                for element in value {
                    ser.serialize_element(element)?;
                }
                ser.end()
            }
            Value::Document(value) => {
                let mut ser = serializer.serialize_map(Some(value.len()))?;
                for (element_key, element_value) in value {
                    ser.serialize_entry(element_key, element_value)?;
                }
                ser.end()
            }
        }
    }
}

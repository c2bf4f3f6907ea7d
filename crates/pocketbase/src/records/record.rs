//! Validated record type.
//!
//! This module provides [`Record`], a type that guarantees the value is a
//! PocketBase record payload (a JSON object with a string `id` field).

use std::ops::Index;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, ValidationError};

/// Field holding the record identifier.
const ID_FIELD: &str = "id";

/// Field holding server-side expanded relations.
const EXPAND_FIELD: &str = "expand";

/// Returned by indexing a missing field.
static NULL: Value = Value::Null;

/// A single record: an ordered field mapping that always contains an `id`.
///
/// Field order is the order the server sent. These invariants are enforced
/// at construction and deserialization time:
/// - The value is a JSON object
/// - The object contains an `id` field
/// - The `id` field is a string
///
/// # Example
///
/// ```
/// use pocketbase::Record;
/// use serde_json::json;
///
/// let record = Record::new(json!({"id": "abc123", "title": "hello"})).unwrap();
/// assert_eq!(record.id(), "abc123");
/// assert_eq!(record["title"], "hello");
/// assert!(record["missing"].is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record(Map<String, Value>);

/// A relation resolved through `expand`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expanded {
    /// Single-valued relation.
    One(Record),
    /// Multi-valued relation, in server order.
    Many(Vec<Record>),
}

impl Record {
    /// Create a new `Record` from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the value is not an object with a
    /// string `id`.
    pub fn new(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Err(invalid("record must be a JSON object")),
        }
    }

    /// Create a new `Record` from a field mapping.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, Error> {
        match map.get(ID_FIELD) {
            Some(Value::String(_)) => Ok(Self(map)),
            Some(_) => Err(invalid("id field must be a string")),
            None => Err(invalid("record must contain an id field")),
        }
    }

    /// The record identifier.
    pub fn id(&self) -> &str {
        self.0
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Get a field from the record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the related record(s) expanded under `relation`, if the
    /// server resolved it and it holds well-formed records.
    pub fn expanded(&self, relation: &str) -> Option<Expanded> {
        let value = self.0.get(EXPAND_FIELD)?.get(relation)?;
        match value {
            Value::Array(items) => items
                .iter()
                .cloned()
                .map(Record::new)
                .collect::<Result<Vec<_>, _>>()
                .ok()
                .map(Expanded::Many),
            other => Record::new(other.clone()).ok().map(Expanded::One),
        }
    }

    /// Deserialize the record into a caller-defined type.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|e| {
            ValidationError::Record {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Get a reference to the field mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume and return the field mapping.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Consume and return the record as a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn invalid(reason: &str) -> Error {
    ValidationError::Record {
        reason: reason.to_string(),
    }
    .into()
}

impl Index<&str> for Record {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&NULL)
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Record::new(value).map_err(serde::de::Error::custom)
    }
}

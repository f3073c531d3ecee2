//! Heterogeneous result records.
//!
//! Every query defines its own output shape, so a [`Record`] is an ordered
//! mapping from the query's aliases to a tagged [`Value`] rather than a
//! fixed struct.

use std::collections::BTreeMap;

use serde_json::json;

/// A single value returned by the graph store.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Node {
        id: i64,
        labels: Vec<String>,
        properties: BTreeMap<String, Value>,
    },
    Relationship {
        id: i64,
        start: i64,
        end: i64,
        rel_type: String,
        properties: BTreeMap<String, Value>,
    },
}

impl Value {
    /// Convert to JSON for display. Nodes and relationships are reduced to
    /// their property mapping.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => json!(b),
            Value::Int(i) => json!(i),
            Value::Float(f) => json!(f),
            Value::String(s) => json!(s),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(map)
            | Value::Node {
                properties: map, ..
            }
            | Value::Relationship {
                properties: map, ..
            } => properties_to_json(map),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

fn properties_to_json(map: &BTreeMap<String, Value>) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

/// One row of a result set, keyed by alias.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, alias: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(alias, value);
        self
    }

    pub fn insert(&mut self, alias: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(alias.into(), value.into());
    }

    pub fn get(&self, alias: &str) -> Option<&Value> {
        self.fields.get(alias)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Plain alias → value mapping for display.
    pub fn to_json(&self) -> serde_json::Value {
        properties_to_json(&self.fields)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::DocKind;

/// Field name -> value, as exchanged with the host.
pub type FieldMap = BTreeMap<String, Value>;

/// Host truthiness: `null`, `""`, `0` and `false` are unset.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A transaction document as held by the editing session.
///
/// A missing key and an explicit `null` are different: missing keys are left
/// out of outbound payloads, `null` is sent as `null`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "doctype")]
    pub kind: DocKind,
    #[serde(flatten)]
    pub values: FieldMap,
}

impl TransactionRecord {
    pub fn new(kind: DocKind) -> Self {
        Self {
            kind,
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.values.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Non-empty string value of `field`.
    pub fn str(&self, field: &str) -> Option<&str> {
        match self.values.get(field) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn flag(&self, field: &str) -> bool {
        self.values.get(field).map(is_truthy).unwrap_or(false)
    }

    /// Write a value. Returns `true` when the stored value changed.
    pub fn set(&mut self, field: &str, value: Value) -> bool {
        match self.values.get(field) {
            Some(current) if *current == value => false,
            None if value.is_null() => {
                self.values.insert(field.to_string(), value);
                false
            }
            _ => {
                self.values.insert(field.to_string(), value);
                true
            }
        }
    }

    /// Write every entry of `values`, returning the fields that changed in
    /// key order.
    pub fn set_many(&mut self, values: &FieldMap) -> Vec<String> {
        let mut changed = Vec::new();
        for (field, value) in values {
            if self.set(field, value.clone()) {
                changed.push(field.clone());
            }
        }
        changed
    }
}

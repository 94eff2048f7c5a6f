//! Typed access to job variables

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as JsonValue};

use crate::error::JobError;

/// A job variable value with an explicit type tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Null,
    Boolean(bool),
    Number(Number),
    String(String),
    Array(Vec<JsonValue>),
    Object(Map<String, JsonValue>),
}

impl VariableValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            VariableValue::Null => "null",
            VariableValue::Boolean(_) => "boolean",
            VariableValue::Number(_) => "number",
            VariableValue::String(_) => "string",
            VariableValue::Array(_) => "array",
            VariableValue::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, VariableValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            VariableValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<JsonValue> for VariableValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => VariableValue::Null,
            JsonValue::Bool(b) => VariableValue::Boolean(b),
            JsonValue::Number(n) => VariableValue::Number(n),
            JsonValue::String(s) => VariableValue::String(s),
            JsonValue::Array(a) => VariableValue::Array(a),
            JsonValue::Object(o) => VariableValue::Object(o),
        }
    }
}

impl From<VariableValue> for JsonValue {
    fn from(value: VariableValue) -> Self {
        match value {
            VariableValue::Null => JsonValue::Null,
            VariableValue::Boolean(b) => JsonValue::Bool(b),
            VariableValue::Number(n) => JsonValue::Number(n),
            VariableValue::String(s) => JsonValue::String(s),
            VariableValue::Array(a) => JsonValue::Array(a),
            VariableValue::Object(o) => JsonValue::Object(o),
        }
    }
}

/// Borrowed view over a job's variable map
#[derive(Debug, Clone, Copy)]
pub struct JobVariables<'a> {
    inner: &'a Map<String, JsonValue>,
}

impl<'a> JobVariables<'a> {
    pub fn new(inner: &'a Map<String, JsonValue>) -> Self {
        Self { inner }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> {
        let inner = self.inner;
        inner.keys().map(String::as_str)
    }

    /// Raw value of a variable; absent variables read as `Null`
    pub fn value(&self, name: &str) -> VariableValue {
        self.inner
            .get(name)
            .cloned()
            .map(VariableValue::from)
            .unwrap_or(VariableValue::Null)
    }

    /// Extract a variable that must be present and non-null
    pub fn require<T: DeserializeOwned>(&self, name: &str) -> Result<T, JobError> {
        match self.inner.get(name) {
            None => Err(JobError::mapping(name, "variable is missing")),
            Some(JsonValue::Null) => Err(JobError::mapping(name, "variable is null")),
            Some(value) => convert(name, value),
        }
    }

    /// Extract a variable that may be absent or null
    pub fn optional<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, JobError> {
        match self.inner.get(name) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(value) => convert(name, value).map(Some),
        }
    }

    /// Deserialize the whole variable map into a struct
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T, JobError> {
        T::deserialize(&JsonValue::Object(self.inner.clone()))
            .map_err(|e| JobError::mapping("*", e.to_string()))
    }
}

fn convert<T: DeserializeOwned>(name: &str, value: &JsonValue) -> Result<T, JobError> {
    T::deserialize(value).map_err(|e| {
        JobError::mapping(
            name,
            format!(
                "cannot convert {} value: {}",
                VariableValue::from(value.clone()).type_name(),
                e
            ),
        )
    })
}

//! GraphQL request and response envelopes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Whether a document reads or mutates engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperationKind {
    #[default]
    Query,
    Mutation,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A GraphQL document with its operation name and variable bindings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    pub variables: Map<String, JsonValue>,
    #[serde(skip)]
    pub kind: OperationKind,
}

impl GraphqlRequest {
    pub fn query(document: impl Into<String>) -> Self {
        Self {
            query: document.into(),
            operation_name: None,
            variables: Map::new(),
            kind: OperationKind::Query,
        }
    }

    pub fn mutation(document: impl Into<String>) -> Self {
        Self {
            kind: OperationKind::Mutation,
            ..Self::query(document)
        }
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Bind a single variable
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Merge every key of a JSON object into the variable bindings
    ///
    /// Non-object values are ignored.
    pub fn with_variables(mut self, variables: JsonValue) -> Self {
        if let JsonValue::Object(map) = variables {
            self.variables.extend(map);
        }
        self
    }

    /// Operation name, falling back to the kind for logging
    pub fn display_name(&self) -> &str {
        self.operation_name
            .as_deref()
            .unwrap_or_else(|| self.kind.as_str())
    }
}

/// Raw GraphQL response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphqlError>,
}

/// A single entry of a GraphQL `errors` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<JsonValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<JsonValue>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            locations: None,
            extensions: None,
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::variables::JobVariables;

/// A unit of automated work delivered by the dispatcher
///
/// Only `key`, `job_type` and `variables` matter to handlers; the rest is
/// informational and may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub key: i64,
    #[serde(rename = "type")]
    pub job_type: String,
    #[serde(default)]
    pub variables: Map<String, JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_instance_key: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker: Option<String>,
}

impl Job {
    pub fn new(key: i64, job_type: impl Into<String>) -> Self {
        Self {
            key,
            job_type: job_type.into(),
            variables: Map::new(),
            process_instance_key: None,
            element_id: None,
            retries: None,
            worker: None,
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Replace the variables with a JSON object; other values clear them
    pub fn with_variables(mut self, variables: JsonValue) -> Self {
        self.variables = match variables {
            JsonValue::Object(map) => map,
            _ => Map::new(),
        };
        self
    }

    /// Typed view over the job's variables
    pub fn variables(&self) -> JobVariables<'_> {
        JobVariables::new(&self.variables)
    }
}

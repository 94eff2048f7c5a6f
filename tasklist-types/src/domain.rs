use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::enums::TaskState;
use crate::ids::TaskId;

/// A unit of human work tracked by the engine
///
/// Only `id` is guaranteed to be present: the tasklist queries use different
/// selection sets, so every other field defaults when the response omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub task_definition_id: Option<String>,
    #[serde(default)]
    pub process_definition_id: Option<String>,
    #[serde(default)]
    pub process_name: Option<String>,
    #[serde(default)]
    pub process_instance_id: Option<String>,
    #[serde(default)]
    pub creation_time: Option<String>,
    #[serde(default)]
    pub completion_time: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_groups: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_state: Option<TaskState>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort_values: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_first: bool,
    #[serde(default)]
    pub form_key: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variables: Vec<Variable>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    pub fn is_assigned(&self) -> bool {
        self.assignee.is_some()
    }

    /// Look up a variable by name
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

/// A process variable attached to a task
///
/// `value` is always JSON text, whatever the variable's original type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub preview_value: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_value_truncated: bool,
}

impl Variable {
    /// Decode the JSON text held in `value`
    pub fn parse_value(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::from_str(&self.value)
    }
}

/// Write-side variable submitted with `completeTask`
///
/// Only built through [`from_raw`](Self::from_raw) or
/// [`from_json`](Self::from_json), so `value` is always JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableInput {
    name: String,
    value: String,
}

impl VariableInput {
    /// Build an input from a raw string, encoding it as a JSON string
    pub fn from_raw(name: impl Into<String>, raw: &str) -> Self {
        Self::from_json(name, &JsonValue::String(raw.to_string()))
    }

    /// Build an input from any JSON value
    pub fn from_json(name: impl Into<String>, value: &JsonValue) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encoded JSON text
    pub fn value(&self) -> &str {
        &self.value
    }
}

// The engine sends explicit nulls for lists and flags it did not resolve.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_task_deserialization() {
        let raw = json!({
            "id": "2251799813685251",
            "name": "Review order",
            "taskDefinitionId": "review",
            "processName": "Order process",
            "creationTime": "2023-01-24T10:00:00.000+0000",
            "completionTime": null,
            "assignee": null,
            "variables": [{
                "id": "2251799813685249-amount",
                "name": "amount",
                "value": "42",
                "previewValue": "42",
                "isValueTruncated": false
            }],
            "sortValues": ["1674554400000", "2251799813685251"],
            "isFirst": true,
            "formKey": "camunda-forms:bpmn:userTaskForm_1",
            "processDefinitionId": "2251799813685249",
            "candidateGroups": ["accounting"]
        });

        let task: Task = serde_json::from_value(raw).unwrap();
        assert_eq!(task.id, "2251799813685251");
        assert!(!task.is_completed());
        assert!(!task.is_assigned());
        assert_eq!(task.candidate_groups, Some(vec!["accounting".to_string()]));
        assert_eq!(task.sort_values.len(), 2);
        assert!(task.is_first);
        assert_eq!(task.variable("amount").unwrap().parse_value().unwrap(), json!(42));
    }

    #[test]
    fn test_reduced_task_deserialization() {
        let raw = json!({
            "id": "7",
            "formKey": null,
            "processDefinitionId": "1",
            "assignee": "demo",
            "name": "Approve",
            "candidateGroups": null,
            "processName": "Approval",
            "creationTime": "2023-01-24T10:00:00.000+0000",
            "completionTime": "2023-01-24T11:00:00.000+0000"
        });

        let task: Task = serde_json::from_value(raw).unwrap();
        assert_eq!(task.assignee.as_deref(), Some("demo"));
        assert!(task.is_completed());
        assert!(task.variables.is_empty());
        assert!(task.task_state.is_none());
    }

    #[test]
    fn test_null_lists_and_flags_default() {
        let raw = json!({"id": "9", "sortValues": null, "isFirst": null, "variables": null});
        let task: Task = serde_json::from_value(raw).unwrap();
        assert!(task.sort_values.is_empty());
        assert!(!task.is_first);
        assert!(task.variables.is_empty());
    }

    #[test]
    fn test_variable_input_encodes_raw_strings() {
        let input = VariableInput::from_raw("x", "hello");
        assert_eq!(input.name(), "x");
        assert_eq!(input.value(), "\"hello\"");

        let input = VariableInput::from_raw("quoted", "say \"hi\"");
        assert_eq!(input.value(), r#""say \"hi\"""#);

        let input = VariableInput::from_json("n", &json!(3));
        assert_eq!(input.value(), "3");
        assert_eq!(serde_json::to_value(&input).unwrap(), json!({"name": "n", "value": "3"}));
    }
}

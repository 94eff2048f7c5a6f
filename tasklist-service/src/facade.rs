//! GraphQL-backed implementation of [`TaskService`]

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tasklist_client::{ClientProvider, GraphqlRequest};
use tasklist_types::{Task, TaskQuery, TaskState, VariableInput};
use tracing::{debug, info};

use crate::documents::*;
use crate::error::{TaskServiceError, TaskServiceResult};
use crate::service::TaskService;
use crate::unwrap::unwrap_field;

/// Builds tasklist queries and mutations and maps their responses
///
/// Holds only the client provider; a transport handle is acquired for every
/// operation and dropped when it returns.
#[derive(Clone)]
pub struct TaskQueryFacade {
    provider: Arc<dyn ClientProvider>,
}

impl TaskQueryFacade {
    pub fn new(provider: Arc<dyn ClientProvider>) -> Self {
        Self { provider }
    }

    /// Convenience constructor taking the provider by value
    pub fn with_provider<P: ClientProvider + 'static>(provider: P) -> Self {
        Self::new(Arc::new(provider))
    }

    /// Send one request and unwrap the named field of its `data`
    async fn execute<T: DeserializeOwned>(
        &self,
        request: GraphqlRequest,
        field: &str,
    ) -> TaskServiceResult<Option<T>> {
        let client = self.provider.client().await?;
        let data = client.send(&request).await?;

        unwrap_field(data, field).map_err(|source| TaskServiceError::Mapping {
            field: field.to_string(),
            source,
        })
    }

    /// Run a `tasks` query with the given filter object as its variables
    async fn query_tasks(
        &self,
        document: &str,
        operation_name: &str,
        filter: TaskQuery,
    ) -> TaskServiceResult<Vec<Task>> {
        let variables = serde_json::to_value(&filter).map_err(|source| TaskServiceError::Mapping {
            field: TASKS_FIELD.to_string(),
            source,
        })?;

        let request = GraphqlRequest::query(document)
            .with_operation_name(operation_name)
            .with_variables(variables);

        let tasks: Vec<Task> = self.execute(request, TASKS_FIELD).await?.unwrap_or_default();
        debug!("'{}' returned {} task(s)", operation_name, tasks.len());
        Ok(tasks)
    }

    /// Complete a task with pre-encoded variable inputs
    pub async fn complete_task_with_inputs(
        &self,
        task_id: &str,
        variables: Vec<VariableInput>,
    ) -> TaskServiceResult<Option<Task>> {
        info!("Completing task {} with {} variable(s)", task_id, variables.len());

        let request = GraphqlRequest::mutation(COMPLETE_TASK_MUTATION)
            .with_operation_name(COMPLETE_TASK_OPERATION)
            .with_variables(json!({
                "taskId": task_id,
                "variables": variables,
            }));

        self.execute(request, COMPLETE_TASK_FIELD).await
    }
}

impl std::fmt::Debug for TaskQueryFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueryFacade").finish_non_exhaustive()
    }
}

#[async_trait]
impl TaskService for TaskQueryFacade {
    async fn fetch_all_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        self.query_tasks(
            ALL_TASKS_QUERY,
            TASKS_OPERATION,
            TaskQuery::new().with_state(TaskState::Created),
        )
        .await
    }

    async fn get_task(&self, task_id: &str) -> TaskServiceResult<Option<Task>> {
        debug!("Fetching task {}", task_id);

        let request = GraphqlRequest::query(TASK_QUERY)
            .with_operation_name(TASK_OPERATION)
            .with_variable("id", task_id);

        self.execute(request, TASK_FIELD).await
    }

    async fn get_tasks_by_process_instance(
        &self,
        process_instance_id: &str,
    ) -> TaskServiceResult<Vec<Task>> {
        self.query_tasks(
            TASKS_BY_PROCESS_INSTANCE_QUERY,
            TASKS_BY_PROCESS_INSTANCE_OPERATION,
            TaskQuery::new().with_process_instance_id(process_instance_id),
        )
        .await
    }

    async fn get_tasks_by_user(&self, user: &str) -> TaskServiceResult<Vec<Task>> {
        self.query_tasks(
            TASKS_BY_ASSIGNEE_QUERY,
            TASKS_BY_ASSIGNEE_OPERATION,
            TaskQuery::new()
                .with_assignee(user)
                .with_state(TaskState::Created),
        )
        .await
    }

    async fn get_completed_tasks(&self, user: &str) -> TaskServiceResult<Vec<Task>> {
        debug!(
            "Listing completed tasks; assignee '{}' is not applied as a filter",
            user
        );

        self.query_tasks(
            COMPLETED_TASKS_QUERY,
            TASKS_BY_ASSIGNEE_OPERATION,
            TaskQuery::new().with_state(TaskState::Completed),
        )
        .await
    }

    async fn claim_task(&self, task_id: &str, user: &str) -> TaskServiceResult<Option<Task>> {
        info!("Claiming task {} for {}", task_id, user);

        let request = GraphqlRequest::mutation(CLAIM_TASK_MUTATION)
            .with_operation_name(CLAIM_TASK_OPERATION)
            .with_variable("taskId", task_id)
            .with_variable("assignee", user);

        self.execute(request, CLAIM_TASK_FIELD).await
    }

    async fn unclaim_task(&self, task_id: &str) -> TaskServiceResult<Option<Task>> {
        info!("Unclaiming task {}", task_id);

        let request = GraphqlRequest::mutation(UNCLAIM_TASK_MUTATION)
            .with_operation_name(UNCLAIM_TASK_OPERATION)
            .with_variable("taskId", task_id);

        self.execute(request, UNCLAIM_TASK_FIELD).await
    }

    async fn complete_task(
        &self,
        task_id: &str,
        variables: &HashMap<String, String>,
    ) -> TaskServiceResult<Option<Task>> {
        let mut inputs: Vec<VariableInput> = variables
            .iter()
            .map(|(name, raw)| VariableInput::from_raw(name.clone(), raw))
            .collect();
        inputs.sort_by(|a, b| a.name().cmp(b.name()));

        self.complete_task_with_inputs(task_id, inputs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tasklist_client::{GraphqlError, MockTransport, OperationKind, StaticClientProvider};

    fn facade_with(mock: &MockTransport) -> TaskQueryFacade {
        TaskQueryFacade::with_provider(StaticClientProvider::new(mock.clone()))
    }

    #[tokio::test]
    async fn test_fetch_all_tasks_filters_created() {
        let mock = MockTransport::new();
        mock.add_response(
            "tasks",
            json!({"tasks": [
                {"id": "1", "name": "Review", "completionTime": null},
                {"id": "2", "name": "Approve", "completionTime": null}
            ]}),
        );

        let tasks = facade_with(&mock).fetch_all_tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| !t.is_completed()));

        let request = mock.last_request().unwrap();
        assert_eq!(request.kind, OperationKind::Query);
        assert_eq!(request.query, ALL_TASKS_QUERY);
        assert_eq!(serde_json::Value::Object(request.variables), json!({"state": "CREATED"}));
    }

    #[tokio::test]
    async fn test_get_task_found_and_absent() {
        let mock = MockTransport::with_handler(|request| {
            let id = request.variables["id"].as_str().unwrap_or_default().to_string();
            if id == "known" {
                Ok(json!({"task": {"id": id, "candidateGroups": ["ops"]}}))
            } else {
                Ok(json!({"task": null}))
            }
        });
        let facade = facade_with(&mock);

        let task = facade.get_task("known").await.unwrap().unwrap();
        assert_eq!(task.id, "known");
        assert_eq!(task.candidate_groups, Some(vec!["ops".to_string()]));

        assert!(facade.get_task("missing").await.unwrap().is_none());
        assert_eq!(mock.requests()[1].operation_name.as_deref(), Some("task"));
    }

    #[tokio::test]
    async fn test_missing_data_is_empty_not_error() {
        let mock = MockTransport::new();
        mock.add_response("getTasksByProcessInstanceId", serde_json::Value::Null);

        let tasks = facade_with(&mock)
            .get_tasks_by_process_instance("123")
            .await
            .unwrap();
        assert!(tasks.is_empty());
        assert_eq!(
            serde_json::Value::Object(mock.last_request().unwrap().variables),
            json!({"processInstanceId": "123"})
        );
    }

    #[tokio::test]
    async fn test_get_tasks_by_user_binds_assignee_and_state() {
        let mock = MockTransport::new();
        mock.add_response("getTasksByAssignee", json!({"tasks": [{"id": "5", "assignee": "demo"}]}));

        let tasks = facade_with(&mock).get_tasks_by_user("demo").await.unwrap();
        assert_eq!(tasks[0].assignee.as_deref(), Some("demo"));

        let request = mock.last_request().unwrap();
        assert_eq!(request.query, TASKS_BY_ASSIGNEE_QUERY);
        assert_eq!(
            serde_json::Value::Object(request.variables),
            json!({"assignee": "demo", "state": "CREATED"})
        );
    }

    #[tokio::test]
    async fn test_get_completed_tasks_ignores_user() {
        let mock = MockTransport::new();
        mock.add_response(
            "getTasksByAssignee",
            json!({"tasks": [{"id": "8", "assignee": "someone-else", "completionTime": "2023-01-24T11:00:00.000+0000"}]}),
        );

        let tasks = facade_with(&mock).get_completed_tasks("demo").await.unwrap();
        assert!(tasks.iter().all(Task::is_completed));

        let request = mock.last_request().unwrap();
        assert_eq!(request.query, COMPLETED_TASKS_QUERY);
        assert_eq!(serde_json::Value::Object(request.variables), json!({"state": "COMPLETED"}));
    }

    #[tokio::test]
    async fn test_claim_and_unclaim_are_mutations() {
        let mock = MockTransport::new();
        mock.add_response(
            "claimTask",
            json!({"claimTask": {"id": "1", "assignee": "demo", "taskState": "CREATED"}}),
        );
        mock.add_response(
            "unclaimTask",
            json!({"unclaimTask": {"id": "1", "assignee": null, "taskState": "CREATED"}}),
        );
        let facade = facade_with(&mock);

        let claimed = facade.claim_task("1", "demo").await.unwrap().unwrap();
        assert_eq!(claimed.assignee.as_deref(), Some("demo"));
        assert_eq!(claimed.task_state, Some(TaskState::Created));

        let claim_request = mock.last_request().unwrap();
        assert_eq!(claim_request.kind, OperationKind::Mutation);
        assert_eq!(
            serde_json::Value::Object(claim_request.variables),
            json!({"taskId": "1", "assignee": "demo"})
        );

        let unclaimed = facade.unclaim_task("1").await.unwrap().unwrap();
        assert!(unclaimed.assignee.is_none());
        assert_eq!(
            serde_json::Value::Object(mock.last_request().unwrap().variables),
            json!({"taskId": "1"})
        );
    }

    #[tokio::test]
    async fn test_complete_task_encodes_values_as_json_strings() {
        let mock = MockTransport::new();
        mock.add_response(
            "completeTask",
            json!({"completeTask": {"id": "1", "completionTime": "2023-01-24T11:00:00.000+0000"}}),
        );

        let variables = HashMap::from([
            ("x".to_string(), "hello".to_string()),
            ("amount".to_string(), "42".to_string()),
        ]);
        let task = facade_with(&mock)
            .complete_task("1", &variables)
            .await
            .unwrap()
            .unwrap();
        assert!(task.is_completed());

        let request = mock.last_request().unwrap();
        assert_eq!(request.query, COMPLETE_TASK_MUTATION);
        assert_eq!(
            request.variables["variables"],
            json!([
                {"name": "amount", "value": "\"42\""},
                {"name": "x", "value": "\"hello\""}
            ])
        );
    }

    #[tokio::test]
    async fn test_complete_task_with_inputs_sends_json_text() {
        let mock = MockTransport::new();
        mock.add_response("completeTask", json!({"completeTask": {"id": "1"}}));

        let inputs = vec![
            VariableInput::from_json("order", &json!({"id": "A-1", "qty": 2})),
            VariableInput::from_raw("note", "rush"),
        ];
        facade_with(&mock)
            .complete_task_with_inputs("1", inputs)
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.variables["taskId"], "1");
        assert_eq!(
            request.variables["variables"],
            json!([
                {"name": "order", "value": "{\"id\":\"A-1\",\"qty\":2}"},
                {"name": "note", "value": "\"rush\""}
            ])
        );
    }

    #[tokio::test]
    async fn test_protocol_errors_pass_through() {
        let mock = MockTransport::new();
        mock.add_errors("claimTask", vec![GraphqlError::new("Task is already assigned")]);

        let err = facade_with(&mock).claim_task("1", "demo").await.unwrap_err();
        assert!(err.is_protocol());
        assert_eq!(err.to_string(), "GraphQL error: Task is already assigned");
    }

    #[tokio::test]
    async fn test_malformed_field_is_mapping_error() {
        let mock = MockTransport::new();
        mock.add_response("tasks", json!({"tasks": {"id": "not-a-list"}}));

        let err = facade_with(&mock).fetch_all_tasks().await.unwrap_err();
        assert!(matches!(err, TaskServiceError::Mapping { ref field, .. } if field == "tasks"));
    }

    #[tokio::test]
    async fn test_non_object_data_is_mapping_error() {
        let mock = MockTransport::new();
        mock.add_response("getTasksByAssignee", json!([{"id": "1"}]));

        let err = facade_with(&mock).get_tasks_by_user("demo").await.unwrap_err();
        assert!(matches!(err, TaskServiceError::Mapping { ref field, .. } if field == "tasks"));
    }
}

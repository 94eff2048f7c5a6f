//! GraphQL documents sent by the facade
//!
//! Operation and field names are the remote schema's; changing any of them
//! breaks compatibility with the engine.

macro_rules! variable_fields {
    () => {
        "variables { id name value previewValue isValueTruncated }"
    };
}

// Full selection without candidateGroups/taskState; operations append those.
macro_rules! full_task_fields {
    () => {
        concat!(
            "id name taskDefinitionId processName creationTime completionTime assignee ",
            variable_fields!(),
            " sortValues isFirst formKey processDefinitionId"
        )
    };
}

macro_rules! reduced_task_fields {
    () => {
        "id formKey processDefinitionId assignee name candidateGroups processName creationTime completionTime"
    };
}

/// Response field holding a task list
pub const TASKS_FIELD: &str = "tasks";
pub const TASK_FIELD: &str = "task";
pub const CLAIM_TASK_FIELD: &str = "claimTask";
pub const UNCLAIM_TASK_FIELD: &str = "unclaimTask";
pub const COMPLETE_TASK_FIELD: &str = "completeTask";

pub const TASKS_OPERATION: &str = "tasks";
pub const TASK_OPERATION: &str = "task";
pub const TASKS_BY_PROCESS_INSTANCE_OPERATION: &str = "getTasksByProcessInstanceId";
pub const TASKS_BY_ASSIGNEE_OPERATION: &str = "getTasksByAssignee";
pub const CLAIM_TASK_OPERATION: &str = "claimTask";
pub const UNCLAIM_TASK_OPERATION: &str = "unclaimTask";
pub const COMPLETE_TASK_OPERATION: &str = "completeTask";

pub const ALL_TASKS_QUERY: &str = concat!(
    "query tasks($state: TaskState!) { tasks(query: {state: $state}) { ",
    full_task_fields!(),
    " } }"
);

pub const TASK_QUERY: &str = concat!(
    "query task($id: String!) { task(id: $id) { ",
    full_task_fields!(),
    " candidateGroups } }"
);

pub const TASKS_BY_PROCESS_INSTANCE_QUERY: &str = concat!(
    "query getTasksByProcessInstanceId($processInstanceId: String!) { ",
    "tasks(query: {processInstanceId: $processInstanceId}) { ",
    full_task_fields!(),
    " candidateGroups } }"
);

pub const TASKS_BY_ASSIGNEE_QUERY: &str = concat!(
    "query getTasksByAssignee($assignee: String!, $state: TaskState!) { ",
    "tasks(query: {assignee: $assignee, state: $state}) { ",
    reduced_task_fields!(),
    " } }"
);

// Same operation name as TASKS_BY_ASSIGNEE_QUERY, filtered by state only.
pub const COMPLETED_TASKS_QUERY: &str = concat!(
    "query getTasksByAssignee($state: TaskState!) { ",
    "tasks(query: {state: $state}) { ",
    reduced_task_fields!(),
    " } }"
);

pub const CLAIM_TASK_MUTATION: &str = concat!(
    "mutation claimTask($taskId: String!, $assignee: String) { ",
    "claimTask(taskId: $taskId, assignee: $assignee) { ",
    full_task_fields!(),
    " taskState candidateGroups } }"
);

pub const UNCLAIM_TASK_MUTATION: &str = concat!(
    "mutation unclaimTask($taskId: String!) { ",
    "unclaimTask(taskId: $taskId) { ",
    full_task_fields!(),
    " taskState candidateGroups } }"
);

pub const COMPLETE_TASK_MUTATION: &str = concat!(
    "mutation completeTask($taskId: String!, $variables: [VariableInput!]!) { ",
    "completeTask(taskId: $taskId, variables: $variables) { ",
    full_task_fields!(),
    " candidateGroups } }"
);

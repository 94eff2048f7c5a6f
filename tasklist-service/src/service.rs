//! Task service interface
//!
//! Abstracts the tasklist operations so callers can depend on the trait and
//! substitute their own implementation in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tasklist_types::Task;

use crate::error::TaskServiceResult;

/// Operations over the engine's human tasks
///
/// Every call is one independent round trip; implementations keep no state
/// between calls.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// All tasks in state CREATED
    async fn fetch_all_tasks(&self) -> TaskServiceResult<Vec<Task>>;

    /// A single task by id, `None` if the engine does not know it
    async fn get_task(&self, task_id: &str) -> TaskServiceResult<Option<Task>>;

    /// Tasks belonging to a process instance
    async fn get_tasks_by_process_instance(
        &self,
        process_instance_id: &str,
    ) -> TaskServiceResult<Vec<Task>>;

    /// Open tasks assigned to `user`
    async fn get_tasks_by_user(&self, user: &str) -> TaskServiceResult<Vec<Task>>;

    /// Completed tasks
    ///
    /// `user` is accepted but not applied as a filter: all completed tasks are
    /// returned regardless of assignee.
    async fn get_completed_tasks(&self, user: &str) -> TaskServiceResult<Vec<Task>>;

    /// Assign a task to `user`
    async fn claim_task(&self, task_id: &str, user: &str) -> TaskServiceResult<Option<Task>>;

    /// Remove the current assignee of a task
    async fn unclaim_task(&self, task_id: &str) -> TaskServiceResult<Option<Task>>;

    /// Complete a task, submitting each raw value JSON-encoded as a string
    async fn complete_task(
        &self,
        task_id: &str,
        variables: &HashMap<String, String>,
    ) -> TaskServiceResult<Option<Task>>;
}

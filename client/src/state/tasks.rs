//! Task list state for the tasks board.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use model::{Task, TaskStatus};
use uuid::Uuid;

/// Tasks as last fetched from `/api/tasks`.
#[derive(Clone, Debug, Default)]
pub struct TasksState {
    pub items: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TasksState {
    /// Tasks in one status column, in fetch order.
    pub fn by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.items.iter().filter(|task| task.status == status).cloned().collect()
    }

    /// Insert or replace a task returned by a mutation.
    pub fn upsert(&mut self, task: Task) {
        match self.items.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => *existing = task,
            None => self.items.push(task),
        }
    }

    pub fn remove(&mut self, task_id: Uuid) {
        self.items.retain(|task| task.id != task_id);
    }
}

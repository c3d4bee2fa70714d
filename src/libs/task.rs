use super::error::{LabelLinkError, StorageError, TaskPartialError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    /// Unix seconds, assigned by the store on insert.
    pub opened: i64,
    /// Unix seconds, `0` while the task is open.
    pub closed: i64,
    pub author_id: Option<i64>,
    pub assigned_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub labels: Vec<i64>,
}

impl Task {
    pub fn new(title: &str, content: &str) -> Self {
        Task {
            title: title.to_string(),
            content: content.to_string(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author_id: i64) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn with_assignee(mut self, assigned_id: i64) -> Self {
        self.assigned_id = Some(assigned_id);
        self
    }

    pub fn with_labels(mut self, labels: &[i64]) -> Self {
        self.labels = labels.to_vec();
        self
    }
}

/// Outcome of a committed task write.
///
/// The task row is always persisted when a `TaskWrite` is returned; `failures`
/// lists the label associations that could not be written. Hard failures are
/// returned as `Err` instead and leave no trace in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWrite {
    pub task_id: i64,
    pub failures: Vec<LabelLinkError>,
}

impl TaskWrite {
    pub fn new(task_id: i64, failures: Vec<LabelLinkError>) -> Self {
        TaskWrite { task_id, failures }
    }

    /// Every requested label was attached as well.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Folds label failures into the error channel.
    pub fn into_result(self) -> Result<i64, StorageError> {
        if self.failures.is_empty() {
            Ok(self.task_id)
        } else {
            Err(StorageError::Partial(TaskPartialError {
                task_id: self.task_id,
                errors: self.failures,
            }))
        }
    }
}

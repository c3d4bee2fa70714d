//! Display implementation for tasklink messages.
//!
//! All user-facing text is defined here, in one match, so wording stays
//! consistent between the demo and the listing commands.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === DATABASE MESSAGES ===
            Message::DatabaseOpened(path) => format!("Using database: {}", path),
            Message::InMemoryDatabase => "Using an in-memory database".to_string(),
            Message::ConfigMissing(error) => format!("Database is not configured: {}", error),

            // === USER MESSAGES ===
            Message::UserCreated(name, id) => format!("User '{}' added (ID {})", name, id),
            Message::UserRejected(name, reason) => format!("User '{}' was not added: {}", name, reason),
            Message::UserRenamed(id, name) => format!("User {} renamed to '{}'", id, name),
            Message::UserDeleted(id) => format!("User {} deleted", id),
            Message::UsersHeader => "Users:".to_string(),
            Message::NoUsersFound => "No users found.".to_string(),

            // === LABEL MESSAGES ===
            Message::LabelCreated(name, id) => format!("Label '{}' added (ID {})", name, id),
            Message::LabelRejected(name, reason) => format!("Label '{}' was not added: {}", name, reason),
            Message::LabelRenamed(id, name) => format!("Label {} renamed to '{}'", id, name),
            Message::LabelsHeader => "Labels:".to_string(),
            Message::NoLabelsFound => "No labels found.".to_string(),

            // === TASK MESSAGES ===
            Message::TaskCreated(id) => format!("Task created (ID {})", id),
            Message::TaskCreatedPartially(id, failures) => {
                format!("Task created (ID {}) with label errors:{}", id, failures)
            }
            Message::TaskRejected(title, reason) => format!("Task '{}' was not created: {}", title, reason),
            Message::TaskUpdated(id) => format!("Task {} updated", id),
            Message::TaskUpdatedPartially(id, failures) => {
                format!("Task {} updated with label errors:{}", id, failures)
            }
            Message::TaskUpdateRejected(id, reason) => format!("Task {} was not updated: {}", id, reason),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskDeleteFailed(id, reason) => format!("Task {} was not deleted: {}", id, reason),
            Message::TasksHeader => "Tasks:".to_string(),
            Message::TasksByAuthorHeader(id) => format!("Tasks by author {}:", id),
            Message::TasksByLabelHeader(id) => format!("Tasks with label {}:", id),
            Message::NoTasksFound => "No tasks found.".to_string(),

            // === ASSOCIATION MESSAGES ===
            Message::LabelAttached(label, task) => format!("Label {} attached to task {}", label, task),
            Message::LabelAttachFailed(label, task, reason) => {
                format!("Label {} was not attached to task {}: {}", label, task, reason)
            }
            Message::LabelDetached(label, task) => format!("Label {} detached from task {}", label, task),
            Message::LabelDetachFailed(label, task, reason) => {
                format!("Label {} was not detached from task {}: {}", label, task, reason)
            }

            // === DEMO MESSAGES ===
            Message::DemoSection(title) => format!("--- {} ---", title),
            Message::DemoFinished => "Demo finished".to_string(),
        };

        write!(f, "{}", text)
    }
}

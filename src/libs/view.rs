use crate::db::labels::Label;
use crate::db::users::User;
use crate::libs::task::Task;
use chrono::DateTime;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn users(users: &[User]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME"]);
        for user in users {
            table.add_row(row![user.id, user.name]);
        }
        table.printstd();
    }

    pub fn labels(labels: &[Label]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME"]);
        for label in labels {
            table.add_row(row![label.id, label.name]);
        }
        table.printstd();
    }

    pub fn tasks(tasks: &[Task]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "OPENED", "CLOSED", "AUTHOR", "ASSIGNED", "TITLE", "CONTENT", "LABELS"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                format_timestamp(task.opened),
                format_timestamp(task.closed),
                format_id(task.author_id),
                format_id(task.assigned_id),
                task.title,
                task.content,
                format_labels(&task.labels)
            ]);
        }
        table.printstd();
    }
}

/// Renders unix seconds as UTC; `0` means "not set".
pub fn format_timestamp(seconds: i64) -> String {
    if seconds == 0 {
        return "-".to_string();
    }
    match DateTime::from_timestamp(seconds, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => seconds.to_string(),
    }
}

pub fn format_id(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn format_labels(labels: &[i64]) -> String {
    labels.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}

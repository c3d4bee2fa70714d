//! Schema bootstrap for the tasklink database.
//!
//! Creates the four tables and their indices if they are missing. All
//! statements run in one transaction, so a failure leaves the database as it
//! was. There is no versioning: the statements are idempotent and run on
//! every open.
//!
//! ## Tables
//!
//! - `users`, `labels`: plain `(id, name)` entities
//! - `tasks`: references `users` twice (author and assignee), both nullable
//! - `tasks_labels`: junction table, one row per task/label pair

use crate::libs::error::{DbContext, Result};
use rusqlite::Connection;

const SCHEMA_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
)";

const SCHEMA_LABELS: &str = "CREATE TABLE IF NOT EXISTS labels (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
)";

/// Author and assignee stay `NULL` until set; both must name an existing user.
const SCHEMA_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY,
    opened INTEGER NOT NULL DEFAULT (CAST(strftime('%s', 'now') AS INTEGER)),
    closed INTEGER NOT NULL DEFAULT 0,
    author_id INTEGER REFERENCES users(id),
    assigned_id INTEGER REFERENCES users(id),
    title TEXT NOT NULL DEFAULT '',
    content TEXT NOT NULL DEFAULT ''
)";

/// The composite key makes a second insert of the same pair a constraint violation.
const SCHEMA_TASKS_LABELS: &str = "CREATE TABLE IF NOT EXISTS tasks_labels (
    task_id INTEGER NOT NULL REFERENCES tasks(id),
    label_id INTEGER NOT NULL REFERENCES labels(id),
    PRIMARY KEY (task_id, label_id)
)";

const INDICES: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_tasks_author_id ON tasks(author_id)",
    "CREATE INDEX IF NOT EXISTS idx_tasks_assigned_id ON tasks(assigned_id)",
    "CREATE INDEX IF NOT EXISTS idx_tasks_labels_label_id ON tasks_labels(label_id)",
];

pub fn init(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction().db_context("begin schema bootstrap")?;

    for statement in [SCHEMA_USERS, SCHEMA_LABELS, SCHEMA_TASKS, SCHEMA_TASKS_LABELS]
        .into_iter()
        .chain(INDICES)
    {
        tx.execute(statement, []).db_context("create schema")?;
    }

    tx.commit().db_context("commit schema bootstrap")?;
    tracing::debug!("database schema is ready");
    Ok(())
}

/// Lists user tables, used to check the bootstrap.
pub fn table_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
        .db_context("list tables")?;
    let names = stmt
        .query_map([], |row| row.get(0))
        .db_context("list tables")?
        .collect::<rusqlite::Result<Vec<String>>>()
        .db_context("list tables")?;
    Ok(names)
}

//! Task persistence and label synchronization.
//!
//! Every task write runs inside one SQLite transaction. Author and assignee
//! problems are hard failures: the transaction is dropped and nothing is
//! stored. Label problems are soft: the task is committed with the labels
//! that could be attached, and the rest are reported in [`TaskWrite`].
//!
//! ## Label classification
//!
//! | Cause                              | Result                              |
//! |------------------------------------|-------------------------------------|
//! | label ID not in `labels`           | [`LabelLinkError::MissingLabel`]    |
//! | pair already in `tasks_labels`     | [`LabelLinkError::DuplicateLabel`]  |
//! | foreign key fails on insert        | [`LabelLinkError::LabelOrTaskMissing`] |
//! | any other driver error             | `StorageError::Database`, rollback  |
//!
//! Missing labels are detected with an existence check inside the
//! transaction and skipped. The remaining IDs are inserted one by one, so a
//! duplicate in the requested list yields a `DuplicateLabel` for the second
//! occurrence while the first is kept.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasklink::db::{db::Db, tasks::Tasks};
//! use tasklink::libs::task::Task;
//!
//! let mut db = Db::open_in_memory()?;
//! let mut tasks = Tasks::new(&mut db.conn);
//! let write = tasks.create(&Task::new("Fix login", "Button does nothing").with_labels(&[1, 2]))?;
//! for failure in &write.failures {
//!     println!("{}", failure);
//! }
//! # Ok::<(), tasklink::libs::error::StorageError>(())
//! ```

use super::{labels, users};
use crate::libs::error::{
    violation, DbContext, Entity, LabelLinkError, Result, StorageError, Violation,
};
use crate::libs::task::{Task, TaskWrite};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_TASK: &str = "INSERT INTO tasks (author_id, assigned_id, title, content) VALUES (?1, ?2, ?3, ?4)";
const SELECT_AUTHOR: &str = "SELECT author_id FROM tasks WHERE id = ?1";
/// Guarded by `author_id IS NULL` so an author is only ever set once.
const SET_AUTHOR_ONCE: &str = "UPDATE tasks SET author_id = ?2 WHERE id = ?1 AND author_id IS NULL";
/// Never touches `author_id`.
const UPDATE_TASK: &str = "UPDATE tasks SET assigned_id = ?2, title = ?3, content = ?4 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
/// Tasks with their label IDs folded into one comma-separated column.
const SELECT_TASKS: &str = "
    SELECT t.id, t.opened, t.closed, t.author_id, t.assigned_id, t.title, t.content,
           GROUP_CONCAT(tl.label_id)
    FROM tasks t
    LEFT JOIN tasks_labels tl ON t.id = tl.task_id
";
const GROUP_BY_TASK: &str = "GROUP BY t.id ORDER BY t.id ASC";
const INSERT_TASK_LABEL: &str = "INSERT INTO tasks_labels (task_id, label_id) VALUES (?1, ?2)";
const DELETE_TASK_LABEL: &str = "DELETE FROM tasks_labels WHERE task_id = ?1 AND label_id = ?2";
const DELETE_ALL_TASK_LABELS: &str = "DELETE FROM tasks_labels WHERE task_id = ?1";

pub struct Tasks<'a> {
    conn: &'a mut Connection,
}

impl<'a> Tasks<'a> {
    pub fn new(conn: &'a mut Connection) -> Self {
        Tasks { conn }
    }

    /// Inserts a task and attaches its labels in one transaction.
    ///
    /// Fails as a whole with [`StorageError::AuthorOrAssigneeMissing`] when
    /// the author or assignee is not a known user. Label failures are
    /// returned in [`TaskWrite::failures`] and do not prevent the commit.
    pub fn create(&mut self, task: &Task) -> Result<TaskWrite> {
        let title = task.title.trim();
        let content = task.content.trim();

        let tx = self.conn.transaction().db_context("begin task create")?;

        let (present, mut failures) = check_labels(&tx, &task.labels)?;

        if let Err(err) = tx.execute(INSERT_TASK, params![task.author_id, task.assigned_id, title, content]) {
            return Err(match violation(&err) {
                Some(Violation::ForeignKey) => StorageError::AuthorOrAssigneeMissing {
                    author_id: task.author_id,
                    assigned_id: task.assigned_id,
                },
                _ => StorageError::Database {
                    context: format!("insert task '{}'", title),
                    source: err,
                },
            });
        }
        let task_id = tx.last_insert_rowid();

        failures.extend(link_labels(&tx, task_id, &present)?);

        tx.commit().with_db_context(|| format!("commit task {}", task_id))?;
        Ok(TaskWrite::new(task_id, failures))
    }

    /// Rewrites assignee, title, content and the full label set of a task.
    ///
    /// The author can only be set while the stored author is empty; any
    /// attempt to replace an existing author fails with
    /// [`StorageError::ImmutableAuthor`]. Passing `None` keeps the stored
    /// author. Labels are replaced wholesale, not diffed.
    pub fn update(&mut self, task: &Task) -> Result<TaskWrite> {
        let tx = self.conn.transaction().with_db_context(|| format!("begin update of task {}", task.id))?;

        let current_author: Option<i64> = tx
            .query_row(SELECT_AUTHOR, params![task.id], |row| row.get(0))
            .optional()
            .with_db_context(|| format!("select author of task {}", task.id))?
            .ok_or_else(|| StorageError::not_found(Entity::Task, task.id))?;

        match (current_author, task.author_id) {
            (Some(current), Some(requested)) if current != requested => {
                return Err(StorageError::ImmutableAuthor {
                    task_id: task.id,
                    current,
                    requested,
                });
            }
            (None, Some(requested)) => {
                if !users::exists(&tx, requested)? {
                    return Err(StorageError::AuthorMissing(requested));
                }
                tx.execute(SET_AUTHOR_ONCE, params![task.id, requested])
                    .with_db_context(|| format!("set author of task {}", task.id))?;
            }
            _ => {}
        }

        if let Some(assigned_id) = task.assigned_id {
            if !users::exists(&tx, assigned_id)? {
                return Err(StorageError::AssigneeMissing(assigned_id));
            }
        }

        let (present, mut failures) = check_labels(&tx, &task.labels)?;

        let affected = tx
            .execute(
                UPDATE_TASK,
                params![task.id, task.assigned_id, task.title.trim(), task.content.trim()],
            )
            .with_db_context(|| format!("update task {}", task.id))?;
        if affected == 0 {
            return Err(StorageError::not_found(Entity::Task, task.id));
        }

        tx.execute(DELETE_ALL_TASK_LABELS, params![task.id])
            .with_db_context(|| format!("clear labels of task {}", task.id))?;
        failures.extend(link_labels(&tx, task.id, &present)?);

        tx.commit().with_db_context(|| format!("commit task {}", task.id))?;
        Ok(TaskWrite::new(task.id, failures))
    }

    /// Removes a task together with its label associations.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let tx = self.conn.transaction().with_db_context(|| format!("begin delete of task {}", id))?;

        tx.execute(DELETE_ALL_TASK_LABELS, params![id])
            .with_db_context(|| format!("delete labels of task {}", id))?;
        let affected = tx
            .execute(DELETE_TASK, params![id])
            .with_db_context(|| format!("delete task {}", id))?;
        if affected == 0 {
            // Dropping the transaction restores the association rows.
            return Err(StorageError::not_found(Entity::Task, id));
        }

        tx.commit().with_db_context(|| format!("commit delete of task {}", id))?;
        Ok(())
    }

    /// Attach a single label to a task outside of any transaction.
    pub fn add_label(&mut self, label_id: i64, task_id: i64) -> Result<()> {
        match link_label(&*self.conn, task_id, label_id)? {
            None => Ok(()),
            Some(LabelLinkError::DuplicateLabel { task_id, label_id }) => {
                Err(StorageError::DuplicateLabel { task_id, label_id })
            }
            Some(_) => Err(StorageError::LabelOrTaskMissing { task_id, label_id }),
        }
    }

    /// Detach a single label from a task.
    pub fn remove_label(&mut self, label_id: i64, task_id: i64) -> Result<()> {
        let affected = self
            .conn
            .execute(DELETE_TASK_LABEL, params![task_id, label_id])
            .with_db_context(|| format!("detach label {} from task {}", label_id, task_id))?;
        if affected == 0 {
            return Err(StorageError::AssociationNotFound { task_id, label_id });
        }
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<Task>> {
        self.fetch("", None, "select tasks")
    }

    pub fn list_by_author(&self, author_id: i64) -> Result<Vec<Task>> {
        self.fetch("WHERE t.author_id = ?1", Some(author_id), "select tasks by author")
    }

    /// Tasks carrying the label, each with its full label set.
    pub fn list_by_label(&self, label_id: i64) -> Result<Vec<Task>> {
        self.fetch(
            "WHERE t.id IN (SELECT task_id FROM tasks_labels WHERE label_id = ?1)",
            Some(label_id),
            "select tasks by label",
        )
    }

    pub fn get_by_id(&self, id: i64) -> Result<Task> {
        self.fetch("WHERE t.id = ?1", Some(id), "select task")?
            .pop()
            .ok_or_else(|| StorageError::not_found(Entity::Task, id))
    }

    /// One round trip per call: labels come back with their task row.
    fn fetch(&self, filter: &str, param: Option<i64>, context: &str) -> Result<Vec<Task>> {
        let sql = format!("{} {} {}", SELECT_TASKS, filter, GROUP_BY_TASK);
        let mut stmt = self.conn.prepare(&sql).db_context(context)?;
        let rows = match param {
            Some(value) => stmt.query_map(params![value], task_from_row),
            None => stmt.query_map([], task_from_row),
        }
        .db_context(context)?;

        let tasks = rows.collect::<rusqlite::Result<Vec<Task>>>().db_context(context)?;
        Ok(tasks)
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        opened: row.get(1)?,
        closed: row.get(2)?,
        author_id: row.get(3)?,
        assigned_id: row.get(4)?,
        title: row.get(5)?,
        content: row.get(6)?,
        labels: parse_label_ids(row.get(7)?)?,
    })
}

/// Splits the `GROUP_CONCAT` column into sorted label IDs.
fn parse_label_ids(joined: Option<String>) -> rusqlite::Result<Vec<i64>> {
    let Some(joined) = joined else {
        return Ok(Vec::new());
    };
    let mut ids = joined
        .split(',')
        .map(|id| id.trim().parse::<i64>())
        .collect::<std::result::Result<Vec<i64>, _>>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(err)))?;
    ids.sort_unstable();
    Ok(ids)
}

/// Splits the requested labels into existing IDs and `MissingLabel` failures.
fn check_labels(conn: &Connection, label_ids: &[i64]) -> Result<(Vec<i64>, Vec<LabelLinkError>)> {
    let mut present = Vec::with_capacity(label_ids.len());
    let mut missing = Vec::new();
    for &label_id in label_ids {
        if labels::exists(conn, label_id)? {
            present.push(label_id);
        } else {
            missing.push(LabelLinkError::MissingLabel { label_id });
        }
    }
    Ok((present, missing))
}

fn link_labels(conn: &Connection, task_id: i64, label_ids: &[i64]) -> Result<Vec<LabelLinkError>> {
    let mut failures = Vec::new();
    for &label_id in label_ids {
        if let Some(failure) = link_label(conn, task_id, label_id)? {
            failures.push(failure);
        }
    }
    Ok(failures)
}

/// Inserts one association row. Constraint violations come back as `Ok(Some(_))`.
fn link_label(conn: &Connection, task_id: i64, label_id: i64) -> Result<Option<LabelLinkError>> {
    match conn.execute(INSERT_TASK_LABEL, params![task_id, label_id]) {
        Ok(_) => Ok(None),
        Err(err) => match violation(&err) {
            Some(Violation::Unique) => Ok(Some(LabelLinkError::DuplicateLabel { task_id, label_id })),
            Some(Violation::ForeignKey) => Ok(Some(LabelLinkError::LabelOrTaskMissing { task_id, label_id })),
            None => Err(StorageError::Database {
                context: format!("attach label {} to task {}", label_id, task_id),
                source: err,
            }),
        },
    }
}

//! Error taxonomy for the storage layer.
//!
//! Every failure the library can report is a variant of [`StorageError`].
//! Callers switch on [`StorageError::kind`] instead of comparing error
//! identities, and label association problems that do not abort a task write
//! are carried separately as [`LabelLinkError`] values.
//!
//! ## Severity
//!
//! - **Validation**: bad input, rejected before the store is touched
//! - **NotFound**: update/delete target absent
//! - **Referential**: author/assignee problems, always abort the operation
//! - **Association**: single-statement label link failures
//! - **Partial**: the task was written, some label links were not
//! - **Database**: anything unexpected from SQLite, always fatal

use rusqlite::ffi;
use std::fmt;
use thiserror::Error;

/// Coarse discriminator for [`StorageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Referential,
    Association,
    Partial,
    Database,
}

/// The kind of row an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Label,
    Task,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::User => "user",
            Entity::Label => "label",
            Entity::Task => "task",
        };
        f.write_str(name)
    }
}

/// Name validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name is empty")]
    Empty,
    #[error("name '{0}' may only contain Cyrillic letters and spaces")]
    InvalidAlphabet(String),
    #[error("label name is empty")]
    EmptyLabel,
}

/// A single label association that could not be written for a task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelLinkError {
    #[error("label {label_id} does not exist")]
    MissingLabel { label_id: i64 },
    #[error("label {label_id} is already attached to task {task_id}")]
    DuplicateLabel { task_id: i64, label_id: i64 },
    #[error("task {task_id} or label {label_id} does not exist")]
    LabelOrTaskMissing { task_id: i64, label_id: i64 },
}

impl LabelLinkError {
    pub fn label_id(&self) -> i64 {
        match self {
            LabelLinkError::MissingLabel { label_id }
            | LabelLinkError::DuplicateLabel { label_id, .. }
            | LabelLinkError::LabelOrTaskMissing { label_id, .. } => *label_id,
        }
    }
}

/// Aggregate of label failures for a task that was nevertheless committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_partial(.task_id, .errors))]
pub struct TaskPartialError {
    pub task_id: i64,
    pub errors: Vec<LabelLinkError>,
}

fn render_partial(task_id: &i64, errors: &[LabelLinkError]) -> String {
    let mut text = format!("task {} saved with {} label error(s)", task_id, errors.len());
    for err in errors {
        text.push_str(&format!("\n\t- {}", err));
    }
    text
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    InvalidName(#[from] NameError),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: Entity, id: i64 },

    #[error("label {label_id} is not attached to task {task_id}")]
    AssociationNotFound { task_id: i64, label_id: i64 },

    #[error("author {} or assignee {} does not exist", fmt_id(.author_id), fmt_id(.assigned_id))]
    AuthorOrAssigneeMissing {
        author_id: Option<i64>,
        assigned_id: Option<i64>,
    },

    #[error("author {0} does not exist")]
    AuthorMissing(i64),

    #[error("assignee {0} does not exist")]
    AssigneeMissing(i64),

    #[error("author cannot be changed: task {task_id} belongs to author {current}, got {requested}")]
    ImmutableAuthor { task_id: i64, current: i64, requested: i64 },

    #[error("label {label_id} is already attached to task {task_id}")]
    DuplicateLabel { task_id: i64, label_id: i64 },

    #[error("task {task_id} or label {label_id} does not exist")]
    LabelOrTaskMissing { task_id: i64, label_id: i64 },

    #[error("{0}")]
    Partial(TaskPartialError),

    #[error("{context}: {source}")]
    Database {
        context: String,
        #[source]
        source: rusqlite::Error,
    },
}

fn fmt_id(id: &Option<i64>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => "<none>".to_string(),
    }
}

pub type Result<T, E = StorageError> = std::result::Result<T, E>;

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::InvalidName(_) => ErrorKind::Validation,
            StorageError::NotFound { .. } | StorageError::AssociationNotFound { .. } => ErrorKind::NotFound,
            StorageError::AuthorOrAssigneeMissing { .. }
            | StorageError::AuthorMissing(_)
            | StorageError::AssigneeMissing(_)
            | StorageError::ImmutableAuthor { .. } => ErrorKind::Referential,
            StorageError::DuplicateLabel { .. } | StorageError::LabelOrTaskMissing { .. } => ErrorKind::Association,
            StorageError::Partial(_) => ErrorKind::Partial,
            StorageError::Database { .. } => ErrorKind::Database,
        }
    }

    pub fn not_found(entity: Entity, id: i64) -> Self {
        StorageError::NotFound { entity, id }
    }

    /// True for errors a batch driver may report and skip.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Database)
    }
}

/// Attaches operation context to a raw driver error.
pub trait DbContext<T> {
    fn db_context<C: Into<String>>(self, context: C) -> Result<T>;

    fn with_db_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T> DbContext<T> for rusqlite::Result<T> {
    fn db_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|source| StorageError::Database {
            context: context.into(),
            source,
        })
    }

    fn with_db_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|source| StorageError::Database {
            context: f().into(),
            source,
        })
    }
}

/// Constraint a failed statement tripped, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    ForeignKey,
    Unique,
}

/// Classifies a rusqlite error by its extended SQLite result code.
pub fn violation(err: &rusqlite::Error) -> Option<Violation> {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation => {
            match e.extended_code {
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(Violation::ForeignKey),
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Some(Violation::Unique),
                _ => None,
            }
        }
        _ => None,
    }
}

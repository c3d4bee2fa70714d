//! # Tasklink
//!
//! A data-access layer for users, labels and tasks stored in SQLite, with
//! a many-to-many relation between tasks and labels.
//!
//! ## Features
//!
//! - **Entity Store**: Users and labels with validated, normalized names
//! - **Transactional Task Writes**: Create, update and delete in one transaction each
//! - **Partial Success**: A task is saved even when some of its labels cannot be attached,
//!   and every failed label is reported with its cause
//! - **Typed Errors**: One error enum with a kind discriminator instead of sentinel values
//! - **Demo CLI**: A scripted walkthrough and listing commands
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasklink::storage::{Storage, Store};
//! use tasklink::db::{labels::Label, users::User};
//! use tasklink::libs::task::Task;
//!
//! let mut store = Store::open("tasks.db")?;
//! let author = store.new_user(&User::new("Иван Иванов"))?;
//! let idea = store.new_label(&Label::new("Идея"))?;
//! let task = Task::new("Notifications", "Notify users").with_author(author).with_labels(&[idea]);
//! let task_id = store.new_task(&task)?.into_result()?;
//! # Ok::<(), tasklink::libs::error::StorageError>(())
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod storage;

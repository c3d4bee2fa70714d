//! Database layer for tasklink.
//!
//! Built on SQLite through `rusqlite`. Each entity has its own module with
//! the SQL it needs; [`db::Db`] owns the connection and bootstraps the schema.
//!
//! ## Features
//!
//! - **Connection Setup**: Foreign keys enabled on every connection
//! - **Entity Store**: Users and labels with normalized names
//! - **Task Engine**: Transactional task writes with per-label failure reporting
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasklink::db::{db::Db, users::Users, labels::Labels};
//!
//! let db = Db::open_in_memory()?;
//! let author = Users::new(&db.conn).create("иван иванов")?;
//! let urgent = Labels::new(&db.conn).create("Срочно")?;
//! # Ok::<(), tasklink::libs::error::StorageError>(())
//! ```
//!
//! ## Transactions
//!
//! User and label writes are single statements and run without a
//! transaction. Task create, update and delete each open exactly one
//! `rusqlite::Transaction`, which rolls back when dropped without commit.

/// Connection management.
///
/// Opens file-backed or in-memory databases, turns on foreign key
/// enforcement and creates the schema.
pub mod db;

/// Idempotent schema bootstrap.
pub mod schema;

/// Label CRUD.
pub mod labels;

/// Task writes, label synchronization and task queries.
pub mod tasks;

/// User CRUD with name validation.
pub mod users;

//! Operation-shaped entry point to the storage layer.
//!
//! [`Storage`] is the contract the driver and other callers program
//! against. [`Store`] implements it over a single SQLite connection. The
//! store is an ordinary value: create one and pass it to whatever needs it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasklink::storage::{Storage, Store};
//! use tasklink::db::users::User;
//! use tasklink::libs::task::Task;
//!
//! let mut store = Store::open_in_memory()?;
//! let author = store.new_user(&User::new("Мария Петрова"))?;
//! let write = store.new_task(&Task::new("Notifications", "Notify on news").with_author(author).with_labels(&[3]))?;
//! if !write.is_complete() {
//!     println!("task {} saved, some labels were not attached", write.task_id);
//! }
//! store.close();
//! # Ok::<(), tasklink::libs::error::StorageError>(())
//! ```

use crate::db::db::Db;
use crate::db::labels::{Label, Labels};
use crate::db::tasks::Tasks;
use crate::db::users::{User, Users};
use crate::libs::error::Result;
use crate::libs::task::{Task, TaskWrite};
use rusqlite::Connection;
use std::path::Path;

pub trait Storage {
    fn new_user(&mut self, user: &User) -> Result<i64>;
    fn delete_user(&mut self, id: i64) -> Result<()>;
    fn update_user_name(&mut self, id: i64, name: &str) -> Result<()>;
    fn select_users(&mut self) -> Result<Vec<User>>;
    fn select_user_by_id(&mut self, id: i64) -> Result<User>;

    fn new_label(&mut self, label: &Label) -> Result<i64>;
    fn delete_label(&mut self, id: i64) -> Result<()>;
    fn update_label_name(&mut self, id: i64, name: &str) -> Result<()>;
    fn select_labels(&mut self) -> Result<Vec<Label>>;
    fn select_label_by_id(&mut self, id: i64) -> Result<Label>;

    /// Creates a task. Label failures are reported in the returned
    /// [`TaskWrite`]; use [`TaskWrite::into_result`] to get them as an error.
    fn new_task(&mut self, task: &Task) -> Result<TaskWrite>;
    fn select_tasks(&mut self) -> Result<Vec<Task>>;
    fn select_task_by_id(&mut self, id: i64) -> Result<Task>;
    fn select_tasks_by_author_id(&mut self, author_id: i64) -> Result<Vec<Task>>;
    fn select_tasks_by_label_id(&mut self, label_id: i64) -> Result<Vec<Task>>;
    fn delete_task(&mut self, id: i64) -> Result<()>;
    fn update_task_by_id(&mut self, task: &Task) -> Result<TaskWrite>;
    fn add_label_to_task(&mut self, label_id: i64, task_id: i64) -> Result<()>;
    fn delete_label_to_task(&mut self, label_id: i64, task_id: i64) -> Result<()>;

    fn close(self)
    where
        Self: Sized;
}

pub struct Store {
    db: Db,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Store { db: Db::open(path)? })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Store {
            db: Db::open_in_memory()?,
        })
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        Ok(Store {
            db: Db::from_connection(conn)?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.db.conn
    }

    fn users(&self) -> Users<'_> {
        Users::new(&self.db.conn)
    }

    fn labels(&self) -> Labels<'_> {
        Labels::new(&self.db.conn)
    }

    fn tasks(&mut self) -> Tasks<'_> {
        Tasks::new(&mut self.db.conn)
    }
}

impl Storage for Store {
    fn new_user(&mut self, user: &User) -> Result<i64> {
        self.users().create(&user.name)
    }

    fn delete_user(&mut self, id: i64) -> Result<()> {
        self.users().delete(id)
    }

    fn update_user_name(&mut self, id: i64, name: &str) -> Result<()> {
        self.users().update_name(id, name)
    }

    fn select_users(&mut self) -> Result<Vec<User>> {
        self.users().list()
    }

    fn select_user_by_id(&mut self, id: i64) -> Result<User> {
        self.users().get_by_id(id)
    }

    fn new_label(&mut self, label: &Label) -> Result<i64> {
        self.labels().create(&label.name)
    }

    fn delete_label(&mut self, id: i64) -> Result<()> {
        self.labels().delete(id)
    }

    fn update_label_name(&mut self, id: i64, name: &str) -> Result<()> {
        self.labels().update_name(id, name)
    }

    fn select_labels(&mut self) -> Result<Vec<Label>> {
        self.labels().list()
    }

    fn select_label_by_id(&mut self, id: i64) -> Result<Label> {
        self.labels().get_by_id(id)
    }

    fn new_task(&mut self, task: &Task) -> Result<TaskWrite> {
        self.tasks().create(task)
    }

    fn select_tasks(&mut self) -> Result<Vec<Task>> {
        self.tasks().list()
    }

    fn select_task_by_id(&mut self, id: i64) -> Result<Task> {
        self.tasks().get_by_id(id)
    }

    fn select_tasks_by_author_id(&mut self, author_id: i64) -> Result<Vec<Task>> {
        self.tasks().list_by_author(author_id)
    }

    fn select_tasks_by_label_id(&mut self, label_id: i64) -> Result<Vec<Task>> {
        self.tasks().list_by_label(label_id)
    }

    fn delete_task(&mut self, id: i64) -> Result<()> {
        self.tasks().delete(id)
    }

    fn update_task_by_id(&mut self, task: &Task) -> Result<TaskWrite> {
        self.tasks().update(task)
    }

    fn add_label_to_task(&mut self, label_id: i64, task_id: i64) -> Result<()> {
        self.tasks().add_label(label_id, task_id)
    }

    fn delete_label_to_task(&mut self, label_id: i64, task_id: i64) -> Result<()> {
        self.tasks().remove_label(label_id, task_id)
    }

    fn close(self) {
        if let Err((_, err)) = self.db.conn.close() {
            tracing::warn!(error = %err, "database connection did not close cleanly");
        }
    }
}

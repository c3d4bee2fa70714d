use super::schema;
use crate::libs::error::{DbContext, Result};
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "tasklink.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path).with_db_context(|| format!("open database {}", path.display()))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Db> {
        tracing::debug!("opening in-memory database");
        let conn = Connection::open_in_memory().db_context("open in-memory database")?;
        Self::from_connection(conn)
    }

    /// Enables foreign keys and bootstraps the schema on an existing connection.
    pub fn from_connection(mut conn: Connection) -> Result<Db> {
        conn.pragma_update(None, "foreign_keys", true).db_context("enable foreign keys")?;
        schema::init(&mut conn)?;
        Ok(Db { conn })
    }
}

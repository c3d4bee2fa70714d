use crate::libs::error::{DbContext, Entity, Result, StorageError};
use crate::libs::name::normalize_user_name;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_USER: &str = "INSERT INTO users (name) VALUES (?1)";
const UPDATE_USER_NAME: &str = "UPDATE users SET name = ?2 WHERE id = ?1";
const DELETE_USER: &str = "DELETE FROM users WHERE id = ?1";
const SELECT_ALL_USERS: &str = "SELECT id, name FROM users ORDER BY id ASC";
const SELECT_USER_BY_ID: &str = "SELECT id, name FROM users WHERE id = ?1";
const USER_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

impl User {
    pub fn new(name: &str) -> Self {
        User {
            id: 0,
            name: name.to_string(),
        }
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

pub struct Users<'a> {
    conn: &'a Connection,
}

impl<'a> Users<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Users { conn }
    }

    /// Validates and title-cases the name, then inserts the user.
    pub fn create(&self, name: &str) -> Result<i64> {
        let name = normalize_user_name(name)?;
        self.conn
            .execute(INSERT_USER, params![name])
            .with_db_context(|| format!("insert user '{}'", name))?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_name(&self, id: i64, name: &str) -> Result<()> {
        let name = normalize_user_name(name)?;
        let affected = self
            .conn
            .execute(UPDATE_USER_NAME, params![id, name])
            .with_db_context(|| format!("update name of user {}", id))?;
        if affected == 0 {
            return Err(StorageError::not_found(Entity::User, id));
        }
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let affected = self
            .conn
            .execute(DELETE_USER, params![id])
            .with_db_context(|| format!("delete user {}", id))?;
        if affected == 0 {
            return Err(StorageError::not_found(Entity::User, id));
        }
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<User>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_USERS).db_context("select users")?;
        let user_iter = stmt.query_map([], User::from_row).db_context("select users")?;

        let mut users = Vec::new();
        for user in user_iter {
            users.push(user.db_context("read user row")?);
        }
        Ok(users)
    }

    pub fn get_by_id(&self, id: i64) -> Result<User> {
        self.conn
            .query_row(SELECT_USER_BY_ID, params![id], User::from_row)
            .optional()
            .with_db_context(|| format!("select user {}", id))?
            .ok_or_else(|| StorageError::not_found(Entity::User, id))
    }
}

/// Existence check usable inside a transaction.
pub(crate) fn exists(conn: &Connection, id: i64) -> Result<bool> {
    conn.query_row(USER_EXISTS, params![id], |row| row.get(0))
        .with_db_context(|| format!("check user {}", id))
}

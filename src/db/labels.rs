use crate::libs::error::{DbContext, Entity, Result, StorageError};
use crate::libs::name::normalize_label_name;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_LABEL: &str = "INSERT INTO labels (name) VALUES (?1)";
const UPDATE_LABEL_NAME: &str = "UPDATE labels SET name = ?2 WHERE id = ?1";
const DELETE_LABEL: &str = "DELETE FROM labels WHERE id = ?1";
const SELECT_ALL_LABELS: &str = "SELECT id, name FROM labels ORDER BY id ASC";
const SELECT_LABEL_BY_ID: &str = "SELECT id, name FROM labels WHERE id = ?1";
const LABEL_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM labels WHERE id = ?1)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: i64,
    pub name: String,
}

impl Label {
    pub fn new(name: &str) -> Self {
        Label {
            id: 0,
            name: name.to_string(),
        }
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Label {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

pub struct Labels<'a> {
    conn: &'a Connection,
}

impl<'a> Labels<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Labels { conn }
    }

    /// Create a new label
    pub fn create(&self, name: &str) -> Result<i64> {
        let name = normalize_label_name(name)?;
        self.conn
            .execute(INSERT_LABEL, params![name])
            .with_db_context(|| format!("insert label '{}'", name))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Rename an existing label
    pub fn update_name(&self, id: i64, name: &str) -> Result<()> {
        let name = normalize_label_name(name)?;
        let affected = self
            .conn
            .execute(UPDATE_LABEL_NAME, params![id, name])
            .with_db_context(|| format!("update name of label {}", id))?;
        if affected == 0 {
            return Err(StorageError::not_found(Entity::Label, id));
        }
        Ok(())
    }

    /// Delete a label. Fails while a task still references it.
    pub fn delete(&self, id: i64) -> Result<()> {
        let affected = self
            .conn
            .execute(DELETE_LABEL, params![id])
            .with_db_context(|| format!("delete label {}", id))?;
        if affected == 0 {
            return Err(StorageError::not_found(Entity::Label, id));
        }
        Ok(())
    }

    /// Get all labels
    pub fn list(&self) -> Result<Vec<Label>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_LABELS).db_context("select labels")?;
        let label_iter = stmt.query_map([], Label::from_row).db_context("select labels")?;

        let mut labels = Vec::new();
        for label in label_iter {
            labels.push(label.db_context("read label row")?);
        }
        Ok(labels)
    }

    /// Get a label by ID
    pub fn get_by_id(&self, id: i64) -> Result<Label> {
        self.conn
            .query_row(SELECT_LABEL_BY_ID, params![id], Label::from_row)
            .optional()
            .with_db_context(|| format!("select label {}", id))?
            .ok_or_else(|| StorageError::not_found(Entity::Label, id))
    }
}

pub(crate) fn exists(conn: &Connection, id: i64) -> Result<bool> {
    conn.query_row(LABEL_EXISTS, params![id], |row| row.get(0))
        .with_db_context(|| format!("check label {}", id))
}

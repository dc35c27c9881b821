//! To-do persistence.

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use tracing::info;

use super::types::{NewTodo, Todo, TodoPatch, DUE_FORMAT};
use crate::error::UdoError;
use crate::storage::Database;

const SELECT_TODOS: &str =
    "SELECT id, description, priority, done, progress, due FROM todo";

/// CRUD access to the `todo` table.
pub struct TodoStore {
    db: Database,
}

impl TodoStore {
    /// Open the store backed by the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_at(path: &Path) -> Result<Self, UdoError> {
        Ok(Self::with_database(Database::open_at(path)?))
    }

    /// Create a store with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Insert a new to-do and return it with its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert(&self, todo: &NewTodo) -> Result<Todo, UdoError> {
        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO todo (description, priority, done, progress, due)
             VALUES (?1, ?2, 0, ?3, ?4)",
            params![
                todo.description,
                todo.priority,
                todo.progress,
                format_due(todo.due),
            ],
        )
        .map_err(|e| UdoError::db("Failed to insert to-do", &e))?;

        let id = conn.last_insert_rowid();
        info!(id, due = %todo.due, "inserted to-do");

        Ok(Todo {
            id,
            description: todo.description.clone(),
            priority: todo.priority,
            done: false,
            progress: todo.progress,
            due: todo.due,
        })
    }

    /// Get a to-do by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<Todo>, UdoError> {
        self.db
            .connection()
            .query_row(&format!("{SELECT_TODOS} WHERE id = ?1"), [id], row_to_todo)
            .optional()
            .map_err(|e| UdoError::db("Failed to query to-do", &e))
    }

    /// All to-dos, completed or not, in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all(&self) -> Result<Vec<Todo>, UdoError> {
        self.query(&format!("{SELECT_TODOS} ORDER BY id"))
    }

    /// To-dos that are not done yet, in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_incomplete(&self) -> Result<Vec<Todo>, UdoError> {
        self.query(&format!("{SELECT_TODOS} WHERE done = 0 ORDER BY id"))
    }

    fn query(&self, sql: &str) -> Result<Vec<Todo>, UdoError> {
        let mut stmt = self
            .db
            .connection()
            .prepare(sql)
            .map_err(|e| UdoError::db("Failed to prepare query", &e))?;

        let rows = stmt
            .query_map([], row_to_todo)
            .map_err(|e| UdoError::db("Failed to query to-dos", &e))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| UdoError::db("Failed to read to-do", &e))
    }

    /// Apply a partial update and return the updated to-do.
    ///
    /// # Errors
    ///
    /// Returns [`UdoError::NotFound`] if no to-do has this id.
    pub fn update(&self, id: i64, patch: &TodoPatch) -> Result<Todo, UdoError> {
        if patch.is_empty() {
            return self.get(id)?.ok_or_else(|| not_found(id));
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(description) = &patch.description {
            assignments.push("description = ?");
            values.push(Value::Text(description.clone()));
        }
        if let Some(priority) = patch.priority {
            assignments.push("priority = ?");
            values.push(Value::Integer(i64::from(priority)));
        }
        if let Some(done) = patch.done {
            assignments.push("done = ?");
            values.push(Value::Integer(i64::from(done)));
        }
        if let Some(progress) = patch.progress {
            assignments.push("progress = ?");
            values.push(Value::Integer(i64::from(progress)));
        }
        if let Some(due) = patch.due {
            assignments.push("due = ?");
            values.push(Value::Text(format_due(due)));
        }

        values.push(Value::Integer(id));
        let sql = format!("UPDATE todo SET {} WHERE id = ?", assignments.join(", "));
        let changed = self
            .db
            .connection()
            .execute(&sql, params_from_iter(values))
            .map_err(|e| UdoError::db("Failed to update to-do", &e))?;
        if changed == 0 {
            return Err(not_found(id));
        }
        info!(id, fields = assignments.len(), "updated to-do");

        self.get(id)?.ok_or_else(|| not_found(id))
    }

    /// Delete a to-do and return what was removed.
    ///
    /// # Errors
    ///
    /// Returns [`UdoError::NotFound`] if no to-do has this id.
    pub fn delete(&self, id: i64) -> Result<Todo, UdoError> {
        let todo = self.get(id)?.ok_or_else(|| not_found(id))?;
        self.db
            .connection()
            .execute("DELETE FROM todo WHERE id = ?1", [id])
            .map_err(|e| UdoError::db("Failed to delete to-do", &e))?;
        info!(id, "deleted to-do");
        Ok(todo)
    }

    /// Delete every to-do, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_all(&self) -> Result<usize, UdoError> {
        let removed = self
            .db
            .connection()
            .execute("DELETE FROM todo", [])
            .map_err(|e| UdoError::db("Failed to delete to-dos", &e))?;
        info!(removed, "deleted all to-dos");
        Ok(removed)
    }
}

fn not_found(id: i64) -> UdoError {
    UdoError::NotFound(format!("to-do #{id}"))
}

fn format_due(due: NaiveDateTime) -> String {
    due.format(DUE_FORMAT).to_string()
}

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    let due: String = row.get(5)?;
    let due = NaiveDateTime::parse_from_str(&due, DUE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Todo {
        id: row.get(0)?,
        description: row.get(1)?,
        priority: row.get(2)?,
        done: row.get(3)?,
        progress: row.get(4)?,
        due,
    })
}

use rusqlite::{Connection, OptionalExtension};
use tracing::instrument;

use todos_core::models::TodoList;
use todos_core::TodoListId;

use crate::database::Database;
use crate::error::StoreError;
use crate::row_helpers;

#[derive(Clone)]
pub struct ListRepo {
    db: Database,
}

impl ListRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a new list.
    #[instrument(skip(self))]
    pub fn create(&self, name: &str) -> Result<TodoList, StoreError> {
        self.db.with_conn(|conn| {
            conn.execute("INSERT INTO todolist (name) VALUES (?1)", [name])?;
            Ok(TodoList {
                id: TodoListId::new(conn.last_insert_rowid()),
                name: name.to_string(),
            })
        })
    }

    /// Get a list by ID.
    #[instrument(skip(self), fields(list_id = %id))]
    pub fn get(&self, id: TodoListId) -> Result<TodoList, StoreError> {
        self.find(id)?
            .ok_or_else(|| StoreError::NotFound(format!("todo list {id}")))
    }

    /// Look a list up, returning `None` when it does not exist.
    #[instrument(skip(self), fields(list_id = %id))]
    pub fn find(&self, id: TodoListId) -> Result<Option<TodoList>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, name FROM todolist WHERE id = ?1")?;
            let mut rows = stmt.query([id.get()])?;
            match rows.next()? {
                Some(row) => row_to_list(row).map(Some),
                None => Ok(None),
            }
        })
    }

    /// All lists, oldest first.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<TodoList>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, name FROM todolist ORDER BY id")?;
            let mut rows = stmt.query([])?;
            let mut results = Vec::new();
            while let Some(row) = rows.next()? {
                results.push(row_to_list(row)?);
            }
            Ok(results)
        })
    }

    /// ID of the oldest list, if any exist.
    #[instrument(skip(self))]
    pub fn first_id(&self) -> Result<Option<TodoListId>, StoreError> {
        self.db.with_conn(|conn| {
            let id = conn
                .query_row("SELECT id FROM todolist ORDER BY id LIMIT 1", [], |row| {
                    row.get::<_, i64>(0)
                })
                .optional()?;
            Ok(id.map(TodoListId::new))
        })
    }

    pub fn count(&self) -> Result<u64, StoreError> {
        self.db.with_conn(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM todolist", [], |row| row.get(0))?;
            Ok(n as u64)
        })
    }

    /// Delete a list and all of its todos. Returns whether the list existed.
    #[instrument(skip(self), fields(list_id = %id))]
    pub fn delete(&self, id: TodoListId) -> Result<bool, StoreError> {
        self.db.with_tx(|tx| {
            tx.execute("DELETE FROM todo WHERE todolist_id = ?1", [id.get()])?;
            let removed = tx.execute("DELETE FROM todolist WHERE id = ?1", [id.get()])?;
            Ok(removed > 0)
        })
    }
}

pub(crate) fn exists(conn: &Connection, id: TodoListId) -> Result<bool, StoreError> {
    let found = conn
        .query_row("SELECT 1 FROM todolist WHERE id = ?1", [id.get()], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

fn row_to_list(row: &rusqlite::Row<'_>) -> Result<TodoList, StoreError> {
    Ok(TodoList {
        id: TodoListId::new(row_helpers::get(row, 0, "todolist", "id")?),
        name: row_helpers::get(row, 1, "todolist", "name")?,
    })
}

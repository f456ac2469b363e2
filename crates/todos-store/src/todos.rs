use rusqlite::{Connection, OptionalExtension};
use tracing::instrument;

use todos_core::models::Todo;
use todos_core::{TodoId, TodoListId};

use crate::database::Database;
use crate::error::StoreError;
use crate::lists;
use crate::row_helpers;

const SELECT_TODO: &str = "SELECT id, description, completed, todolist_id FROM todo";

#[derive(Clone)]
pub struct TodoRepo {
    db: Database,
}

impl TodoRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a todo under an existing list.
    /// Fails with `NotFound` when the list does not exist.
    #[instrument(skip(self), fields(list_id = %list_id))]
    pub fn create(&self, list_id: TodoListId, description: &str) -> Result<Todo, StoreError> {
        self.db.with_tx(|tx| {
            if !lists::exists(tx, list_id)? {
                return Err(StoreError::NotFound(format!("todo list {list_id}")));
            }
            tx.execute(
                "INSERT INTO todo (description, completed, todolist_id) VALUES (?1, 0, ?2)",
                rusqlite::params![description, list_id.get()],
            )?;
            Ok(Todo {
                id: TodoId::new(tx.last_insert_rowid()),
                description: description.to_string(),
                completed: false,
                todolist_id: list_id,
            })
        })
    }

    /// Get a todo by ID.
    #[instrument(skip(self), fields(todo_id = %id))]
    pub fn get(&self, id: TodoId) -> Result<Todo, StoreError> {
        self.db.with_conn(|conn| {
            find_in(conn, id)?.ok_or_else(|| StoreError::NotFound(format!("todo {id}")))
        })
    }

    /// Todos of one list, in creation order.
    #[instrument(skip(self), fields(list_id = %list_id))]
    pub fn list_for(&self, list_id: TodoListId) -> Result<Vec<Todo>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_TODO} WHERE todolist_id = ?1 ORDER BY id"))?;
            let mut rows = stmt.query([list_id.get()])?;
            let mut results = Vec::new();
            while let Some(row) = rows.next()? {
                results.push(row_to_todo(row)?);
            }
            Ok(results)
        })
    }

    /// Set the completion flag of a todo that belongs to `list_id`.
    #[instrument(skip(self), fields(list_id = %list_id, todo_id = %id))]
    pub fn set_completed(
        &self,
        list_id: TodoListId,
        id: TodoId,
        completed: bool,
    ) -> Result<Todo, StoreError> {
        self.db.with_tx(|tx| {
            let updated = tx.execute(
                "UPDATE todo SET completed = ?1 WHERE id = ?2 AND todolist_id = ?3",
                rusqlite::params![completed, id.get(), list_id.get()],
            )?;
            if updated == 0 {
                return Err(StoreError::NotFound(format!("todo {id} in list {list_id}")));
            }
            find_in(tx, id)?.ok_or_else(|| StoreError::NotFound(format!("todo {id}")))
        })
    }

    /// Mark every todo of a list completed. Returns how many rows matched.
    #[instrument(skip(self), fields(list_id = %list_id))]
    pub fn complete_all(&self, list_id: TodoListId) -> Result<usize, StoreError> {
        self.db.with_tx(|tx| {
            let n = tx.execute(
                "UPDATE todo SET completed = 1 WHERE todolist_id = ?1",
                [list_id.get()],
            )?;
            Ok(n)
        })
    }

    /// Delete a todo by id, whichever list owns it. Returns whether a row was removed.
    #[instrument(skip(self), fields(todo_id = %id))]
    pub fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
        self.db.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM todo WHERE id = ?1", [id.get()])?;
            Ok(removed > 0)
        })
    }
}

fn find_in(conn: &Connection, id: TodoId) -> Result<Option<Todo>, StoreError> {
    let mut stmt = conn.prepare(&format!("{SELECT_TODO} WHERE id = ?1"))?;
    let row = stmt
        .query_row([id.get()], |row| Ok(row_to_todo(row)))
        .optional()?;
    row.transpose()
}

fn row_to_todo(row: &rusqlite::Row<'_>) -> Result<Todo, StoreError> {
    Ok(Todo {
        id: TodoId::new(row_helpers::get(row, 0, "todo", "id")?),
        description: row_helpers::get(row, 1, "todo", "description")?,
        completed: row_helpers::get(row, 2, "todo", "completed")?,
        todolist_id: TodoListId::new(row_helpers::get(row, 3, "todo", "todolist_id")?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lists::ListRepo;

    fn setup() -> (TodoRepo, ListRepo, TodoListId) {
        let db = Database::in_memory().unwrap();
        let lists = ListRepo::new(db.clone());
        let list = lists.create("Groceries").unwrap();
        (TodoRepo::new(db), lists, list.id)
    }

    #[test]
    fn create_starts_open() {
        let (repo, _, list_id) = setup();
        let todo = repo.create(list_id, "Buy milk").unwrap();
        assert!(todo.id.get() > 0);
        assert!(!todo.completed);
        assert_eq!(repo.get(todo.id).unwrap(), todo);
    }

    #[test]
    fn create_under_missing_list_fails() {
        let (repo, _, _) = setup();
        let result = repo.create(TodoListId::new(404), "Orphan");
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn empty_description_rejected_by_schema() {
        let (repo, _, list_id) = setup();
        assert!(matches!(repo.create(list_id, ""), Err(StoreError::Conflict(_))));
        assert!(repo.list_for(list_id).unwrap().is_empty());
    }

    #[test]
    fn list_for_orders_by_id_and_scopes_by_list() {
        let (repo, lists, list_id) = setup();
        let other = lists.create("Other").unwrap();
        let a = repo.create(list_id, "a").unwrap();
        repo.create(other.id, "elsewhere").unwrap();
        let b = repo.create(list_id, "b").unwrap();

        let todos = repo.list_for(list_id).unwrap();
        assert_eq!(todos.iter().map(|t| t.id).collect::<Vec<_>>(), vec![a.id, b.id]);
    }

    #[test]
    fn set_completed_is_idempotent() {
        let (repo, _, list_id) = setup();
        let todo = repo.create(list_id, "Buy milk").unwrap();
        assert!(repo.set_completed(list_id, todo.id, true).unwrap().completed);
        assert!(repo.set_completed(list_id, todo.id, true).unwrap().completed);
        assert_eq!(repo.list_for(list_id).unwrap().len(), 1);

        assert!(!repo.set_completed(list_id, todo.id, false).unwrap().completed);
    }

    #[test]
    fn set_completed_missing_todo_fails() {
        let (repo, _, list_id) = setup();
        let result = repo.set_completed(list_id, TodoId::new(77), true);
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn set_completed_wrong_list_fails() {
        let (repo, lists, list_id) = setup();
        let other = lists.create("Other").unwrap();
        let todo = repo.create(list_id, "mine").unwrap();
        let result = repo.set_completed(other.id, todo.id, true);
        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert!(!repo.get(todo.id).unwrap().completed);
    }

    #[test]
    fn complete_all_marks_every_todo() {
        let (repo, lists, list_id) = setup();
        let other = lists.create("Other").unwrap();
        let first = repo.create(list_id, "a").unwrap();
        repo.create(list_id, "b").unwrap();
        repo.create(list_id, "c").unwrap();
        let untouched = repo.create(other.id, "z").unwrap();
        repo.set_completed(list_id, first.id, true).unwrap();

        assert_eq!(repo.complete_all(list_id).unwrap(), 3);
        assert!(repo.list_for(list_id).unwrap().iter().all(|t| t.completed));
        assert!(!repo.get(untouched.id).unwrap().completed);
    }

    #[test]
    fn complete_all_on_empty_list_is_noop() {
        let (repo, _, list_id) = setup();
        assert_eq!(repo.complete_all(list_id).unwrap(), 0);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let (repo, _, list_id) = setup();
        let a = repo.create(list_id, "a").unwrap();
        let b = repo.create(list_id, "b").unwrap();
        assert!(repo.delete(a.id).unwrap());
        let remaining = repo.list_for(list_id).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
    }

    #[test]
    fn delete_missing_is_noop() {
        let (repo, _, list_id) = setup();
        repo.create(list_id, "keep").unwrap();
        assert!(!repo.delete(TodoId::new(999)).unwrap());
        assert_eq!(repo.list_for(list_id).unwrap().len(), 1);
    }

    #[test]
    fn delete_ignores_owning_list() {
        let (repo, lists, list_id) = setup();
        let other = lists.create("Other").unwrap();
        let todo = repo.create(list_id, "mine").unwrap();
        let keep = repo.create(other.id, "theirs").unwrap();

        assert!(repo.delete(todo.id).unwrap());
        assert!(repo.list_for(list_id).unwrap().is_empty());
        assert_eq!(repo.list_for(other.id).unwrap(), vec![keep]);
    }

    #[test]
    fn foreign_key_blocks_orphans() {
        let db = Database::in_memory().unwrap();
        let result = db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO todo (description, todolist_id) VALUES ('orphan', 12345)",
                [],
            )?;
            Ok(())
        });
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }
}

//! The two kinds of list behind a `/todos/{listId}` path.
//!
//! `PersistedList` reads and writes the Data Store; `SyntheticList` serves
//! the starter template through the in-memory overlay. Handlers only see
//! `dyn ListBoard`.

use todos_core::models::TodoItem;
use todos_core::starter::STARTER_LIST_NAME;
use todos_core::{ListId, TodoError, TodoId, TodoListId};
use todos_store::{ListRepo, StarterState, StoreError, TodoRepo};

pub trait ListBoard {
    fn id(&self) -> ListId;

    /// Display name, or `None` when the list does not (or no longer) exist.
    fn name(&self) -> Result<Option<String>, TodoError>;

    fn items(&self) -> Result<Vec<TodoItem>, TodoError>;

    fn add_item(&self, description: &str) -> Result<TodoItem, TodoError>;

    fn set_completed(&self, todo_id: TodoId, completed: bool) -> Result<(), TodoError>;

    /// Complete every item; returns how many items the list holds.
    fn complete_all(&self) -> Result<usize, TodoError>;

    /// Remove one item. Removing an absent item succeeds.
    fn delete_item(&self, todo_id: TodoId) -> Result<(), TodoError>;

    /// Remove the list and everything in it. Removing an absent list succeeds.
    fn delete(&self) -> Result<(), TodoError>;
}

pub struct PersistedList {
    id: TodoListId,
    lists: ListRepo,
    todos: TodoRepo,
}

impl PersistedList {
    pub fn new(id: TodoListId, lists: ListRepo, todos: TodoRepo) -> Self {
        Self { id, lists, todos }
    }
}

impl ListBoard for PersistedList {
    fn id(&self) -> ListId {
        ListId::Persisted(self.id)
    }

    fn name(&self) -> Result<Option<String>, TodoError> {
        Ok(self.lists.find(self.id)?.map(|list| list.name))
    }

    fn items(&self) -> Result<Vec<TodoItem>, TodoError> {
        let todos = self.todos.list_for(self.id)?;
        Ok(todos.into_iter().map(TodoItem::from).collect())
    }

    fn add_item(&self, description: &str) -> Result<TodoItem, TodoError> {
        match self.todos.create(self.id, description) {
            Ok(todo) => Ok(todo.into()),
            Err(StoreError::NotFound(_)) => Err(TodoError::validation(format!(
                "todo list {} does not exist",
                self.id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    fn set_completed(&self, todo_id: TodoId, completed: bool) -> Result<(), TodoError> {
        self.todos.set_completed(self.id, todo_id, completed)?;
        Ok(())
    }

    fn complete_all(&self) -> Result<usize, TodoError> {
        Ok(self.todos.complete_all(self.id)?)
    }

    fn delete_item(&self, todo_id: TodoId) -> Result<(), TodoError> {
        self.todos.delete(todo_id)?;
        Ok(())
    }

    fn delete(&self) -> Result<(), TodoError> {
        self.lists.delete(self.id)?;
        Ok(())
    }
}

pub struct SyntheticList<'a> {
    state: &'a StarterState,
}

impl<'a> SyntheticList<'a> {
    pub fn new(state: &'a StarterState) -> Self {
        Self { state }
    }
}

impl ListBoard for SyntheticList<'_> {
    fn id(&self) -> ListId {
        ListId::Starter
    }

    fn name(&self) -> Result<Option<String>, TodoError> {
        if self.state.is_list_deleted() {
            return Ok(None);
        }
        Ok(Some(STARTER_LIST_NAME.to_string()))
    }

    fn items(&self) -> Result<Vec<TodoItem>, TodoError> {
        if self.state.is_list_deleted() {
            return Ok(Vec::new());
        }
        Ok(self.state.visible_items())
    }

    fn add_item(&self, _description: &str) -> Result<TodoItem, TodoError> {
        Err(TodoError::validation("the starter list does not accept new todos"))
    }

    fn set_completed(&self, todo_id: TodoId, completed: bool) -> Result<(), TodoError> {
        if self.state.is_list_deleted() || !self.state.set_completed(todo_id, completed) {
            return Err(TodoError::not_found(format!("todo {todo_id} in list welcome")));
        }
        Ok(())
    }

    fn complete_all(&self) -> Result<usize, TodoError> {
        if self.state.is_list_deleted() {
            return Ok(0);
        }
        Ok(self.state.complete_all())
    }

    fn delete_item(&self, todo_id: TodoId) -> Result<(), TodoError> {
        self.state.hide_item(todo_id);
        Ok(())
    }

    fn delete(&self) -> Result<(), TodoError> {
        self.state.delete_list();
        Ok(())
    }
}

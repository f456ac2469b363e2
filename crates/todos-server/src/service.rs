//! List and todo operations, independent of HTTP.

use std::sync::Arc;

use tracing::{debug, info};

use todos_core::models::{ListSummary, ListView, TodoItem, TodoList};
use todos_core::starter::{DELETED_LIST_NAME, STARTER_LIST_NAME};
use todos_core::{ListId, TodoError, TodoId};
use todos_store::{Database, ListRepo, StarterState, TodoRepo};

use crate::board::{ListBoard, PersistedList, SyntheticList};

/// Owns the Data Store handles and the starter-list overlay of one
/// application instance.
pub struct TodoService {
    lists: ListRepo,
    todos: TodoRepo,
    starter: Arc<StarterState>,
}

impl TodoService {
    pub fn new(db: Database) -> Self {
        Self::with_starter_state(db, Arc::new(StarterState::new()))
    }

    pub fn with_starter_state(db: Database, starter: Arc<StarterState>) -> Self {
        Self {
            lists: ListRepo::new(db.clone()),
            todos: TodoRepo::new(db),
            starter,
        }
    }

    pub fn starter_state(&self) -> &StarterState {
        &self.starter
    }

    /// Resolve a path id to the list implementation that serves it.
    pub fn board(&self, list: &ListId) -> Box<dyn ListBoard + '_> {
        match list {
            ListId::Persisted(id) => Box::new(PersistedList::new(
                *id,
                self.lists.clone(),
                self.todos.clone(),
            )),
            ListId::Starter => Box::new(SyntheticList::new(&self.starter)),
        }
    }

    pub fn create_list(&self, name: &str) -> Result<TodoList, TodoError> {
        if name.trim().is_empty() {
            return Err(TodoError::validation("name must not be empty"));
        }
        let list = self.lists.create(name)?;
        info!(list_id = %list.id, "todo list created");
        Ok(list)
    }

    pub fn create_todo(&self, list: &ListId, description: &str) -> Result<TodoItem, TodoError> {
        if description.trim().is_empty() {
            return Err(TodoError::validation("description must not be empty"));
        }
        let item = self.board(list).add_item(description)?;
        info!(list_id = %list, todo_id = %item.id, "todo created");
        Ok(item)
    }

    pub fn update_completion(
        &self,
        list: &ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> Result<bool, TodoError> {
        self.board(list).set_completed(todo_id, completed)?;
        debug!(list_id = %list, todo_id = %todo_id, completed, "todo completion set");
        Ok(completed)
    }

    pub fn complete_all(&self, list: &ListId) -> Result<usize, TodoError> {
        let n = self.board(list).complete_all()?;
        info!(list_id = %list, count = n, "all todos completed");
        Ok(n)
    }

    pub fn delete_todo(&self, list: &ListId, todo_id: TodoId) -> Result<(), TodoError> {
        self.board(list).delete_item(todo_id)?;
        info!(list_id = %list, todo_id = %todo_id, "todo deleted");
        Ok(())
    }

    pub fn delete_list(&self, list: &ListId) -> Result<(), TodoError> {
        self.board(list).delete()?;
        info!(list_id = %list, "todo list deleted");
        Ok(())
    }

    /// Sidebar entries: stored lists by id, then the starter list unless removed.
    pub fn sibling_lists(&self) -> Result<Vec<ListSummary>, TodoError> {
        let mut siblings: Vec<ListSummary> =
            self.lists.list()?.into_iter().map(ListSummary::from).collect();
        if !self.starter.is_list_deleted() {
            siblings.push(ListSummary {
                id: ListId::Starter,
                name: STARTER_LIST_NAME.to_string(),
            });
        }
        Ok(siblings)
    }

    /// Assemble the page for one list. An absent list renders as an empty
    /// placeholder instead of failing.
    pub fn list_view(&self, list: &ListId) -> Result<ListView, TodoError> {
        let board = self.board(list);
        let (list_name, items) = match board.name()? {
            Some(name) => (name, board.items()?),
            None => (DELETED_LIST_NAME.to_string(), Vec::new()),
        };
        Ok(ListView {
            items,
            list_id: board.id(),
            sibling_lists: self.sibling_lists()?,
            list_name,
        })
    }

    /// The list the root path lands on: the oldest stored list, else the starter list.
    pub fn default_list(&self) -> Result<ListId, TodoError> {
        Ok(self
            .lists
            .first_id()?
            .map_or(ListId::Starter, ListId::Persisted))
    }

    pub fn list_count(&self) -> Result<u64, TodoError> {
        Ok(self.lists.count()?)
    }
}

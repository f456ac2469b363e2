use serde::{Deserialize, Serialize};

use crate::ids::{ListId, TodoId, TodoListId};

/// A named container of todos.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: TodoListId,
    pub name: String,
}

/// A stored todo row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub description: String,
    pub completed: bool,
    pub todolist_id: TodoListId,
}

/// A todo as shown on a list page, whether stored or synthetic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub description: String,
    pub completed: bool,
}

impl From<Todo> for TodoItem {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            description: todo.description,
            completed: todo.completed,
        }
    }
}

/// Sidebar entry linking to a list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    pub id: ListId,
    pub name: String,
}

impl From<TodoList> for ListSummary {
    fn from(list: TodoList) -> Self {
        Self {
            id: ListId::Persisted(list.id),
            name: list.name,
        }
    }
}

/// Everything a renderer needs to draw one list page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub items: Vec<TodoItem>,
    pub list_id: ListId,
    pub sibling_lists: Vec<ListSummary>,
    pub list_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_serializes_camel_case() {
        let view = ListView {
            items: vec![TodoItem {
                id: TodoId::new(1),
                description: "Buy milk".into(),
                completed: false,
            }],
            list_id: ListId::Persisted(TodoListId::new(1)),
            sibling_lists: vec![ListSummary {
                id: ListId::Starter,
                name: "Starter Task".into(),
            }],
            list_name: "Groceries".into(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["listId"], 1);
        assert_eq!(json["listName"], "Groceries");
        assert_eq!(json["siblingLists"][0]["id"], "welcome");
        assert_eq!(json["items"][0]["description"], "Buy milk");
        assert_eq!(json["items"][0]["completed"], false);
    }

    #[test]
    fn todo_into_item_drops_owner() {
        let todo = Todo {
            id: TodoId::new(4),
            description: "x".into(),
            completed: true,
            todolist_id: TodoListId::new(2),
        };
        let item = TodoItem::from(todo);
        assert_eq!(item.id, TodoId::new(4));
        assert!(item.completed);
    }
}

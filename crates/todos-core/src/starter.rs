//! Fixed content of the synthetic starter list.

use crate::ids::TodoId;
use crate::models::TodoItem;

/// Display name of the starter list.
pub const STARTER_LIST_NAME: &str = "Starter Task";

/// Name shown when a page addresses a list that no longer exists.
pub const DELETED_LIST_NAME: &str = "Deleted List";

/// Template items, in display order.
pub const STARTER_TEMPLATE: [(i64, &str); 3] = [
    (1, "Create a Todo"),
    (2, "Accomplish the task"),
    (3, "Remove the Todo"),
];

pub fn template_items() -> impl Iterator<Item = TodoItem> {
    STARTER_TEMPLATE.iter().map(|(id, description)| TodoItem {
        id: TodoId::new(*id),
        description: (*description).to_string(),
        completed: false,
    })
}

pub fn is_template_id(id: TodoId) -> bool {
    STARTER_TEMPLATE.iter().any(|(raw, _)| *raw == id.get())
}

//! In-memory overlay that simulates edits to the read-only starter list.
//!
//! One `StarterState` is owned per application instance and lives as long
//! as that instance. Nothing here is persisted.

use std::collections::BTreeSet;

use parking_lot::Mutex;

use todos_core::models::TodoItem;
use todos_core::starter;
use todos_core::TodoId;

#[derive(Debug, Default)]
struct Overlay {
    deleted_item_ids: BTreeSet<TodoId>,
    completed_item_ids: BTreeSet<TodoId>,
    list_deleted: bool,
}

/// Point-in-time copy of the overlay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StarterSnapshot {
    pub deleted_item_ids: Vec<TodoId>,
    pub completed_item_ids: Vec<TodoId>,
    pub list_deleted: bool,
}

#[derive(Debug, Default)]
pub struct StarterState {
    overlay: Mutex<Overlay>,
}

impl StarterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide an item. Ids outside the template are recorded too; hiding is
    /// idempotent. Returns whether the id was newly hidden.
    pub fn hide_item(&self, id: TodoId) -> bool {
        self.overlay.lock().deleted_item_ids.insert(id)
    }

    pub fn is_hidden(&self, id: TodoId) -> bool {
        self.overlay.lock().deleted_item_ids.contains(&id)
    }

    /// Set completion of a visible template item.
    /// Returns `false` when the id is not a visible template item.
    pub fn set_completed(&self, id: TodoId, completed: bool) -> bool {
        let mut overlay = self.overlay.lock();
        if !starter::is_template_id(id) || overlay.deleted_item_ids.contains(&id) {
            return false;
        }
        if completed {
            overlay.completed_item_ids.insert(id);
        } else {
            overlay.completed_item_ids.remove(&id);
        }
        true
    }

    /// Complete every visible template item. Returns how many are visible.
    pub fn complete_all(&self) -> usize {
        let mut overlay = self.overlay.lock();
        let visible: Vec<TodoId> = starter::template_items()
            .map(|item| item.id)
            .filter(|id| !overlay.deleted_item_ids.contains(id))
            .collect();
        overlay.completed_item_ids.extend(visible.iter().copied());
        visible.len()
    }

    /// Remove the whole starter list. Returns whether this call removed it.
    pub fn delete_list(&self) -> bool {
        let mut overlay = self.overlay.lock();
        !std::mem::replace(&mut overlay.list_deleted, true)
    }

    pub fn is_list_deleted(&self) -> bool {
        self.overlay.lock().list_deleted
    }

    /// Template items minus hidden ones, in template order, with completion applied.
    pub fn visible_items(&self) -> Vec<TodoItem> {
        let overlay = self.overlay.lock();
        starter::template_items()
            .filter(|item| !overlay.deleted_item_ids.contains(&item.id))
            .map(|mut item| {
                item.completed = overlay.completed_item_ids.contains(&item.id);
                item
            })
            .collect()
    }

    pub fn snapshot(&self) -> StarterSnapshot {
        let overlay = self.overlay.lock();
        StarterSnapshot {
            deleted_item_ids: overlay.deleted_item_ids.iter().copied().collect(),
            completed_item_ids: overlay.completed_item_ids.iter().copied().collect(),
            list_deleted: overlay.list_deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[TodoItem]) -> Vec<i64> {
        items.iter().map(|i| i.id.get()).collect()
    }

    #[test]
    fn fresh_state_shows_whole_template() {
        let state = StarterState::new();
        assert_eq!(ids(&state.visible_items()), vec![1, 2, 3]);
        assert!(!state.is_list_deleted());
        assert_eq!(state.snapshot(), StarterSnapshot::default());
    }

    #[test]
    fn hiding_preserves_order_of_the_rest() {
        let state = StarterState::new();
        assert!(state.hide_item(TodoId::new(2)));
        assert_eq!(ids(&state.visible_items()), vec![1, 3]);
        assert_eq!(ids(&state.visible_items()), vec![1, 3]);
    }

    #[test]
    fn hiding_is_idempotent() {
        let state = StarterState::new();
        assert!(state.hide_item(TodoId::new(1)));
        assert!(!state.hide_item(TodoId::new(1)));
        assert_eq!(state.snapshot().deleted_item_ids, vec![TodoId::new(1)]);
    }

    #[test]
    fn hiding_unknown_id_is_recorded_and_harmless() {
        let state = StarterState::new();
        assert!(state.hide_item(TodoId::new(42)));
        assert!(state.is_hidden(TodoId::new(42)));
        assert_eq!(state.visible_items().len(), 3);
    }

    #[test]
    fn completion_applies_to_visible_items_only() {
        let state = StarterState::new();
        assert!(state.set_completed(TodoId::new(1), true));
        assert!(!state.set_completed(TodoId::new(9), true));
        state.hide_item(TodoId::new(3));
        assert!(!state.set_completed(TodoId::new(3), true));

        let items = state.visible_items();
        assert!(items[0].completed);
        assert!(!items[1].completed);

        assert!(state.set_completed(TodoId::new(1), false));
        assert!(!state.visible_items()[0].completed);
    }

    #[test]
    fn complete_all_skips_hidden() {
        let state = StarterState::new();
        state.hide_item(TodoId::new(2));
        assert_eq!(state.complete_all(), 2);
        assert!(state.visible_items().iter().all(|i| i.completed));
        assert!(!state.snapshot().completed_item_ids.contains(&TodoId::new(2)));
    }

    #[test]
    fn delete_list_once() {
        let state = StarterState::new();
        assert!(state.delete_list());
        assert!(!state.delete_list());
        assert!(state.is_list_deleted());
    }

    #[test]
    fn instances_do_not_share_state() {
        let a = StarterState::new();
        let b = StarterState::new();
        a.hide_item(TodoId::new(1));
        a.delete_list();
        assert_eq!(b.visible_items().len(), 3);
        assert!(!b.is_list_deleted());
    }
}

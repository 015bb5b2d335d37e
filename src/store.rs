//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use menu_tree::OptimisticStore;
use reactive_stores::Store;

use crate::models::{Menu, MenuItem};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub level: ToastLevel,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub menus: Vec<Menu>,
    pub current_menu_id: Option<String>,
    /// Items of the current menu, plus selection and editing pointers
    pub tree: OptimisticStore,
    pub toasts: Vec<Toast>,
    pub next_toast_id: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the items after a fetch
pub fn store_set_items(store: &AppStore, items: Vec<MenuItem>) {
    store.tree().write().replace_all(items);
}

/// Reflect a created item at its sibling slot
pub fn store_insert_item(store: &AppStore, item: MenuItem, index: usize) {
    store.tree().write().insert_at(item, index);
}

/// Update an item in the store by ID
pub fn store_update_item(store: &AppStore, item: MenuItem) {
    store.tree().write().upsert(item);
}

/// Remove an item (and a group's children) by ID
pub fn store_remove_item(store: &AppStore, item_id: &str) {
    store.tree().write().remove(item_id);
}

pub fn store_select(store: &AppStore, item_id: Option<String>) {
    store.tree().write().selected = item_id;
}

pub fn store_edit(store: &AppStore, item_id: Option<String>) {
    store.tree().write().editing = item_id;
}

pub fn store_push_toast(store: &AppStore, level: ToastLevel, message: impl Into<String>) -> u32 {
    let id = store.next_toast_id().get_untracked() + 1;
    store.next_toast_id().set(id);
    store.toasts().write().push(Toast {
        id,
        level,
        message: message.into(),
    });
    id
}

pub fn store_dismiss_toast(store: &AppStore, toast_id: u32) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_keep_level_and_dismiss_by_id() {
        let store = Store::new(AppState::default());
        let info = store_push_toast(&store, ToastLevel::Info, "Menu \"Main\" created");
        let error = store_push_toast(&store, ToastLevel::Error, "Could not save");
        assert_eq!((info, error), (1, 2));

        let levels: Vec<ToastLevel> = store.toasts().with_untracked(|toasts| toasts.iter().map(|t| t.level).collect());
        assert_eq!(levels, vec![ToastLevel::Info, ToastLevel::Error]);

        store_dismiss_toast(&store, info);
        let left: Vec<u32> = store.toasts().with_untracked(|toasts| toasts.iter().map(|t| t.id).collect());
        assert_eq!(left, vec![error]);
    }
}

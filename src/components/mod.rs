//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod item_editor;
mod menu_tab_bar;
mod menu_tree_item;
mod menu_tree_view;
mod new_item_form;
mod toast;
mod type_selector;

pub use delete_confirm_button::DeleteConfirmButton;
pub use item_editor::ItemEditor;
pub use menu_tab_bar::MenuTabBar;
pub use menu_tree_item::MenuTreeItem;
pub use menu_tree_view::MenuTreeView;
pub use new_item_form::NewItemForm;
pub use toast::ToastHost;
pub use type_selector::TypeSelector;

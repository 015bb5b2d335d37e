//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! Menu items and their ordering rules live in the shared `menu-tree` crate.

mod entity;
mod menu;
mod menu_item;

pub use entity::{Entity, DomainError, DomainResult};
pub use menu::NewMenu;
pub use menu_item::{ItemDraft, ItemPatch};
pub use menu_tree::{Menu, MenuItem, MenuItemKind, PublishState, Scope};

//! Frontend Models
//!
//! Shared with the backend through the `menu-tree` crate.

pub use menu_tree::{Menu, MenuItem, MenuItemKind, PublishState, ReorderRequest, Scope};

/// Item kinds offered by the type selector
pub const ITEM_KINDS: &[(&str, &str)] = &[
    ("internal_path", "Page"),
    ("external_url", "Link"),
    ("resource", "Resource"),
    ("group", "Group"),
];

/// Build a kind from the selector key and the target text field
pub fn kind_from_input(key: &str, target: &str) -> Option<MenuItemKind> {
    let target = target.trim();
    match key {
        "group" => Some(MenuItemKind::Group),
        "internal_path" if target.starts_with('/') => Some(MenuItemKind::InternalPath { path: target.to_string() }),
        "external_url" if !target.is_empty() => Some(MenuItemKind::ExternalUrl { url: target.to_string() }),
        "resource" => {
            let (resource_type, resource_id) = target.split_once('/')?;
            if resource_type.is_empty() || resource_id.is_empty() {
                return None;
            }
            Some(MenuItemKind::Resource {
                resource_type: resource_type.to_string(),
                resource_id: resource_id.to_string(),
            })
        }
        _ => None,
    }
}

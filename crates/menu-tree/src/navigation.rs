//! Public Navigation
//!
//! What the website shows: published items whose ancestors are all
//! published, with groups replaced by their children.

use serde::{Deserialize, Serialize};

use crate::item::{MenuItem, MenuItemKind};
use crate::partition::{siblings, Scope};

/// One rendered link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub id: String,
    pub title: String,
    pub href: String,
}

/// True when every ancestor of `id` is published.
///
/// The walk is bounded by the collection size, so a parent cycle in bad data
/// terminates. A dangling parent reference counts as unpublished.
pub fn ancestors_published(items: &[MenuItem], id: &str) -> bool {
    let Some(mut current) = items.iter().find(|item| item.id == id) else {
        return false;
    };
    for _ in 0..items.len() {
        let Some(parent_id) = current.parent_id.as_deref() else {
            return true;
        };
        match items.iter().find(|item| item.id == parent_id) {
            Some(parent) if parent.is_published() => current = parent,
            _ => return false,
        }
    }
    false
}

/// Whether the public site renders this item
pub fn is_visible(items: &[MenuItem], item: &MenuItem) -> bool {
    item.is_published() && ancestors_published(items, &item.id)
}

/// Flattened public navigation of one menu
pub fn public_navigation(items: &[MenuItem]) -> Vec<NavEntry> {
    let mut entries = Vec::new();
    for item in siblings(items, &Scope::Root) {
        if !is_visible(items, item) {
            continue;
        }
        match &item.kind {
            MenuItemKind::Group => {
                let scope = Scope::Group(item.id.clone());
                for child in siblings(items, &scope) {
                    if let (true, Some(href)) = (child.is_published(), child.kind.href()) {
                        entries.push(NavEntry {
                            id: child.id.clone(),
                            title: child.title.clone(),
                            href,
                        });
                    }
                }
            }
            MenuItemKind::ExternalUrl { .. } | MenuItemKind::InternalPath { .. } | MenuItemKind::Resource { .. } => {
                if let Some(href) = item.kind.href() {
                    entries.push(NavEntry {
                        id: item.id.clone(),
                        title: item.title.clone(),
                        href,
                    });
                }
            }
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::PublishState;

    fn published(mut item: MenuItem) -> MenuItem {
        item.state = PublishState::Published;
        item
    }

    fn path(id: &str, parent: Option<&str>, order: i32) -> MenuItem {
        let mut item = MenuItem::new(id, "main", id.to_uppercase(), MenuItemKind::InternalPath { path: format!("/{}", id) });
        item.parent_id = parent.map(str::to_string);
        item.order = order;
        item
    }

    fn group(id: &str, order: i32) -> MenuItem {
        let mut item = MenuItem::new(id, "main", id, MenuItemKind::Group);
        item.order = order;
        item
    }

    #[test]
    fn test_draft_group_hides_published_child() {
        let items = vec![group("g", 0), published(path("a", Some("g"), 0))];
        assert!(!ancestors_published(&items, "a"));
        assert!(public_navigation(&items).is_empty());
        // The child keeps its own state
        assert!(items[1].is_published());
    }

    #[test]
    fn test_groups_expand_in_place() {
        let items = vec![
            published(path("home", None, 0)),
            published(group("g", 1)),
            published(path("b", Some("g"), 1)),
            published(path("a", Some("g"), 0)),
            path("draft", Some("g"), 2),
            published(path("last", None, 2)),
        ];
        let hrefs: Vec<String> = public_navigation(&items).into_iter().map(|e| e.href).collect();
        assert_eq!(hrefs, vec!["/home", "/a", "/b", "/last"]);
    }

    #[test]
    fn test_dangling_parent_is_hidden() {
        let items = vec![published(path("a", Some("gone"), 0))];
        assert!(!ancestors_published(&items, "a"));
        assert!(!ancestors_published(&items, "unknown"));
    }

    #[test]
    fn test_cycle_terminates() {
        let items = vec![published(path("a", Some("b"), 0)), published(path("b", Some("a"), 0))];
        assert!(!ancestors_published(&items, "a"));
    }
}

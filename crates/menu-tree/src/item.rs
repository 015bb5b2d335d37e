//! Menu Item Entity
//!
//! A navigation entry inside a menu. Items form a two-level tree:
//! root items, groups, and the leaves inside a group.

use serde::{Deserialize, Serialize};

/// What a menu item points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum MenuItemKind {
    /// Absolute link to another site
    ExternalUrl { url: String },
    /// Path inside the website
    InternalPath { path: String },
    /// Reference to a CMS resource (project, category, page...)
    Resource {
        resource_type: String,
        resource_id: String,
    },
    /// Container whose children render in its place
    Group,
}

impl MenuItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuItemKind::ExternalUrl { .. } => "external_url",
            MenuItemKind::InternalPath { .. } => "internal_path",
            MenuItemKind::Resource { .. } => "resource",
            MenuItemKind::Group => "group",
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, MenuItemKind::Group)
    }

    /// Link target for rendering, `None` for groups
    pub fn href(&self) -> Option<String> {
        match self {
            MenuItemKind::ExternalUrl { url } => Some(url.clone()),
            MenuItemKind::InternalPath { path } => Some(path.clone()),
            MenuItemKind::Resource {
                resource_type,
                resource_id,
            } => Some(format!("/{}/{}", resource_type, resource_id)),
            MenuItemKind::Group => None,
        }
    }
}

/// Publication state, independent per item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PublishState {
    Published,
    #[default]
    Draft,
}

impl PublishState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishState::Published => "published",
            PublishState::Draft => "draft",
        }
    }

    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "published" => PublishState::Published,
            _ => PublishState::Draft,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PublishState::Published => PublishState::Draft,
            PublishState::Draft => PublishState::Published,
        }
    }
}

/// A menu item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Stable identifier, unique within a menu
    pub id: String,
    /// Owning menu
    pub menu_id: String,
    /// Parent group ID (None = root level)
    pub parent_id: Option<String>,
    /// Position among siblings sharing `parent_id`
    pub order: i32,
    pub title: String,
    #[serde(flatten)]
    pub kind: MenuItemKind,
    pub state: PublishState,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl MenuItem {
    /// Create a new root item in draft state
    pub fn new(id: impl Into<String>, menu_id: impl Into<String>, title: impl Into<String>, kind: MenuItemKind) -> Self {
        Self {
            id: id.into(),
            menu_id: menu_id.into(),
            parent_id: None,
            order: 0,
            title: title.into(),
            kind,
            state: PublishState::Draft,
            created_at: None,
            updated_at: None,
        }
    }

    /// Create a new item under a group
    pub fn new_child(
        id: impl Into<String>,
        menu_id: impl Into<String>,
        title: impl Into<String>,
        kind: MenuItemKind,
        parent_id: impl Into<String>,
        order: i32,
    ) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            order,
            ..Self::new(id, menu_id, title, kind)
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_group(&self) -> bool {
        self.kind.is_group()
    }

    pub fn is_published(&self) -> bool {
        self.state == PublishState::Published
    }
}

/// A named menu owning a tree of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_creation() {
        let item = MenuItem::new("a", "main", "Home", MenuItemKind::InternalPath { path: "/".into() });
        assert!(item.is_root());
        assert!(!item.is_group());
        assert_eq!(item.state, PublishState::Draft);
    }

    #[test]
    fn test_child_item_creation() {
        let child = MenuItem::new_child("b", "main", "Docs", MenuItemKind::Group, "a", 3);
        assert_eq!(child.parent_id.as_deref(), Some("a"));
        assert_eq!(child.order, 3);
        assert!(child.is_group());
    }

    #[test]
    fn test_kind_wire_format() {
        let item = MenuItem::new(
            "r1",
            "main",
            "Project",
            MenuItemKind::Resource {
                resource_type: "projects".into(),
                resource_id: "42".into(),
            },
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "resource");
        assert_eq!(json["resourceType"], "projects");
        assert_eq!(json["resourceId"], "42");
        assert_eq!(json["menuId"], "main");
        assert_eq!(json["state"], "draft");

        let back: MenuItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_href() {
        let res = MenuItemKind::Resource {
            resource_type: "projects".into(),
            resource_id: "42".into(),
        };
        assert_eq!(res.href().as_deref(), Some("/projects/42"));
        assert_eq!(MenuItemKind::Group.href(), None);
    }

    #[test]
    fn test_publish_state_toggle() {
        assert_eq!(PublishState::Draft.toggled(), PublishState::Published);
        assert_eq!(PublishState::parse_lossy("published"), PublishState::Published);
        assert_eq!(PublishState::parse_lossy("anything"), PublishState::Draft);
    }
}

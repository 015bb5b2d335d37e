//! Menu Item Entity
//!
//! `MenuItem` itself comes from `menu-tree`; this module adds the
//! repository-facing inputs.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};
use menu_tree::{MenuItem, MenuItemKind, PublishState};

impl Entity for MenuItem {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

/// Input for creating a menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub menu_id: String,
    pub parent_id: Option<String>,
    pub title: String,
    #[serde(flatten)]
    pub kind: MenuItemKind,
    #[serde(default)]
    pub state: PublishState,
    /// Insert position among siblings (None = append)
    #[serde(default)]
    pub index: Option<usize>,
}

impl ItemDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::InvalidInput("title must not be empty".to_string()));
        }
        validate_kind(&self.kind)
    }

    /// Build the entity with a fresh ID; order is assigned by the repository
    pub fn into_item(self, id: String) -> MenuItem {
        MenuItem {
            id,
            menu_id: self.menu_id,
            parent_id: self.parent_id,
            order: 0,
            title: self.title.trim().to_string(),
            kind: self.kind,
            state: self.state,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Content edit. Placement changes go through reorder/move instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub title: Option<String>,
    pub kind: Option<MenuItemKind>,
    pub state: Option<PublishState>,
}

impl ItemPatch {
    /// Apply onto an existing item. A group can't change type while it has children.
    pub fn apply(self, mut item: MenuItem, has_children: bool) -> DomainResult<MenuItem> {
        if let Some(title) = self.title {
            if title.trim().is_empty() {
                return Err(DomainError::InvalidInput("title must not be empty".to_string()));
            }
            item.title = title.trim().to_string();
        }
        if let Some(kind) = self.kind {
            validate_kind(&kind)?;
            if item.is_group() && !kind.is_group() && has_children {
                return Err(DomainError::Conflict(format!("group {} still has children", item.id)));
            }
            if !item.is_group() && kind.is_group() && item.parent_id.is_some() {
                return Err(DomainError::InvalidInput(format!("item {} is inside a group", item.id)));
            }
            item.kind = kind;
        }
        if let Some(state) = self.state {
            item.state = state;
        }
        Ok(item)
    }
}

fn validate_kind(kind: &MenuItemKind) -> DomainResult<()> {
    let blank = |field: &str, value: &str| {
        if value.trim().is_empty() {
            Err(DomainError::InvalidInput(format!("{} must not be empty", field)))
        } else {
            Ok(())
        }
    };
    match kind {
        MenuItemKind::ExternalUrl { url } => {
            blank("url", url)?;
            if !(url.starts_with("http://") || url.starts_with("https://") || url.starts_with("mailto:")) {
                return Err(DomainError::InvalidInput(format!("not an absolute url: {}", url)));
            }
            Ok(())
        }
        MenuItemKind::InternalPath { path } => {
            blank("path", path)?;
            if !path.starts_with('/') {
                return Err(DomainError::InvalidInput(format!("path must start with '/': {}", path)));
            }
            Ok(())
        }
        MenuItemKind::Resource { resource_type, resource_id } => {
            blank("resource type", resource_type)?;
            blank("resource id", resource_id)
        }
        MenuItemKind::Group => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(kind: MenuItemKind) -> ItemDraft {
        ItemDraft {
            menu_id: "m".into(),
            parent_id: None,
            title: "  Docs ".into(),
            kind,
            state: PublishState::Draft,
            index: None,
        }
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft(MenuItemKind::InternalPath { path: "/docs".into() }).validate().is_ok());
        assert!(draft(MenuItemKind::InternalPath { path: "docs".into() }).validate().is_err());
        assert!(draft(MenuItemKind::ExternalUrl { url: "ftp://x".into() }).validate().is_err());
        let mut empty = draft(MenuItemKind::Group);
        empty.title = " ".into();
        assert_eq!(
            empty.validate(),
            Err(DomainError::InvalidInput("title must not be empty".into()))
        );
    }

    #[test]
    fn test_into_item_trims_title() {
        let item = draft(MenuItemKind::Group).into_item("id1".into());
        assert_eq!(item.title, "Docs");
        assert_eq!(item.id(), "id1");
    }

    #[test]
    fn test_patch_rules() {
        let group = draft(MenuItemKind::Group).into_item("g".into());
        let patch = ItemPatch { kind: Some(MenuItemKind::InternalPath { path: "/x".into() }), ..Default::default() };
        assert!(matches!(patch.clone().apply(group.clone(), true), Err(DomainError::Conflict(_))));
        assert!(patch.apply(group, false).is_ok());

        let mut child = draft(MenuItemKind::InternalPath { path: "/a".into() }).into_item("c".into());
        child.parent_id = Some("g".into());
        let to_group = ItemPatch { kind: Some(MenuItemKind::Group), ..Default::default() };
        assert!(matches!(to_group.apply(child.clone(), false), Err(DomainError::InvalidInput(_))));

        let publish = ItemPatch { state: Some(PublishState::Published), ..Default::default() };
        assert!(publish.apply(child, false).unwrap().is_published());
    }
}

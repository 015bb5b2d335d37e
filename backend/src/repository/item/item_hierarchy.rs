//! Item Hierarchy Operations
//!
//! Operations for managing parent-child relationships between items.
//! Menus are at most two levels deep: root -> group -> leaf.

use async_trait::async_trait;
use rusqlite::params;

use super::item_positioning::{load_children, load_items, write_sequence};
use crate::domain::{DomainError, DomainResult, MenuItem, Scope};
use crate::repository::db::{not_initialized, now_ms};
use menu_tree::reorder::{plan, Gesture, Plan};

/// Trait for item hierarchy operations
#[async_trait]
pub trait ItemHierarchyOperations {
    /// Get children of a parent item (None = root items)
    async fn get_children(&self, menu_id: &str, parent_id: Option<&str>) -> DomainResult<Vec<MenuItem>>;

    /// Move item to a new parent and sibling slot
    async fn move_to(&self, id: &str, new_parent_id: Option<&str>, position: usize) -> DomainResult<MenuItem>;

    /// Whether a group still has children
    async fn has_children(&self, id: &str) -> DomainResult<bool>;
}

#[async_trait]
impl ItemHierarchyOperations for super::item_repo::MenuItemRepository {
    async fn get_children(&self, menu_id: &str, parent_id: Option<&str>) -> DomainResult<Vec<MenuItem>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        load_children(conn, menu_id, parent_id)
    }

    async fn move_to(&self, id: &str, new_parent_id: Option<&str>, position: usize) -> DomainResult<MenuItem> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        let item = super::item_repo::find_item(&tx, id)?
            .ok_or_else(|| DomainError::NotFound(format!("Menu item {} not found", id)))?;
        let items = load_items(&tx, &item.menu_id)?;

        // Same engine as the client, so both sides agree on slot semantics
        let gesture = Gesture::DropInto {
            source: id.to_string(),
            scope: Scope::from_parent(new_parent_id),
            index: position,
        };
        let now = now_ms();
        match plan(&items, &gesture)? {
            Some(Plan::Reorder(reorder)) => {
                write_sequence(&tx, reorder.scope.parent_id(), &reorder.ordered_ids, now)?;
            }
            Some(Plan::Move(mv)) => {
                write_sequence(&tx, mv.to.parent_id(), &mv.target_ids, now)?;
                write_sequence(&tx, mv.from.parent_id(), &mv.source_ids, now)?;
            }
            None => {}
        }

        let moved = super::item_repo::find_item(&tx, id)?
            .ok_or_else(|| DomainError::NotFound(format!("Menu item {} not found", id)))?;
        tx.commit()?;
        Ok(moved)
    }

    async fn has_children(&self, id: &str) -> DomainResult<bool> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM menu_items WHERE parent_id = ?",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

//! Item Positioning Operations
//!
//! Operations for managing item positions within their parent scope.
//! Positions are always written from array index, so a scope is `0..n`
//! after every write.

use async_trait::async_trait;
use rusqlite::{params, Connection};

use super::item_repo::{row_to_item, ITEM_COLUMNS};
use crate::domain::{DomainError, DomainResult, MenuItem, Scope};
use crate::repository::db::{not_initialized, now_ms};
use menu_tree::order::dense_sequence;
use menu_tree::partition::sibling_ids;
use menu_tree::reorder::check_parent;

/// Trait for item positioning operations
#[async_trait]
pub trait ItemPositioningOperations {
    /// Get next position for a parent (used in create)
    async fn get_next_position(&self, menu_id: &str, parent_id: Option<&str>) -> DomainResult<i32>;

    /// Reindex items under a parent to be sequential (0, 1, 2, ...)
    async fn reindex_items(&self, menu_id: &str, parent_id: Option<&str>) -> DomainResult<()>;

    /// Store a new sibling order for one scope and return the scope's children.
    ///
    /// Unknown IDs are skipped. Siblings missing from `ordered_ids` keep their
    /// relative order after the listed ones. IDs that currently live in
    /// another scope are moved into this one (group rules apply) and the scope
    /// they left is reindexed.
    async fn reorder_items(
        &self,
        menu_id: &str,
        parent_id: Option<&str>,
        ordered_ids: &[String],
    ) -> DomainResult<Vec<MenuItem>>;
}

// `parent_id IS ?` matches NULL for the root scope as well as group IDs.

/// All items of a menu, root scope first, by position
pub(super) fn load_items(conn: &Connection, menu_id: &str) -> DomainResult<Vec<MenuItem>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM menu_items WHERE menu_id = ? ORDER BY parent_id NULLS FIRST, position ASC, created_at ASC",
        ITEM_COLUMNS
    ))?;
    let items = stmt.query_map(params![menu_id], row_to_item)?.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(items)
}

pub(super) fn load_children(conn: &Connection, menu_id: &str, parent_id: Option<&str>) -> DomainResult<Vec<MenuItem>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM menu_items WHERE menu_id = ? AND parent_id IS ? ORDER BY position ASC, created_at ASC",
        ITEM_COLUMNS
    ))?;
    let items = stmt
        .query_map(params![menu_id, parent_id], row_to_item)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(items)
}

pub(super) fn next_position(conn: &Connection, menu_id: &str, parent_id: Option<&str>) -> DomainResult<i32> {
    let next = conn.query_row(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM menu_items WHERE menu_id = ? AND parent_id IS ?",
        params![menu_id, parent_id],
        |row| row.get::<_, i32>(0),
    )?;
    Ok(next)
}

/// Write `parent_id` and position = index for each ID
pub(super) fn write_sequence(conn: &Connection, parent_id: Option<&str>, ids: &[String], now: i64) -> DomainResult<()> {
    let mut stmt = conn.prepare("UPDATE menu_items SET parent_id = ?, position = ?, updated_at = ? WHERE id = ?")?;
    for (position, id) in ids.iter().enumerate() {
        stmt.execute(params![parent_id, position as i32, now, id])?;
    }
    Ok(())
}

pub(super) fn reindex_scope(conn: &Connection, menu_id: &str, parent_id: Option<&str>, now: i64) -> DomainResult<()> {
    let ids: Vec<String> = load_children(conn, menu_id, parent_id)?.into_iter().map(|item| item.id).collect();
    write_sequence(conn, parent_id, &ids, now)
}

/// Reorder (and adopt moved-in items) inside an open transaction
pub(super) fn reorder_scope(
    conn: &Connection,
    menu_id: &str,
    scope: &Scope,
    ordered_ids: &[String],
) -> DomainResult<Vec<MenuItem>> {
    let items = load_items(conn, menu_id)?;

    if let Scope::Group(group_id) = scope {
        match items.iter().find(|item| &item.id == group_id) {
            Some(group) if group.is_group() => {}
            Some(_) => return Err(DomainError::InvalidInput(format!("Menu item {} is not a group", group_id))),
            None => return Err(DomainError::NotFound(format!("Group {} not found in menu {}", group_id, menu_id))),
        }
    }

    let mut candidates = sibling_ids(&items, scope);
    let mut left_scopes: Vec<Scope> = Vec::new();
    for id in ordered_ids {
        let Some(item) = items.iter().find(|item| &item.id == id) else {
            log::debug!("reorder: skipping unknown item {} in menu {}", id, menu_id);
            continue;
        };
        if candidates.contains(id) {
            continue;
        }
        check_parent(&items, item, scope)?;
        let from = Scope::of(item);
        if !left_scopes.contains(&from) {
            left_scopes.push(from);
        }
        candidates.push(id.clone());
    }

    let sequence = dense_sequence(&candidates, ordered_ids);
    let now = now_ms();
    write_sequence(conn, scope.parent_id(), &sequence, now)?;
    for left in &left_scopes {
        reindex_scope(conn, menu_id, left.parent_id(), now)?;
    }

    load_children(conn, menu_id, scope.parent_id())
}

#[async_trait]
impl ItemPositioningOperations for super::item_repo::MenuItemRepository {
    async fn get_next_position(&self, menu_id: &str, parent_id: Option<&str>) -> DomainResult<i32> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        next_position(conn, menu_id, parent_id)
    }

    async fn reindex_items(&self, menu_id: &str, parent_id: Option<&str>) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;
        reindex_scope(&tx, menu_id, parent_id, now_ms())?;
        tx.commit()?;
        Ok(())
    }

    async fn reorder_items(
        &self,
        menu_id: &str,
        parent_id: Option<&str>,
        ordered_ids: &[String],
    ) -> DomainResult<Vec<MenuItem>> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;
        let scope = Scope::from_parent(parent_id);
        let children = reorder_scope(&tx, menu_id, &scope, ordered_ids)?;
        tx.commit()?;
        log::info!(
            "Reordered {} items under {:?} in menu {}",
            children.len(),
            parent_id,
            menu_id
        );
        Ok(children)
    }
}

//! Menu Item Repository Implementation
//!
//! SQLite-backed implementation of Repository<MenuItem>

use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::item_positioning::{load_items, next_position, reindex_scope, write_sequence};
use crate::domain::{DomainError, DomainResult, MenuItem, MenuItemKind, PublishState, Scope};
use crate::repository::db::{not_initialized, now_ms, SharedConnection};
use crate::repository::traits::Repository;
use menu_tree::partition::sibling_ids;
use menu_tree::reorder::check_parent;

pub(super) const ITEM_COLUMNS: &str =
    "id, menu_id, parent_id, position, title, item_type, url, path, resource_type, resource_id, state, created_at, updated_at";

/// SQLite implementation of MenuItem repository
pub struct MenuItemRepository {
    pub(super) conn: SharedConnection,
}

/// Columns holding the link target of each kind
struct KindColumns<'a> {
    item_type: &'static str,
    url: Option<&'a str>,
    path: Option<&'a str>,
    resource_type: Option<&'a str>,
    resource_id: Option<&'a str>,
}

fn kind_columns(kind: &MenuItemKind) -> KindColumns<'_> {
    let mut cols = KindColumns {
        item_type: kind.as_str(),
        url: None,
        path: None,
        resource_type: None,
        resource_id: None,
    };
    match kind {
        MenuItemKind::ExternalUrl { url } => cols.url = Some(url),
        MenuItemKind::InternalPath { path } => cols.path = Some(path),
        MenuItemKind::Resource { resource_type, resource_id } => {
            cols.resource_type = Some(resource_type);
            cols.resource_id = Some(resource_id);
        }
        MenuItemKind::Group => {}
    }
    cols
}

/// Convert a database row (selected with ITEM_COLUMNS) to MenuItem
pub(super) fn row_to_item(row: &Row<'_>) -> rusqlite::Result<MenuItem> {
    let item_type: String = row.get(5)?;
    let text = |idx: usize| -> rusqlite::Result<String> { Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default()) };
    let kind = match item_type.as_str() {
        "external_url" => MenuItemKind::ExternalUrl { url: text(6)? },
        "internal_path" => MenuItemKind::InternalPath { path: text(7)? },
        "resource" => MenuItemKind::Resource {
            resource_type: text(8)?,
            resource_id: text(9)?,
        },
        "group" => MenuItemKind::Group,
        _ => return Err(rusqlite::Error::InvalidColumnType(5, "item_type".to_string(), Type::Text)),
    };

    Ok(MenuItem {
        id: row.get(0)?,
        menu_id: row.get(1)?,
        parent_id: row.get(2)?,
        order: row.get(3)?,
        title: row.get(4)?,
        kind,
        state: PublishState::parse_lossy(&row.get::<_, String>(10)?),
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

pub(super) fn find_item(conn: &Connection, id: &str) -> DomainResult<Option<MenuItem>> {
    let item = conn
        .query_row(
            &format!("SELECT {} FROM menu_items WHERE id = ?", ITEM_COLUMNS),
            params![id],
            row_to_item,
        )
        .optional()?;
    Ok(item)
}

fn menu_exists(conn: &Connection, menu_id: &str) -> DomainResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM menus WHERE id = ?", params![menu_id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

/// Insert `entity` at `index` among its siblings (None = append)
fn insert_item(conn: &Connection, entity: &MenuItem, index: Option<usize>) -> DomainResult<MenuItem> {
    if !menu_exists(conn, &entity.menu_id)? {
        return Err(DomainError::NotFound(format!("Menu {} not found", entity.menu_id)));
    }
    let items = load_items(conn, &entity.menu_id)?;
    let scope = Scope::of(entity);
    check_parent(&items, entity, &scope)?;

    let mut item = entity.clone();
    if item.id.is_empty() {
        item.id = uuid::Uuid::new_v4().to_string();
    }
    let now = now_ms();
    item.order = next_position(conn, &item.menu_id, item.parent_id.as_deref())?;
    item.created_at = Some(now);
    item.updated_at = Some(now);

    let cols = kind_columns(&item.kind);
    conn.execute(
        &format!(
            "INSERT INTO menu_items ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            ITEM_COLUMNS
        ),
        params![
            item.id,
            item.menu_id,
            item.parent_id,
            item.order,
            item.title,
            cols.item_type,
            cols.url,
            cols.path,
            cols.resource_type,
            cols.resource_id,
            item.state.as_str(),
            item.created_at,
            item.updated_at,
        ],
    )?;

    if let Some(index) = index {
        let mut ids: Vec<String> = sibling_ids(&items, &scope);
        ids.insert(index.min(ids.len()), item.id.clone());
        write_sequence(conn, scope.parent_id(), &ids, now)?;
        item.order = ids.iter().position(|id| id == &item.id).unwrap_or(ids.len() - 1) as i32;
    }
    Ok(item)
}

impl MenuItemRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Create an item at a sibling index (None = append at the end)
    pub async fn create_at(&self, entity: &MenuItem, index: Option<usize>) -> DomainResult<MenuItem> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;
        let item = insert_item(&tx, entity, index)?;
        tx.commit()?;
        log::info!("Created menu item {} in menu {} at {}", item.id, item.menu_id, item.order);
        Ok(item)
    }

    /// List the items of one menu, root scope first, by position
    pub async fn list_by_menu(&self, menu_id: &str) -> DomainResult<Vec<MenuItem>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        load_items(conn, menu_id)
    }

    /// Set publish state
    pub async fn set_state(&self, id: &str, state: PublishState) -> DomainResult<MenuItem> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        let changed = conn.execute(
            "UPDATE menu_items SET state = ?, updated_at = ? WHERE id = ?",
            params![state.as_str(), now_ms(), id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Menu item {} not found", id)));
        }
        find_item(conn, id)?.ok_or_else(|| DomainError::NotFound(format!("Menu item {} not found", id)))
    }
}

#[async_trait]
impl Repository<MenuItem> for MenuItemRepository {
    async fn create(&self, entity: &MenuItem) -> DomainResult<MenuItem> {
        self.create_at(entity, None).await
    }

    async fn find_by_id(&self, id: &String) -> DomainResult<Option<MenuItem>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        find_item(conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<MenuItem>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM menu_items ORDER BY menu_id, parent_id NULLS FIRST, position ASC",
            ITEM_COLUMNS
        ))?;
        let items = stmt.query_map([], row_to_item)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    /// Updates content fields only; parent and position are owned by reorder/move
    async fn update(&self, entity: &MenuItem) -> DomainResult<MenuItem> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let cols = kind_columns(&entity.kind);
        let changed = conn.execute(
            "UPDATE menu_items SET title = ?, item_type = ?, url = ?, path = ?, resource_type = ?, resource_id = ?, state = ?, updated_at = ? WHERE id = ?",
            params![
                entity.title,
                cols.item_type,
                cols.url,
                cols.path,
                cols.resource_type,
                cols.resource_id,
                entity.state.as_str(),
                now_ms(),
                entity.id,
            ],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Menu item {} not found", entity.id)));
        }
        find_item(conn, &entity.id)?.ok_or_else(|| DomainError::NotFound(format!("Menu item {} not found", entity.id)))
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;

        let item = find_item(&tx, id)?.ok_or_else(|| DomainError::NotFound(format!("Menu item {} not found", id)))?;

        // Children of a group go with it
        tx.execute("DELETE FROM menu_items WHERE parent_id = ?", params![id])?;
        tx.execute("DELETE FROM menu_items WHERE id = ?", params![id])?;

        // Close the gap among former siblings
        reindex_scope(&tx, &item.menu_id, item.parent_id.as_deref(), now_ms())?;
        tx.commit()?;
        log::info!("Deleted menu item {} from menu {}", id, item.menu_id);
        Ok(())
    }
}

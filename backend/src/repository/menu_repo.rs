//! Menu Repository Implementation

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};

use super::db::{not_initialized, now_ms, SharedConnection};
use super::traits::Repository;
use crate::domain::{DomainError, DomainResult, Menu};

/// SQLite implementation of Menu repository
pub struct MenuRepository {
    conn: SharedConnection,
}

fn row_to_menu(row: &Row<'_>) -> rusqlite::Result<Menu> {
    Ok(Menu {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
    })
}

impl MenuRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Menu>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        let menu = conn
            .query_row(
                "SELECT id, name, slug FROM menus WHERE slug = ?",
                params![slug],
                row_to_menu,
            )
            .optional()?;
        Ok(menu)
    }
}

#[async_trait]
impl Repository<Menu> for MenuRepository {
    async fn create(&self, entity: &Menu) -> DomainResult<Menu> {
        if entity.slug.is_empty() {
            return Err(DomainError::InvalidInput("menu slug must not be empty".to_string()));
        }
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut menu = entity.clone();
        if menu.id.is_empty() {
            menu.id = uuid::Uuid::new_v4().to_string();
        }
        conn.execute(
            "INSERT INTO menus (id, name, slug, created_at) VALUES (?, ?, ?, ?)",
            params![menu.id, menu.name, menu.slug, now_ms()],
        )?;
        Ok(menu)
    }

    async fn find_by_id(&self, id: &String) -> DomainResult<Option<Menu>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        let menu = conn
            .query_row("SELECT id, name, slug FROM menus WHERE id = ?", params![id], row_to_menu)
            .optional()?;
        Ok(menu)
    }

    async fn list(&self) -> DomainResult<Vec<Menu>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        let mut stmt = conn.prepare("SELECT id, name, slug FROM menus ORDER BY created_at, name")?;
        let menus = stmt.query_map([], row_to_menu)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(menus)
    }

    async fn update(&self, entity: &Menu) -> DomainResult<Menu> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        let changed = conn.execute(
            "UPDATE menus SET name = ?, slug = ? WHERE id = ?",
            params![entity.name, entity.slug, entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Menu {} not found", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM menu_items WHERE menu_id = ?", params![id])?;
        let changed = tx.execute("DELETE FROM menus WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Menu {} not found", id)));
        }
        tx.commit()?;
        Ok(())
    }
}

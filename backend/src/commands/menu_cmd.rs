//! Commands for Menu CRUD

use crate::domain::{DomainError, Menu, NewMenu};
use crate::repository::Repository;
use crate::AppState;

/// Create a new menu
pub async fn create_menu(state: &AppState, new_menu: NewMenu) -> Result<Menu, String> {
    let slug = new_menu.slug();
    if new_menu.name.trim().is_empty() || slug.is_empty() {
        return Err(DomainError::InvalidInput("menu name must contain letters or digits".to_string()).to_string());
    }
    let menu = Menu {
        id: String::new(), // assigned by repository
        name: new_menu.name.trim().to_string(),
        slug,
    };
    state.menu_repo.create(&menu).await.map_err(|e| e.to_string())
}

/// List all menus
pub async fn list_menus(state: &AppState) -> Result<Vec<Menu>, String> {
    state.menu_repo.list().await.map_err(|e| e.to_string())
}

/// Rename a menu (slug unchanged)
pub async fn rename_menu(state: &AppState, id: String, name: String) -> Result<Menu, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidInput("menu name must not be empty".to_string()).to_string());
    }
    let mut menu = state
        .menu_repo
        .find_by_id(&id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Menu {} not found", id))?;
    menu.name = name.to_string();
    state.menu_repo.update(&menu).await.map_err(|e| e.to_string())
}

/// Delete a menu and all of its items
pub async fn delete_menu(state: &AppState, id: String) -> Result<(), String> {
    state.menu_repo.delete(&id).await.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[tokio::test]
    async fn test_rename_validates_name() {
        let state = AppState::open(AppConfig::in_memory()).await.unwrap();
        let menu = create_menu(&state, NewMenu { name: "Header".into(), slug: None }).await.unwrap();

        assert!(rename_menu(&state, menu.id.clone(), "   ".into()).await.is_err());
        assert!(create_menu(&state, NewMenu { name: " ".into(), slug: None }).await.is_err());

        let renamed = rename_menu(&state, menu.id.clone(), "  Top bar ".into()).await.unwrap();
        assert_eq!(renamed.name, "Top bar");
        assert_eq!(renamed.slug, "header");
        assert!(rename_menu(&state, "missing".into(), "X".into()).await.is_err());
    }
}

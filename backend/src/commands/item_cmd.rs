//! Commands for Menu Item CRUD + Ordering

use menu_tree::navigation::{public_navigation, NavEntry};
use menu_tree::ReorderRequest;

use crate::domain::{ItemDraft, ItemPatch, MenuItem};
use crate::repository::{ItemHierarchyOperations, ItemPositioningOperations, Repository};
use crate::AppState;

/// Create a new item, appended or inserted at `draft.index`
pub async fn create_menu_item(state: &AppState, draft: ItemDraft) -> Result<MenuItem, String> {
    draft.validate().map_err(|e| e.to_string())?;
    let index = draft.index;
    let item = draft.into_item(String::new()); // ID assigned by repository
    state.item_repo.create_at(&item, index).await.map_err(|e| e.to_string())
}

/// List the items of a menu
pub async fn list_menu_items(state: &AppState, menu_id: String) -> Result<Vec<MenuItem>, String> {
    state.item_repo.list_by_menu(&menu_id).await.map_err(|e| e.to_string())
}

/// Get item by ID
pub async fn get_menu_item(state: &AppState, id: String) -> Result<Option<MenuItem>, String> {
    state.item_repo.find_by_id(&id).await.map_err(|e| e.to_string())
}

/// Edit title, kind or state
pub async fn update_menu_item(state: &AppState, id: String, patch: ItemPatch) -> Result<MenuItem, String> {
    let existing = state
        .item_repo
        .find_by_id(&id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Menu item {} not found", id))?;
    let has_children = state.item_repo.has_children(&id).await.map_err(|e| e.to_string())?;
    let updated = patch.apply(existing, has_children).map_err(|e| e.to_string())?;
    state.item_repo.update(&updated).await.map_err(|e| e.to_string())
}

/// Delete item (children of a group go with it)
pub async fn delete_menu_item(state: &AppState, id: String) -> Result<(), String> {
    state.item_repo.delete(&id).await.map_err(|e| e.to_string())
}

/// Flip published/draft
pub async fn toggle_menu_item_state(state: &AppState, id: String) -> Result<MenuItem, String> {
    let item = state
        .item_repo
        .find_by_id(&id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Menu item {} not found", id))?;
    state
        .item_repo
        .set_state(&id, item.state.toggled())
        .await
        .map_err(|e| e.to_string())
}

/// Store a new sibling order (and parent, for items moved into the scope)
pub async fn reorder_menu_items(state: &AppState, request: ReorderRequest) -> Result<Vec<MenuItem>, String> {
    state
        .item_repo
        .reorder_items(&request.menu_id, request.parent_id.as_deref(), &request.ordered_ids)
        .await
        .map_err(|e| {
            log::warn!("reorder_menu_items failed for menu {}: {}", request.menu_id, e);
            e.to_string()
        })
}

/// Move item to new parent at slot `position`
pub async fn move_menu_item(
    state: &AppState,
    id: String,
    new_parent_id: Option<String>,
    position: usize,
) -> Result<MenuItem, String> {
    state
        .item_repo
        .move_to(&id, new_parent_id.as_deref(), position)
        .await
        .map_err(|e| e.to_string())
}

/// Navigation the public site renders for a menu slug
pub async fn public_menu(state: &AppState, slug: String) -> Result<Vec<NavEntry>, String> {
    let menu = state
        .menu_repo
        .find_by_slug(&slug)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Menu {} not found", slug))?;
    let items = state.item_repo.list_by_menu(&menu.id).await.map_err(|e| e.to_string())?;
    Ok(public_navigation(&items))
}

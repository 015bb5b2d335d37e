//! Menu Item Commands
//!
//! Frontend bindings for item CRUD and ordering.

use serde::Serialize;

use super::{call, CallError, IdArgs};
use crate::models::{MenuItem, MenuItemKind, PublishState, ReorderRequest};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub menu_id: String,
    pub parent_id: Option<String>,
    pub title: String,
    #[serde(flatten)]
    pub kind: MenuItemKind,
    pub state: PublishState,
    pub index: Option<usize>,
}

#[derive(Serialize, Default)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<MenuItemKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<PublishState>,
}

#[derive(Serialize)]
struct CreateArgs<'a> {
    draft: &'a ItemDraft,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MenuIdArgs<'a> {
    menu_id: &'a str,
}

#[derive(Serialize)]
struct UpdateArgs<'a> {
    id: &'a str,
    patch: &'a ItemPatch,
}

#[derive(Serialize)]
struct ReorderArgs<'a> {
    request: &'a ReorderRequest,
}

// ========================
// Commands
// ========================

pub async fn list_menu_items(menu_id: &str) -> Result<Vec<MenuItem>, CallError> {
    call("list_menu_items", &MenuIdArgs { menu_id }).await
}

pub async fn create_menu_item(draft: &ItemDraft) -> Result<MenuItem, CallError> {
    call("create_menu_item", &CreateArgs { draft }).await
}

pub async fn update_menu_item(id: &str, patch: &ItemPatch) -> Result<MenuItem, CallError> {
    call("update_menu_item", &UpdateArgs { id, patch }).await
}

pub async fn delete_menu_item(id: &str) -> Result<(), CallError> {
    call("delete_menu_item", &IdArgs { id }).await
}

pub async fn toggle_menu_item_state(id: &str) -> Result<MenuItem, CallError> {
    call("toggle_menu_item_state", &IdArgs { id }).await
}

/// Store the sibling order of one scope; the reply (the stored children) is not needed
pub async fn reorder_menu_items(request: &ReorderRequest) -> Result<Vec<MenuItem>, CallError> {
    call("reorder_menu_items", &ReorderArgs { request }).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_admin_lib::commands::dispatch;
    use menu_admin_lib::config::AppConfig;
    use menu_admin_lib::AppState;

    async fn send<A: Serialize>(state: &AppState, cmd: &str, args: &A) -> serde_json::Value {
        let args = serde_json::to_value(args).unwrap();
        dispatch(state, cmd, args).await.unwrap_or_else(|e| panic!("{} failed: {}", cmd, e))
    }

    #[tokio::test]
    async fn test_item_args_match_backend_commands() {
        let state = AppState::open(AppConfig::in_memory()).await.unwrap();
        let menu: crate::models::Menu = serde_json::from_value(
            send(&state, "create_menu", &serde_json::json!({ "newMenu": { "name": "Main", "slug": null } })).await,
        )
        .unwrap();

        let mut created = Vec::new();
        for (title, kind) in [
            ("Docs", MenuItemKind::Group),
            ("Home", MenuItemKind::InternalPath { path: "/".into() }),
            ("Blog", MenuItemKind::Resource { resource_type: "page".into(), resource_id: "7".into() }),
        ] {
            let draft = ItemDraft {
                menu_id: menu.id.clone(),
                parent_id: None,
                title: title.into(),
                kind,
                state: PublishState::Draft,
                index: None,
            };
            let item: MenuItem = serde_json::from_value(send(&state, "create_menu_item", &CreateArgs { draft: &draft }).await).unwrap();
            created.push(item);
        }

        let patch = ItemPatch { title: Some("Start".into()), ..Default::default() };
        let updated: MenuItem = serde_json::from_value(
            send(&state, "update_menu_item", &UpdateArgs { id: &created[1].id, patch: &patch }).await,
        )
        .unwrap();
        assert_eq!(updated.title, "Start");
        assert_eq!(updated.kind, MenuItemKind::InternalPath { path: "/".into() });

        let toggled: MenuItem =
            serde_json::from_value(send(&state, "toggle_menu_item_state", &IdArgs { id: &created[2].id }).await).unwrap();
        assert!(toggled.is_published());

        let request = ReorderRequest {
            menu_id: menu.id.clone(),
            parent_id: None,
            ordered_ids: vec![created[2].id.clone(), created[0].id.clone(), created[1].id.clone()],
        };
        send(&state, "reorder_menu_items", &ReorderArgs { request: &request }).await;

        let items: Vec<MenuItem> =
            serde_json::from_value(send(&state, "list_menu_items", &MenuIdArgs { menu_id: &menu.id }).await).unwrap();
        let titles: Vec<&str> = menu_tree::partition::siblings(&items, &crate::models::Scope::Root)
            .into_iter()
            .map(|item| item.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Blog", "Docs", "Start"]);

        send(&state, "delete_menu_item", &IdArgs { id: &created[0].id }).await;
    }
}

//! Command Dispatch
//!
//! Routes an `invoke(cmd, args)` call from the admin UI to its handler.
//! `args` is an object keyed by camelCase parameter name.

use menu_tree::ReorderRequest;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::*;
use crate::domain::{ItemDraft, ItemPatch, NewMenu};
use crate::AppState;

/// Every command name `dispatch` accepts
pub const COMMANDS: &[&str] = &[
    "create_menu",
    "list_menus",
    "rename_menu",
    "delete_menu",
    "create_menu_item",
    "list_menu_items",
    "get_menu_item",
    "update_menu_item",
    "delete_menu_item",
    "toggle_menu_item_state",
    "reorder_menu_items",
    "move_menu_item",
    "public_menu",
];

#[derive(Deserialize)]
struct IdArgs {
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MenuIdArgs {
    menu_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateMenuArgs {
    new_menu: NewMenu,
}

#[derive(Deserialize)]
struct RenameMenuArgs {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct CreateItemArgs {
    draft: ItemDraft,
}

#[derive(Deserialize)]
struct UpdateItemArgs {
    id: String,
    patch: ItemPatch,
}

#[derive(Deserialize)]
struct ReorderArgs {
    request: ReorderRequest,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveArgs {
    id: String,
    new_parent_id: Option<String>,
    position: usize,
}

#[derive(Deserialize)]
struct SlugArgs {
    slug: String,
}

fn parse<T: DeserializeOwned>(cmd: &str, args: Value) -> Result<T, String> {
    serde_json::from_value(args).map_err(|e| format!("invalid arguments for {}: {}", cmd, e))
}

fn reply<T: Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Run one command and return its JSON reply
pub async fn dispatch(state: &AppState, cmd: &str, args: Value) -> Result<Value, String> {
    log::debug!("dispatch {}", cmd);
    match cmd {
        "create_menu" => {
            let CreateMenuArgs { new_menu } = parse(cmd, args)?;
            reply(create_menu(state, new_menu).await?)
        }
        "list_menus" => reply(list_menus(state).await?),
        "rename_menu" => {
            let RenameMenuArgs { id, name } = parse(cmd, args)?;
            reply(rename_menu(state, id, name).await?)
        }
        "delete_menu" => {
            let IdArgs { id } = parse(cmd, args)?;
            reply(delete_menu(state, id).await?)
        }
        "create_menu_item" => {
            let CreateItemArgs { draft } = parse(cmd, args)?;
            reply(create_menu_item(state, draft).await?)
        }
        "list_menu_items" => {
            let MenuIdArgs { menu_id } = parse(cmd, args)?;
            reply(list_menu_items(state, menu_id).await?)
        }
        "get_menu_item" => {
            let IdArgs { id } = parse(cmd, args)?;
            reply(get_menu_item(state, id).await?)
        }
        "update_menu_item" => {
            let UpdateItemArgs { id, patch } = parse(cmd, args)?;
            reply(update_menu_item(state, id, patch).await?)
        }
        "delete_menu_item" => {
            let IdArgs { id } = parse(cmd, args)?;
            reply(delete_menu_item(state, id).await?)
        }
        "toggle_menu_item_state" => {
            let IdArgs { id } = parse(cmd, args)?;
            reply(toggle_menu_item_state(state, id).await?)
        }
        "reorder_menu_items" => {
            let ReorderArgs { request } = parse(cmd, args)?;
            reply(reorder_menu_items(state, request).await?)
        }
        "move_menu_item" => {
            let MoveArgs { id, new_parent_id, position } = parse(cmd, args)?;
            reply(move_menu_item(state, id, new_parent_id, position).await?)
        }
        "public_menu" => {
            let SlugArgs { slug } = parse(cmd, args)?;
            reply(public_menu(state, slug).await?)
        }
        other => Err(format!("unknown command: {}", other)),
    }
}

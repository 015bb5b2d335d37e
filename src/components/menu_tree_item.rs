//! Menu Tree Item Component
//!
//! One item row: title, target, publish toggle, actions.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::MenuItem;
use crate::store::{store_edit, store_push_toast, store_remove_item, store_update_item, use_app_store, ToastLevel};

#[component]
pub fn MenuTreeItem(item: MenuItem, depth: usize) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let id = item.id.clone();
    let is_group = item.is_group();
    let published = item.is_published();
    let kind_label = item.kind.as_str();
    let target = item.kind.href().unwrap_or_default();
    let indent = depth * 24;

    let on_toggle = {
        let id = id.clone();
        move |_| {
            let id = id.clone();
            spawn_local(async move {
                match commands::toggle_menu_item_state(&id).await {
                    Ok(updated) => store_update_item(&store, updated),
                    Err(e) => {
                        store_push_toast(&store, ToastLevel::Error, format!("Could not change state: {}", e));
                    }
                }
            });
        }
    };

    let on_delete = {
        let id = id.clone();
        Callback::new(move |_| {
            let id = id.clone();
            spawn_local(async move {
                match commands::delete_menu_item(&id).await {
                    Ok(()) => store_remove_item(&store, &id),
                    Err(e) => {
                        store_push_toast(&store, ToastLevel::Error, format!("Could not delete: {}", e));
                    }
                }
            });
        })
    };

    let on_edit = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            store_edit(&store, Some(id.clone()));
        }
    };

    let add_child = is_group.then(|| {
        let id = id.clone();
        view! {
            <button class="add-child-btn" on:click=move |ev| {
                ev.stop_propagation();
                ctx.set_adding_under(Some(id.clone()));
            }>"+"</button>
        }
    });

    view! {
        <div
            class=if published { "item-row published" } else { "item-row draft" }
            style=format!("margin-left: {}px;", indent)
        >
            <span class=format!("kind-badge kind-{}", kind_label)>{kind_label}</span>
            <span class="item-text">{item.title.clone()}</span>
            <span class="item-target">{target}</span>

            <button class="state-btn" on:click=on_toggle>
                {if published { "Published" } else { "Draft" }}
            </button>
            {add_child}
            <button class="edit-btn" on:click=on_edit>"Edit"</button>
            <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete />
        </div>
    }
}

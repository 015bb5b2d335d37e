//! New Item Form Component
//!
//! Creates a menu item at the root or inside the group picked with "+".

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, ItemDraft};
use crate::components::TypeSelector;
use crate::context::use_app_context;
use crate::models::{kind_from_input, PublishState};
use crate::store::{store_insert_item, store_push_toast, use_app_store, AppStateStoreFields, ToastLevel};

#[component]
pub fn NewItemForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (title, set_title) = signal(String::new());
    let (target, set_target) = signal(String::new());
    let (kind, set_kind) = signal(String::from("internal_path"));

    let group_title = move || {
        let parent = ctx.adding_under.get()?;
        store.tree().with(|tree| tree.get(&parent).map(|group| group.title.clone()))
    };
    let at_root = Signal::derive(move || ctx.adding_under.get().is_none());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get();
        if text.trim().is_empty() {
            return;
        }
        let Some(menu_id) = store.current_menu_id().get_untracked() else {
            return;
        };
        let Some(item_kind) = kind_from_input(&kind.get(), &target.get()) else {
            store_push_toast(&store, ToastLevel::Error, "Enter a path starting with '/', a URL, or type/id");
            return;
        };
        let draft = ItemDraft {
            menu_id,
            parent_id: ctx.adding_under.get_untracked(),
            title: text,
            kind: item_kind,
            state: PublishState::Draft,
            index: None,
        };

        spawn_local(async move {
            match commands::create_menu_item(&draft).await {
                Ok(item) => {
                    let index = usize::try_from(item.order).unwrap_or(usize::MAX);
                    store_insert_item(&store, item, index);
                    set_title.set(String::new());
                    set_target.set(String::new());
                    ctx.set_adding_under(None);
                }
                Err(e) => {
                    store_push_toast(&store, ToastLevel::Error, format!("Could not create item: {}", e));
                }
            }
        });
    };

    view! {
        <form class="new-item-form" on:submit=on_submit>
            <div class="new-item-row">
                <input
                    type="text"
                    placeholder=move || match group_title() {
                        Some(group) => format!("Add item to {}...", group),
                        None => "Add menu item...".to_string(),
                    }
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="/path, https://..., or page/42"
                    prop:value=move || target.get()
                    prop:disabled=move || kind.get() == "group"
                    on:input=move |ev| set_target.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </div>

            <TypeSelector current=kind on_change=move |value| set_kind.set(value) allow_group=at_root />

            {move || group_title().map(|group| view! {
                <button type="button" class="cancel-btn" on:click=move |_| ctx.set_adding_under(None)>
                    "Cancel (" {group} ")"
                </button>
            })}
        </form>
    }
}

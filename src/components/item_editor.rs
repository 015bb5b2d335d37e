//! Item Editor Component
//!
//! Side panel editing the title and target of `tree.editing`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, ItemPatch};
use crate::components::TypeSelector;
use crate::models::{kind_from_input, MenuItem, MenuItemKind};
use crate::store::{store_edit, store_push_toast, store_update_item, use_app_store, AppStateStoreFields, ToastLevel};
use crate::tree::editor_key;

fn target_text(kind: &MenuItemKind) -> String {
    match kind {
        MenuItemKind::Resource { resource_type, resource_id } => format!("{}/{}", resource_type, resource_id),
        other => other.href().unwrap_or_default(),
    }
}

#[component]
pub fn ItemEditor() -> impl IntoView {
    let store = use_app_store();
    // Keyed on identity only, so a reorder doesn't rebuild the panel
    let editing = Memo::new(move |_| store.tree().with(editor_key));

    view! {
        {move || {
            let (id, locked) = editing.get()?;
            let item = store.tree().with_untracked(|tree| tree.get(&id).cloned())?;
            Some(view! { <EditorPanel item=item kind_locked=locked /> })
        }}
    }
}

#[component]
fn EditorPanel(item: MenuItem, kind_locked: bool) -> impl IntoView {
    let store = use_app_store();
    let id = item.id.clone();
    let (title, set_title) = signal(item.title.clone());
    let (target, set_target) = signal(target_text(&item.kind));
    let (kind, set_kind) = signal(item.kind.as_str().to_string());
    let nested = item.parent_id.is_some();

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(new_kind) = kind_from_input(&kind.get(), &target.get()) else {
            store_push_toast(&store, ToastLevel::Error, "Invalid target for this item type");
            return;
        };
        let patch = ItemPatch {
            title: Some(title.get()),
            kind: (!kind_locked).then_some(new_kind),
            state: None,
        };
        let id = id.clone();
        spawn_local(async move {
            match commands::update_menu_item(&id, &patch).await {
                Ok(updated) => {
                    store_update_item(&store, updated);
                    store_edit(&store, None);
                }
                Err(e) => {
                    store_push_toast(&store, ToastLevel::Error, format!("Could not save: {}", e));
                }
            }
        });
    };

    view! {
        <aside class="item-editor">
            <form on:submit=on_save>
                <label>"Title"</label>
                <input type="text" prop:value=move || title.get() on:input=move |ev| set_title.set(event_target_value(&ev)) />

                <Show when=move || !kind_locked>
                    <TypeSelector current=kind on_change=move |value| set_kind.set(value) allow_group=!nested />
                </Show>
                <input
                    type="text"
                    prop:value=move || target.get()
                    prop:disabled=move || kind.get() == "group"
                    on:input=move |ev| set_target.set(event_target_value(&ev))
                />

                <div class="editor-actions">
                    <button type="submit">"Save"</button>
                    <button type="button" on:click=move |_| store_edit(&store, None)>"Close"</button>
                </div>
            </form>
        </aside>
    }
}

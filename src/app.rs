//! Menu Admin Frontend App
//!
//! Menu tabs over the item tree, with an editor panel on the right.

use leptos::prelude::*;
use leptos::task::spawn_local;
use menu_tree::SyncConfig;
use reactive_stores::Store;

use crate::commands;
use crate::components::{ItemEditor, MenuTabBar, MenuTreeView, NewItemForm, ToastHost};
use crate::context::AppContext;
use crate::store::{store_push_toast, store_set_items, AppState, AppStateStoreFields, ToastLevel};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (adding_under, set_adding_under) = signal::<Option<String>>(None);
    let ctx = AppContext::new(
        (reload_trigger, set_reload_trigger),
        (adding_under, set_adding_under),
        SyncConfig::default(),
    );
    provide_context(ctx);

    // Load menus on mount
    spawn_local(async move {
        match commands::list_menus().await {
            Ok(menus) => {
                let first = menus.first().map(|menu| menu.id.clone());
                store.menus().set(menus);
                store.current_menu_id().set(first);
            }
            Err(e) => {
                store_push_toast(&store, ToastLevel::Error, format!("Could not load menus: {}", e));
            }
        }
    });

    // Load items when menu or trigger changes
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        let Some(menu_id) = store.current_menu_id().get() else {
            store_set_items(&store, Vec::new());
            return;
        };
        web_sys::console::log_1(&format!("[APP] Loading items for menu {}, trigger={}", menu_id, trigger).into());
        spawn_local(async move {
            match commands::list_menu_items(&menu_id).await {
                Ok(items) => {
                    web_sys::console::log_1(&format!("[APP] Loaded {} items", items.len()).into());
                    store_set_items(&store, items);
                }
                Err(e) => {
                    store_push_toast(&store, ToastLevel::Error, format!("Could not load items: {}", e));
                }
            }
        });
    });

    let item_count = move || store.tree().with(|tree| tree.items().len());

    view! {
        <div class="app-layout">
            <main class="main-content">
                <MenuTabBar />

                <div class="menu-toolbar">
                    <h1>"Menus"</h1>
                    <button class="reload-btn" on:click=move |_| ctx.reload()>"Reload"</button>
                </div>

                <Show
                    when=move || store.current_menu_id().with(Option::is_some)
                    fallback=|| view! { <p class="empty-hint">"Create a menu to start."</p> }
                >
                    <NewItemForm />
                </Show>
                // Mounted once: it owns the document-level drag listeners
                <MenuTreeView />
                <p class="item-count">{move || format!("{} items", item_count())}</p>
            </main>

            <ItemEditor />
            <ToastHost />
        </div>
    }
}

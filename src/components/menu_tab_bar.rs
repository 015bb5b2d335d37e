//! Menu Tab Bar Component
//!
//! Tabs for switching between menus, plus inline menu creation.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::store::{store_push_toast, use_app_store, AppStateStoreFields, ToastLevel};

#[component]
pub fn MenuTabBar() -> impl IntoView {
    let store = use_app_store();
    let (adding, set_adding) = signal(false);
    let (new_name, set_new_name) = signal(String::new());

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get();
        if name.trim().is_empty() {
            return;
        }

        spawn_local(async move {
            match commands::create_menu(&name).await {
                Ok(menu) => {
                    let id = menu.id.clone();
                    store_push_toast(&store, ToastLevel::Info, format!("Menu \"{}\" created", menu.name));
                    store.menus().write().push(menu);
                    store.current_menu_id().set(Some(id));
                }
                Err(e) => {
                    store_push_toast(&store, ToastLevel::Error, format!("Could not create menu: {}", e));
                }
            }
        });

        set_new_name.set(String::new());
        set_adding.set(false);
    };

    view! {
        <div class="menu-tab-bar">
            <For
                each=move || store.menus().get()
                key=|menu| (menu.id.clone(), menu.name.clone())
                children=move |menu| {
                    let id = menu.id.clone();
                    let is_active = {
                        let id = id.clone();
                        move || store.current_menu_id().with(|current| current.as_deref() == Some(id.as_str()))
                    };
                    let on_select = {
                        let id = id.clone();
                        move |_| store.current_menu_id().set(Some(id.clone()))
                    };
                    let on_delete = Callback::new(move |_| {
                        let id = id.clone();
                        spawn_local(async move {
                            match commands::delete_menu(&id).await {
                                Ok(()) => {
                                    store.menus().write().retain(|menu| menu.id != id);
                                    if store.current_menu_id().get_untracked().as_deref() == Some(id.as_str()) {
                                        let next = store.menus().with_untracked(|menus| menus.first().map(|m| m.id.clone()));
                                        store.current_menu_id().set(next);
                                    }
                                }
                                Err(e) => {
                                    store_push_toast(&store, ToastLevel::Error, format!("Could not delete menu: {}", e));
                                }
                            }
                        });
                    });

                    view! {
                        <span class=move || if is_active() { "menu-tab active" } else { "menu-tab" }>
                            <button class="menu-tab-btn" on:click=on_select title=menu.slug.clone()>
                                {menu.name.clone()}
                            </button>
                            <DeleteConfirmButton button_class="menu-delete-btn" on_confirm=on_delete />
                        </span>
                    }
                }
            />

            {move || if adding.get() {
                view! {
                    <form class="menu-add-form" on:submit=on_add>
                        <input
                            type="text"
                            placeholder="Menu name"
                            prop:value=move || new_name.get()
                            on:input=move |ev| set_new_name.set(event_target_value(&ev))
                        />
                        <button type="submit">"+"</button>
                        <button type="button" on:click=move |_| set_adding.set(false)>"×"</button>
                    </form>
                }.into_any()
            } else {
                view! {
                    <button class="menu-add-btn" on:click=move |_| set_adding.set(true)>"+"</button>
                }.into_any()
            }}
        </div>
    }
}

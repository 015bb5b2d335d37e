//! Toast Component
//!
//! Notifications pushed by failed commands; each dismisses itself.

use leptos::prelude::*;

use crate::store::{store_dismiss_toast, use_app_store, AppStateStoreFields, ToastLevel};

const TOAST_MS: u32 = 5000;

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-host">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    gloo_timers::callback::Timeout::new(TOAST_MS, move || store_dismiss_toast(&store, id)).forget();
                    let class = match toast.level {
                        ToastLevel::Info => "toast info",
                        ToastLevel::Error => "toast error",
                    };
                    view! {
                        <div class=class on:click=move |_| store_dismiss_toast(&store, id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}

//! Type Selector Component
//!
//! Item kind selector buttons.

use leptos::prelude::*;

use crate::models::ITEM_KINDS;

/// Kind buttons; groups are hidden when adding inside a group
#[component]
pub fn TypeSelector(
    current: ReadSignal<String>,
    on_change: impl Fn(String) + Copy + Send + Sync + 'static,
    #[prop(into)] allow_group: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="type-selector-row">
            {ITEM_KINDS.iter().map(|(value, label)| {
                let val = value.to_string();
                let val_clone = val.clone();
                let is_group = *value == "group";
                let is_selected = move || current.get() == val;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "type-btn small active" } else { "type-btn small" }
                        style:display=move || if is_group && !allow_group.get() { "none" } else { "" }
                        on:click=move |_| on_change(val_clone.clone())
                    >
                        {*label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

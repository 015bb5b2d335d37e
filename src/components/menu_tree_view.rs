//! Menu Tree View Component
//!
//! Displays menu items with drag-and-drop and keyboard nudging.
//! Uses leptos-dragdrop with explicit drop zones between rows.

use leptos::prelude::*;

use crate::components::MenuTreeItem;
use crate::context::use_app_context;
use crate::store::{store_select, use_app_store, AppStateStoreFields};
use crate::sync::{commit_gesture, gesture_for_drop, gesture_for_nudge};
use crate::tree::{flatten_tree, zones_after, ZoneSpec};

use leptos_dragdrop::*;

#[component]
pub fn MenuTreeView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let dnd = create_dnd_signals();
    bind_global_mouseup(dnd, move |dragged_id, target| {
        web_sys::console::log_1(&format!("[DND] drop {} on {:?}", dragged_id, target).into());
        commit_gesture(store, ctx, gesture_for_drop(dragged_id, target));
    });
    let on_nudge = move |id: String, nudge: Nudge| commit_gesture(store, ctx, gesture_for_nudge(id, nudge));

    let rows = move || {
        let rows = store.tree().with(|tree| flatten_tree(tree.items()));
        (0..rows.len())
            .map(|at| (rows[at].clone(), zones_after(&rows, at)))
            .collect::<Vec<_>>()
    };
    let selected = move || store.tree().with(|tree| tree.selected.clone());

    view! {
        <div class="tree-view">
            <DropZone dnd=dnd zone=ZoneSpec { parent_id: None, slot: 0, depth: 0 } />

            <For
                each=rows
                key=|(row, zones)| {
                    (
                        row.item.id.clone(),
                        row.depth,
                        row.index,
                        row.item.title.clone(),
                        row.item.kind.href(),
                        row.item.state.as_str(),
                        zones.clone(),
                    )
                }
                children=move |(row, zones)| {
                    let id = row.item.id.clone();

                    let on_mousedown = make_on_mousedown(dnd, id.clone());
                    let on_mouseenter = make_on_item_mouseenter(dnd, id.clone());
                    let on_mouseleave = make_on_mouseleave(dnd);
                    let on_keydown = make_on_keydown(id.clone(), on_nudge);

                    let item_class = {
                        let id = id.clone();
                        move || {
                            let mut c = String::from("tree-item-wrapper");
                            if selected().as_deref() == Some(id.as_str()) { c.push_str(" selected"); }
                            if dnd.is_dragging(&id) { c.push_str(" dragging"); }
                            if dnd.is_target(&DropTarget::Item(id.clone())) { c.push_str(" drop-target"); }
                            c
                        }
                    };
                    let on_click = {
                        let id = id.clone();
                        move |_| {
                            if !dnd.drag_just_ended_read.get_untracked() {
                                store_select(&store, Some(id.clone()));
                            }
                        }
                    };

                    view! {
                        <div
                            class=item_class
                            tabindex="0"
                            on:mousedown=on_mousedown
                            on:mouseenter=on_mouseenter
                            on:mouseleave=on_mouseleave
                            on:keydown=on_keydown
                            on:click=on_click
                        >
                            <MenuTreeItem item=row.item depth=row.depth />
                        </div>

                        {zones.into_iter().map(|zone| view! { <DropZone dnd=dnd zone=zone /> }).collect_view()}
                    }
                }
            />
        </div>
    }
}

/// Horizontal separator accepting drops, visible while dragging
#[component]
pub fn DropZone(dnd: DndSignals, zone: ZoneSpec) -> impl IntoView {
    let target = DropTarget::Zone(zone.parent_id.clone(), zone.slot);
    let on_mouseenter = make_on_zone_mouseenter(dnd, zone.parent_id, zone.slot);
    let on_mouseleave = make_on_mouseleave(dnd);

    let zone_class = move || {
        let mut c = String::from("drop-zone");
        if dnd.dragging_id_read.with(Option::is_none) { c.push_str(" hidden"); }
        if dnd.is_target(&target) { c.push_str(" active"); }
        c
    };

    view! {
        <div
            class=zone_class
            style=format!("margin-left: {}px;", zone.depth * 24)
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        />
    }
}

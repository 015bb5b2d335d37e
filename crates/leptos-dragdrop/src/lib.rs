//! Leptos DragDrop Utilities
//!
//! Mouse drag-and-drop for sortable trees, plus keyboard nudging.
//! A movement threshold distinguishes a click from a drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Where the pointer is when the button is released
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Onto an item row
    Item(String),
    /// Into the gap of a list (parent_id, slot). Slot counts rows before the drag.
    Zone(Option<String>, usize),
}

/// Keyboard reorder direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nudge {
    Up,
    Down,
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<String>>,
    pub dragging_id_write: WriteSignal<Option<String>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Mousedown seen, threshold not crossed yet
    pub pending_id_read: ReadSignal<Option<String>>,
    pub pending_id_write: WriteSignal<Option<String>>,
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// True once the pointer has left the threshold box around `start`
pub fn exceeds_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    (now.0 - start.0).abs() > DRAG_THRESHOLD_PX || (now.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

/// Alt+ArrowUp / Alt+ArrowDown
pub fn nudge_for_key(key: &str, alt: bool) -> Option<Nudge> {
    match (key, alt) {
        ("ArrowUp", true) => Some(Nudge::Up),
        ("ArrowDown", true) => Some(Nudge::Down),
        _ => None,
    }
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<String>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<String>);
    let (start_read, start_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
    }
}

impl DndSignals {
    pub fn is_dragging(&self, id: &str) -> bool {
        self.dragging_id_read.with(|dragging| dragging.as_deref() == Some(id))
    }

    pub fn is_target(&self, target: &DropTarget) -> bool {
        self.drop_target_read.with(|current| current.as_ref() == Some(target))
    }
}

/// End drag operation. `drag_just_ended` stays set briefly so the
/// trailing click of a drag doesn't select the row.
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

fn is_form_control(ev: &web_sys::MouseEvent) -> bool {
    ev.target().map_or(false, |target| {
        target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
            || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
            || target.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
    })
}

/// Mousedown on a draggable row: record a pending drag
pub fn make_on_mousedown(dnd: DndSignals, item_id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || is_form_control(&ev) {
            return;
        }
        dnd.pending_id_write.set(Some(item_id.clone()));
        dnd.start_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Document mousemove: promote the pending drag once past the threshold
fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_id_read.get_untracked();
        if pending.is_some()
            && dnd.dragging_id_read.with_untracked(Option::is_none)
            && exceeds_threshold(dnd.start_read.get_untracked(), (ev.client_x(), ev.client_y()))
        {
            dnd.dragging_id_write.set(pending);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Mouseenter on a row
pub fn make_on_item_mouseenter(dnd: DndSignals, item_id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        let over_other = dnd
            .dragging_id_read
            .with_untracked(|dragging| dragging.as_deref().map_or(false, |id| id != item_id));
        if over_other {
            dnd.drop_target_write.set(Some(DropTarget::Item(item_id.clone())));
        }
    }
}

/// Mouseenter on a gap between rows
pub fn make_on_zone_mouseenter(
    dnd: DndSignals,
    parent_id: Option<String>,
    slot: usize,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.with_untracked(Option::is_some) {
            dnd.drop_target_write.set(Some(DropTarget::Zone(parent_id.clone(), slot)));
        }
    }
}

pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.with_untracked(Option::is_some) {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Keydown on a focused row: Alt+Arrow nudges it
pub fn make_on_keydown<F>(item_id: String, on_nudge: F) -> impl Fn(web_sys::KeyboardEvent) + Clone + 'static
where
    F: Fn(String, Nudge) + Clone + 'static,
{
    move |ev: web_sys::KeyboardEvent| {
        if let Some(nudge) = nudge_for_key(&ev.key(), ev.alt_key()) {
            ev.prevent_default();
            on_nudge(item_id.clone(), nudge);
        }
    }
}

/// Bind document mouseup (drop) and Escape (cancel)
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(String, DropTarget) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging_id = dnd.dragging_id_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();
        let Some(dragged) = dragging_id else {
            // Plain click: falls through to the row's click handler
            dnd.pending_id_write.set(None);
            return;
        };
        end_drag(&dnd);
        if let Some(target) = drop_target {
            on_drop(dragged, target);
        }
    });

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && dnd.dragging_id_read.with_untracked(Option::is_some) {
            end_drag(&dnd);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    }
    on_mouseup.forget();
    on_keydown.forget();

    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        assert!(!exceeds_threshold((10, 10), (15, 5)));
        assert!(exceeds_threshold((10, 10), (16, 10)));
        assert!(exceeds_threshold((10, 10), (10, 3)));
    }

    #[test]
    fn test_nudge_keys() {
        assert_eq!(nudge_for_key("ArrowUp", true), Some(Nudge::Up));
        assert_eq!(nudge_for_key("ArrowDown", true), Some(Nudge::Down));
        assert_eq!(nudge_for_key("ArrowDown", false), None);
        assert_eq!(nudge_for_key("Enter", true), None);
    }
}

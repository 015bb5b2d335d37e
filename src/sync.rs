//! Gesture Commit
//!
//! plan -> optimistic apply -> reorder call -> toast / rollback.

use async_trait::async_trait;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{DropTarget, Nudge};
use menu_tree::reorder::plan;
use menu_tree::{Direction, Gesture, ReorderApi, ReorderRequest, Scope, SyncError, SyncOutcome};

use crate::commands::{self, CallError};
use crate::context::AppContext;
use crate::store::{store_push_toast, AppStore, AppStateStoreFields, ToastLevel};

/// Reorder endpoint behind the command bridge
#[derive(Debug, Clone, Copy, Default)]
pub struct InvokeReorderApi;

#[async_trait(?Send)]
impl ReorderApi for InvokeReorderApi {
    async fn reorder(&self, request: &ReorderRequest) -> Result<(), SyncError> {
        match commands::reorder_menu_items(request).await {
            Ok(_) => Ok(()),
            Err(CallError::Command(msg)) => Err(SyncError::Rejected(msg)),
            Err(CallError::Transport(msg)) => Err(SyncError::Network(msg)),
            Err(CallError::Decode(msg)) => Err(SyncError::Decode(msg)),
        }
    }
}

/// Gesture for a finished pointer drag
pub fn gesture_for_drop(source: String, target: DropTarget) -> Gesture {
    match target {
        DropTarget::Item(target_id) => Gesture::Drop {
            source,
            target: Some(target_id),
        },
        DropTarget::Zone(parent_id, index) => Gesture::DropInto {
            source,
            scope: Scope::from_parent(parent_id.as_deref()),
            index,
        },
    }
}

pub fn gesture_for_nudge(source: String, nudge: Nudge) -> Gesture {
    let direction = match nudge {
        Nudge::Up => Direction::Up,
        Nudge::Down => Direction::Down,
    };
    Gesture::Nudge { source, direction }
}

/// Run one gesture end to end. No-op gestures never reach the backend.
pub fn commit_gesture(store: AppStore, ctx: AppContext, gesture: Gesture) {
    let Some(menu_id) = store.current_menu_id().get_untracked() else {
        return;
    };

    let planned = store.tree().with_untracked(|tree| plan(tree.items(), &gesture));
    let planned = match planned {
        Ok(Some(planned)) => planned,
        Ok(None) => return,
        Err(e) => {
            store_push_toast(&store, ToastLevel::Error, e.to_string());
            return;
        }
    };

    let snapshot = store.tree().write().apply(&planned);
    let request = ReorderRequest::from_plan(menu_id, &planned);
    web_sys::console::log_1(
        &format!("[DND] reorder parent={:?} ids={:?}", request.parent_id, request.ordered_ids).into(),
    );

    let client = ctx.sync_client();
    spawn_local(async move {
        if let SyncOutcome::Failed { error, rollback } = client.push(request, snapshot).await {
            web_sys::console::warn_1(&format!("[DND] reorder failed: {}", error).into());
            if let Some(snapshot) = rollback {
                store.tree().write().rollback(snapshot);
            }
            store_push_toast(&store, ToastLevel::Error, error.user_message());
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_targets_map_to_gestures() {
        assert_eq!(
            gesture_for_drop("a".into(), DropTarget::Item("b".into())),
            Gesture::Drop { source: "a".into(), target: Some("b".into()) }
        );
        assert_eq!(
            gesture_for_drop("a".into(), DropTarget::Zone(Some("g".into()), 2)),
            Gesture::DropInto { source: "a".into(), scope: Scope::Group("g".into()), index: 2 }
        );
        assert_eq!(
            gesture_for_drop("a".into(), DropTarget::Zone(None, 0)),
            Gesture::DropInto { source: "a".into(), scope: Scope::Root, index: 0 }
        );
        assert_eq!(
            gesture_for_nudge("a".into(), Nudge::Up),
            Gesture::Nudge { source: "a".into(), direction: Direction::Up }
        );
    }
}

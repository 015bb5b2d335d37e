//! Sync Client
//!
//! Sends the final sibling sequence of a gesture to the backend.
//! One call per gesture: no batching, no debounce, no retry.
//! Failures come back as a [`SyncOutcome`] for the UI to report.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::reorder::Plan;
use crate::store::Snapshot;

/// Body of the reorder call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub menu_id: String,
    /// Group whose children are reordered (None = menu root)
    pub parent_id: Option<String>,
    pub ordered_ids: Vec<String>,
}

impl ReorderRequest {
    /// Request for a plan. A parent change sends the destination scope with
    /// its parent ID; the backend re-densifies the scope the item left.
    pub fn from_plan(menu_id: impl Into<String>, plan: &Plan) -> Self {
        Self {
            menu_id: menu_id.into(),
            parent_id: plan.target_scope().parent_id().map(str::to_string),
            ordered_ids: plan.target_ids().to_vec(),
        }
    }
}

/// Remote reorder endpoint
#[async_trait(?Send)]
pub trait ReorderApi {
    async fn reorder(&self, request: &ReorderRequest) -> Result<(), SyncError>;
}

/// What to do with optimistic state when the backend refuses a reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep the local order and report the error
    #[default]
    KeepOptimistic,
    /// Restore the pre-gesture order and report the error
    Rollback,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub on_failure: FailurePolicy,
    /// Queue calls per (menu, scope) so responses can't land out of order
    pub serialize_per_scope: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced,
    Failed {
        error: SyncError,
        /// Set only under [`FailurePolicy::Rollback`]
        rollback: Option<Snapshot>,
    },
}

type LaneKey = (String, Option<String>);

pub struct SyncClient<A> {
    api: A,
    config: SyncConfig,
    lanes: Mutex<HashMap<LaneKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl<A: ReorderApi> SyncClient<A> {
    pub fn new(api: A, config: SyncConfig) -> Self {
        Self {
            api,
            config,
            lanes: Mutex::new(HashMap::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn lane(&self, request: &ReorderRequest) -> Arc<tokio::sync::Mutex<()>> {
        let mut lanes = self.lanes.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        lanes
            .entry((request.menu_id.clone(), request.parent_id.clone()))
            .or_default()
            .clone()
    }

    /// Drop the lane entry once no other call holds or waits on it.
    /// Lanes are only cloned under the map lock, so the count is stable here.
    fn release_lane(&self, request: &ReorderRequest, lane: Arc<tokio::sync::Mutex<()>>) {
        let mut lanes = self.lanes.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        drop(lane);
        let key = (request.menu_id.clone(), request.parent_id.clone());
        if lanes.get(&key).map_or(false, |lane| Arc::strong_count(lane) == 1) {
            lanes.remove(&key);
        }
    }

    /// Send one reorder. `snapshot` is what the optimistic apply overwrote.
    pub async fn push(&self, request: ReorderRequest, snapshot: Snapshot) -> SyncOutcome {
        if !self.config.serialize_per_scope {
            return self.send(&request, snapshot).await;
        }
        let lane = self.lane(&request);
        let outcome = {
            let _turn = lane.lock().await;
            self.send(&request, snapshot).await
        };
        self.release_lane(&request, lane);
        outcome
    }

    async fn send(&self, request: &ReorderRequest, snapshot: Snapshot) -> SyncOutcome {
        match self.api.reorder(request).await {
            Ok(()) => {
                log::debug!(
                    "reorder synced: menu={} parent={:?} items={}",
                    request.menu_id,
                    request.parent_id,
                    request.ordered_ids.len()
                );
                SyncOutcome::Synced
            }
            Err(error) => {
                log::warn!(
                    "reorder failed: menu={} parent={:?}: {}",
                    request.menu_id,
                    request.parent_id,
                    error
                );
                let rollback = match self.config.on_failure {
                    FailurePolicy::Rollback => Some(snapshot),
                    FailurePolicy::KeepOptimistic => None,
                };
                SyncOutcome::Failed { error, rollback }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{MenuItem, MenuItemKind};
    use crate::partition::Scope;
    use crate::reorder::{plan, Gesture};
    use crate::store::OptimisticStore;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct MockApi {
        calls: RefCell<Vec<ReorderRequest>>,
        events: RefCell<Vec<String>>,
        fail: Cell<bool>,
        yields: usize,
    }

    #[async_trait(?Send)]
    impl ReorderApi for MockApi {
        async fn reorder(&self, request: &ReorderRequest) -> Result<(), SyncError> {
            let tag = request.ordered_ids.join(",");
            self.events.borrow_mut().push(format!("start {}", tag));
            for _ in 0..self.yields {
                tokio::task::yield_now().await;
            }
            self.events.borrow_mut().push(format!("end {}", tag));
            self.calls.borrow_mut().push(request.clone());
            if self.fail.get() {
                Err(SyncError::Rejected("order locked".into()))
            } else {
                Ok(())
            }
        }
    }

    fn link(id: &str, parent_id: Option<&str>, order: i32) -> MenuItem {
        let mut item = MenuItem::new(id, "main", id, MenuItemKind::InternalPath { path: format!("/{}", id) });
        item.parent_id = parent_id.map(str::to_string);
        item.order = order;
        item
    }

    fn store() -> OptimisticStore {
        let mut group = MenuItem::new("G", "main", "G", MenuItemKind::Group);
        group.order = 3;
        OptimisticStore::new(vec![link("A", None, 0), link("B", None, 1), link("C", None, 2), group])
    }

    fn request(ids: &[&str]) -> ReorderRequest {
        ReorderRequest {
            menu_id: "main".into(),
            parent_id: None,
            ordered_ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_request_from_plans() {
        let store = store();
        let reorder = plan(store.items(), &Gesture::Drop { source: "A".into(), target: Some("C".into()) })
            .unwrap()
            .unwrap();
        let req = ReorderRequest::from_plan("main", &reorder);
        assert_eq!(req.parent_id, None);
        assert_eq!(req.ordered_ids, vec!["B", "C", "A", "G"]);

        let mv = plan(
            store.items(),
            &Gesture::DropInto { source: "B".into(), scope: Scope::Group("G".into()), index: 0 },
        )
        .unwrap()
        .unwrap();
        let req = ReorderRequest::from_plan("main", &mv);
        assert_eq!(req.parent_id.as_deref(), Some("G"));
        assert_eq!(req.ordered_ids, vec!["B"]);

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["menuId"], "main");
        assert_eq!(json["parentId"], "G");
        assert_eq!(json["orderedIds"][0], "B");
    }

    #[tokio::test]
    async fn test_success_makes_one_call() {
        let client = SyncClient::new(MockApi::default(), SyncConfig::default());
        let outcome = client.push(request(&["B", "A"]), Snapshot::default()).await;
        assert_eq!(outcome, SyncOutcome::Synced);
        assert_eq!(client.api().calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_optimistic_state_by_default() {
        let mut local = store();
        let p = plan(local.items(), &Gesture::Drop { source: "A".into(), target: Some("C".into()) })
            .unwrap()
            .unwrap();
        let snapshot = local.apply(&p);

        let api = MockApi::default();
        api.fail.set(true);
        let client = SyncClient::new(api, SyncConfig::default());
        let outcome = client.push(ReorderRequest::from_plan("main", &p), snapshot).await;

        match outcome {
            SyncOutcome::Failed { error, rollback } => {
                assert_eq!(error, SyncError::Rejected("order locked".into()));
                assert!(rollback.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(local.get("A").unwrap().order, 2);
        assert_eq!(client.api().calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_with_rollback_policy() {
        let mut local = store();
        let before = local.clone();
        let p = plan(local.items(), &Gesture::Drop { source: "A".into(), target: Some("C".into()) })
            .unwrap()
            .unwrap();
        let snapshot = local.apply(&p);

        let api = MockApi::default();
        api.fail.set(true);
        let config = SyncConfig {
            on_failure: FailurePolicy::Rollback,
            serialize_per_scope: false,
        };
        let client = SyncClient::new(api, config);

        if let SyncOutcome::Failed { rollback: Some(snapshot), .. } =
            client.push(ReorderRequest::from_plan("main", &p), snapshot).await
        {
            local.rollback(snapshot);
        } else {
            panic!("expected a rollback snapshot");
        }
        assert_eq!(local, before);
    }

    #[tokio::test]
    async fn test_overlapping_calls_interleave_without_lanes() {
        let api = MockApi {
            yields: 2,
            ..Default::default()
        };
        let client = SyncClient::new(api, SyncConfig::default());
        tokio::join!(
            client.push(request(&["a"]), Snapshot::default()),
            client.push(request(&["b"]), Snapshot::default()),
        );
        let events = client.api().events.borrow().clone();
        let mut first_two = events[..2].to_vec();
        first_two.sort();
        assert_eq!(first_two, vec!["start a", "start b"]);
    }

    #[tokio::test]
    async fn test_per_scope_lane_serializes_calls() {
        let api = MockApi {
            yields: 2,
            ..Default::default()
        };
        let config = SyncConfig {
            on_failure: FailurePolicy::KeepOptimistic,
            serialize_per_scope: true,
        };
        let client = SyncClient::new(api, config);
        tokio::join!(
            client.push(request(&["a"]), Snapshot::default()),
            client.push(request(&["b"]), Snapshot::default()),
        );
        let events = client.api().events.borrow().clone();
        assert_eq!(events, vec!["start a", "end a", "start b", "end b"]);
    }

    #[tokio::test]
    async fn test_idle_lanes_are_dropped() {
        let api = MockApi {
            yields: 1,
            ..Default::default()
        };
        let config = SyncConfig {
            on_failure: FailurePolicy::KeepOptimistic,
            serialize_per_scope: true,
        };
        let client = SyncClient::new(api, config);
        let mut nested = request(&["x"]);
        nested.parent_id = Some("G".into());

        tokio::join!(
            client.push(request(&["a"]), Snapshot::default()),
            client.push(request(&["b"]), Snapshot::default()),
            client.push(nested.clone(), Snapshot::default()),
        );
        assert!(client.lanes.lock().unwrap().is_empty());

        client.api().fail.set(true);
        client.push(nested, Snapshot::default()).await;
        assert!(client.lanes.lock().unwrap().is_empty());
        assert_eq!(client.api().calls.borrow().len(), 4);
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: SyncConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SyncConfig::default());
        let config: SyncConfig = serde_json::from_str(r#"{"on_failure":"rollback"}"#).unwrap();
        assert_eq!(config.on_failure, FailurePolicy::Rollback);
        assert!(!config.serialize_per_scope);
    }
}

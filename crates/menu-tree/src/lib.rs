//! Menu Tree
//!
//! Core of menu item ordering, shared by the admin UI and the backend:
//! - item: menu item model
//! - partition: sibling sets per parent scope
//! - order: order index (position -> `order`)
//! - reorder: gesture -> reorder / parent-change plan
//! - store: optimistic client state with rollback snapshots
//! - sync: reorder endpoint client
//! - navigation: public traversal (publish state of ancestors)

pub mod error;
pub mod item;
pub mod navigation;
pub mod order;
pub mod partition;
pub mod reorder;
pub mod store;
pub mod sync;

pub use error::{SyncError, TreeError};
pub use item::{Menu, MenuItem, MenuItemKind, PublishState};
pub use partition::Scope;
pub use reorder::{Direction, Gesture, MovePlan, Plan, ReorderPlan};
pub use store::{OptimisticStore, Snapshot};
pub use sync::{FailurePolicy, ReorderApi, ReorderRequest, SyncClient, SyncConfig, SyncOutcome};

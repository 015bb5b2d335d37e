//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;
use menu_tree::{SyncClient, SyncConfig};

use crate::sync::InvokeReorderApi;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload items from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload items from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Group to add a child under (None = root) - read
    pub adding_under: ReadSignal<Option<String>>,
    /// Group to add a child under (None = root) - write
    set_adding_under: WriteSignal<Option<String>>,
    sync: StoredValue<Arc<SyncClient<InvokeReorderApi>>>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        adding_under: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
        sync_config: SyncConfig,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            adding_under: adding_under.0,
            set_adding_under: adding_under.1,
            sync: StoredValue::new(Arc::new(SyncClient::new(InvokeReorderApi, sync_config))),
        }
    }

    /// Trigger a reload of items
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Set parent group for new child item
    pub fn set_adding_under(&self, parent_id: Option<String>) {
        self.set_adding_under.set(parent_id);
    }

    pub fn sync_client(&self) -> Arc<SyncClient<InvokeReorderApi>> {
        self.sync.get_value()
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

//! Optimistic Store
//!
//! Client-held item collection. Plans are applied before the backend
//! confirms them; a [`Snapshot`] of the touched fields allows rollback.

use std::collections::HashSet;

use crate::item::{MenuItem, PublishState};
use crate::order::apply_order;
use crate::partition::{sibling_ids, siblings, Scope};
use crate::reorder::Plan;

/// Prior placement of one item
#[derive(Debug, Clone, PartialEq, Eq)]
struct Placement {
    id: String,
    parent_id: Option<String>,
    order: i32,
}

/// Fields a plan overwrote, for rollback
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<Placement>,
}

/// Item collection plus the UI pointers a reorder must not disturb
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimisticStore {
    items: Vec<MenuItem>,
    /// Selected item (tree highlight)
    pub selected: Option<String>,
    /// Item open in the edit dialog
    pub editing: Option<String>,
}

impl OptimisticStore {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            selected: None,
            editing: None,
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn siblings(&self, scope: &Scope) -> Vec<&MenuItem> {
        siblings(&self.items, scope)
    }

    /// Apply a plan immediately and return what it overwrote
    pub fn apply(&mut self, plan: &Plan) -> Snapshot {
        match plan {
            Plan::Reorder(reorder) => {
                let snapshot = self.snapshot(&reorder.ordered_ids);
                apply_order(&mut self.items, &reorder.ordered_ids);
                snapshot
            }
            Plan::Move(mv) => {
                let touched: Vec<String> = mv.source_ids.iter().chain(mv.target_ids.iter()).cloned().collect();
                let snapshot = self.snapshot(&touched);
                let new_parent = mv.to.parent_id().map(str::to_string);
                if let Some(item) = self.items.iter_mut().find(|item| item.id == mv.item_id) {
                    item.parent_id = new_parent;
                }
                apply_order(&mut self.items, &mv.source_ids);
                apply_order(&mut self.items, &mv.target_ids);
                snapshot
            }
        }
    }

    /// Restore fields recorded by [`apply`](Self::apply)
    pub fn rollback(&mut self, snapshot: Snapshot) {
        for entry in snapshot.entries {
            if let Some(item) = self.items.iter_mut().find(|item| item.id == entry.id) {
                item.parent_id = entry.parent_id;
                item.order = entry.order;
            }
        }
    }

    fn snapshot(&self, ids: &[String]) -> Snapshot {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        Snapshot {
            entries: self
                .items
                .iter()
                .filter(|item| wanted.contains(item.id.as_str()))
                .map(|item| Placement {
                    id: item.id.clone(),
                    parent_id: item.parent_id.clone(),
                    order: item.order,
                })
                .collect(),
        }
    }

    // ========================
    // CRUD reflections
    // ========================

    /// Replace the whole collection (fresh fetch). Pointers to vanished items are cleared.
    pub fn replace_all(&mut self, items: Vec<MenuItem>) {
        self.items = items;
        self.forget_missing_pointers();
    }

    /// Insert or replace an item by ID
    pub fn upsert(&mut self, item: MenuItem) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Insert among its siblings at `index` (clamped), re-deriving orders
    pub fn insert_at(&mut self, item: MenuItem, index: usize) {
        let scope = Scope::of(&item);
        let id = item.id.clone();
        self.items.retain(|existing| existing.id != id);
        let mut ids = sibling_ids(&self.items, &scope);
        ids.insert(index.min(ids.len()), id);
        self.items.push(item);
        apply_order(&mut self.items, &ids);
    }

    /// Remove an item (and the children of a removed group), closing the order gap
    pub fn remove(&mut self, id: &str) -> Option<MenuItem> {
        let position = self.items.iter().position(|item| item.id == id)?;
        let removed = self.items.remove(position);
        self.items.retain(|item| item.parent_id.as_deref() != Some(id));

        let scope = Scope::of(&removed);
        let remaining = sibling_ids(&self.items, &scope);
        apply_order(&mut self.items, &remaining);
        self.forget_missing_pointers();
        Some(removed)
    }

    /// Set publish state; returns false when the item is unknown
    pub fn set_state(&mut self, id: &str, state: PublishState) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.state = state;
                true
            }
            None => false,
        }
    }

    fn forget_missing_pointers(&mut self) {
        let exists = |id: &Option<String>, items: &[MenuItem]| {
            id.as_ref().map_or(true, |id| items.iter().any(|item| &item.id == id))
        };
        if !exists(&self.selected, &self.items) {
            self.selected = None;
        }
        if !exists(&self.editing, &self.items) {
            self.editing = None;
        }
    }
}

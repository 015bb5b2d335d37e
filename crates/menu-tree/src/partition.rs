//! Sibling Partition
//!
//! Derives ordered sibling sets from the flat item collection.

use serde::{Deserialize, Serialize};

use crate::item::MenuItem;

/// A parent scope: the menu root or one group
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum Scope {
    Root,
    Group(String),
}

impl Scope {
    /// Scope an item currently lives in
    pub fn of(item: &MenuItem) -> Self {
        Self::from_parent(item.parent_id.as_deref())
    }

    pub fn from_parent(parent_id: Option<&str>) -> Self {
        match parent_id {
            Some(id) => Scope::Group(id.to_string()),
            None => Scope::Root,
        }
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Scope::Root => None,
            Scope::Group(id) => Some(id),
        }
    }

    pub fn contains(&self, item: &MenuItem) -> bool {
        item.parent_id.as_deref() == self.parent_id()
    }
}

/// Direct children of `scope`, ascending by order.
///
/// Equal orders keep their collection order (stable sort).
pub fn siblings<'a>(items: &'a [MenuItem], scope: &Scope) -> Vec<&'a MenuItem> {
    let mut children: Vec<&MenuItem> = items.iter().filter(|item| scope.contains(item)).collect();
    children.sort_by_key(|item| item.order);
    children
}

/// IDs of the direct children of `scope`, ascending by order
pub fn sibling_ids(items: &[MenuItem], scope: &Scope) -> Vec<String> {
    siblings(items, scope).into_iter().map(|item| item.id.clone()).collect()
}

/// Every distinct scope present in the collection, root first
pub fn scopes(items: &[MenuItem]) -> Vec<Scope> {
    let mut found: Vec<Scope> = items.iter().map(Scope::of).collect();
    found.sort();
    found.dedup();
    found
}

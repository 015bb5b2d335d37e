//! Order Index
//!
//! Rewrites `order` from array position. Orders are never taken from
//! caller-supplied integers, so every sibling set stays `0..n`.

use std::collections::{HashMap, HashSet};

use crate::item::MenuItem;

/// Rewrite `order` of every item named in `ordered_ids` to its position.
///
/// IDs missing from `items` are skipped and do not consume a position.
/// Returns the number of items rewritten.
pub fn apply_order(items: &mut [MenuItem], ordered_ids: &[String]) -> usize {
    let index: HashMap<&str, usize> = items
        .iter()
        .enumerate()
        .map(|(idx, item)| (item.id.as_str(), idx))
        .collect();

    let mut seen = HashSet::new();
    let targets: Vec<usize> = ordered_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter_map(|id| {
            let found = index.get(id.as_str()).copied();
            if found.is_none() {
                log::debug!("order index: skipping unknown item {}", id);
            }
            found
        })
        .collect();

    for (position, idx) in targets.iter().enumerate() {
        items[*idx].order = position as i32;
    }
    targets.len()
}

/// Pure variant of [`apply_order`]
pub fn with_order(items: &[MenuItem], ordered_ids: &[String]) -> Vec<MenuItem> {
    let mut next = items.to_vec();
    apply_order(&mut next, ordered_ids);
    next
}

/// Full sibling sequence for a (possibly partial) reorder request.
///
/// Requested IDs that are current siblings come first, in requested order;
/// siblings the request left out follow in their current order.
pub fn dense_sequence(current: &[String], requested: &[String]) -> Vec<String> {
    let known: HashSet<&str> = current.iter().map(String::as_str).collect();
    let mut placed = HashSet::new();

    let mut sequence: Vec<String> = requested
        .iter()
        .filter(|id| known.contains(id.as_str()) && placed.insert(id.as_str()))
        .cloned()
        .collect();
    sequence.extend(current.iter().filter(|id| !placed.contains(id.as_str())).cloned());
    sequence
}

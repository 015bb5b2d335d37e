//! Reorder Engine
//!
//! Turns a logical gesture (drag completion or keyboard nudge) into a plan:
//! either a new sibling sequence for one scope, or a parent change.
//! Sibling lists are derived fresh from the collection on every call.

use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::item::MenuItem;
use crate::partition::{sibling_ids, Scope};

/// Keyboard nudge direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// A completed user gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// Drag released over another item (`None` = outside any target)
    Drop { source: String, target: Option<String> },
    /// Drag released on a slot of a scope (zone between rows, or a group body).
    /// `index` is the insertion slot in the scope's current list, `0..=len`.
    DropInto { source: String, scope: Scope, index: usize },
    /// Swap with the previous/next sibling
    Nudge { source: String, direction: Direction },
}

/// New order for one scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan {
    pub scope: Scope,
    pub ordered_ids: Vec<String>,
}

/// Parent change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub item_id: String,
    pub from: Scope,
    pub to: Scope,
    /// Remaining siblings of the old scope
    pub source_ids: Vec<String>,
    /// Siblings of the new scope, moved item included
    pub target_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Reorder(ReorderPlan),
    Move(MovePlan),
}

impl Plan {
    /// Scope whose sequence the backend must receive
    pub fn target_scope(&self) -> &Scope {
        match self {
            Plan::Reorder(plan) => &plan.scope,
            Plan::Move(plan) => &plan.to,
        }
    }

    pub fn target_ids(&self) -> &[String] {
        match self {
            Plan::Reorder(plan) => &plan.ordered_ids,
            Plan::Move(plan) => &plan.target_ids,
        }
    }
}

/// Compute the plan for a gesture. `Ok(None)` means no-op.
pub fn plan(items: &[MenuItem], gesture: &Gesture) -> Result<Option<Plan>, TreeError> {
    match gesture {
        Gesture::Drop { target: None, .. } => Ok(None),
        Gesture::Drop { source, target: Some(target) } => plan_drop(items, source, target),
        Gesture::DropInto { source, scope, index } => plan_drop_into(items, source, scope, *index),
        Gesture::Nudge { source, direction } => plan_nudge(items, source, *direction),
    }
}

fn find<'a>(items: &'a [MenuItem], id: &str) -> Result<&'a MenuItem, TreeError> {
    items
        .iter()
        .find(|item| item.id == id)
        .ok_or_else(|| TreeError::UnknownItem(id.to_string()))
}

fn position(ids: &[String], id: &str) -> Option<usize> {
    ids.iter().position(|candidate| candidate == id)
}

/// Remove `from` and reinsert at `to`. `None` if nothing moves.
fn array_move(ids: &[String], from: usize, to: usize) -> Option<Vec<String>> {
    if from == to || from >= ids.len() {
        return None;
    }
    let mut next = ids.to_vec();
    let moved = next.remove(from);
    next.insert(to.min(next.len()), moved);
    Some(next)
}

fn plan_drop(items: &[MenuItem], source: &str, target: &str) -> Result<Option<Plan>, TreeError> {
    if source == target {
        return Ok(None);
    }
    let source_item = find(items, source)?;
    let target_item = find(items, target)?;
    let from_scope = Scope::of(source_item);

    // Onto a group row: become its last child
    if target_item.is_group() && !source_item.is_group() {
        let into = Scope::Group(target_item.id.clone());
        if from_scope == into {
            return Ok(None);
        }
        let slot = sibling_ids(items, &into).len();
        return plan_move(items, source_item, into, slot).map(Some);
    }

    let to_scope = Scope::of(target_item);
    if from_scope == to_scope {
        let ids = sibling_ids(items, &from_scope);
        let (Some(from), Some(to)) = (position(&ids, source), position(&ids, target)) else {
            return Ok(None);
        };
        return Ok(array_move(&ids, from, to).map(|ordered_ids| {
            Plan::Reorder(ReorderPlan {
                scope: from_scope,
                ordered_ids,
            })
        }));
    }

    let target_ids = sibling_ids(items, &to_scope);
    let index = position(&target_ids, target).unwrap_or(target_ids.len());
    plan_move(items, source_item, to_scope, index).map(Some)
}

fn plan_drop_into(items: &[MenuItem], source: &str, scope: &Scope, slot: usize) -> Result<Option<Plan>, TreeError> {
    let source_item = find(items, source)?;
    let from_scope = Scope::of(source_item);

    if &from_scope == scope {
        let ids = sibling_ids(items, scope);
        let Some(from) = position(&ids, source) else {
            return Ok(None);
        };
        let slot = slot.min(ids.len());
        let to = if slot > from { slot - 1 } else { slot };
        return Ok(array_move(&ids, from, to).map(|ordered_ids| {
            Plan::Reorder(ReorderPlan {
                scope: scope.clone(),
                ordered_ids,
            })
        }));
    }

    plan_move(items, source_item, scope.clone(), slot).map(Some)
}

fn plan_nudge(items: &[MenuItem], source: &str, direction: Direction) -> Result<Option<Plan>, TreeError> {
    let source_item = find(items, source)?;
    let scope = Scope::of(source_item);
    let ids = sibling_ids(items, &scope);
    let Some(from) = position(&ids, source) else {
        return Ok(None);
    };

    let to = match direction {
        Direction::Up if from == 0 => return Ok(None),
        Direction::Up => from - 1,
        Direction::Down if from + 1 >= ids.len() => return Ok(None),
        Direction::Down => from + 1,
    };

    Ok(array_move(&ids, from, to).map(|ordered_ids| Plan::Reorder(ReorderPlan { scope, ordered_ids })))
}

/// Check that `item` may live under `to`
pub fn check_parent(items: &[MenuItem], item: &MenuItem, to: &Scope) -> Result<(), TreeError> {
    let Scope::Group(group_id) = to else {
        return Ok(());
    };
    if group_id == &item.id {
        return Err(TreeError::SelfTarget(item.id.clone()));
    }
    let group = find(items, group_id)?;
    if !group.is_group() {
        return Err(TreeError::NotAGroup(group_id.clone()));
    }
    if item.is_group() {
        return Err(TreeError::NestedGroup(item.id.clone()));
    }
    Ok(())
}

fn plan_move(items: &[MenuItem], source: &MenuItem, to: Scope, slot: usize) -> Result<Plan, TreeError> {
    check_parent(items, source, &to)?;

    let from = Scope::of(source);
    let source_ids: Vec<String> = sibling_ids(items, &from)
        .into_iter()
        .filter(|id| id != &source.id)
        .collect();
    let mut target_ids = sibling_ids(items, &to);
    target_ids.insert(slot.min(target_ids.len()), source.id.clone());

    Ok(Plan::Move(MovePlan {
        item_id: source.id.clone(),
        from,
        to,
        source_ids,
        target_ids,
    }))
}

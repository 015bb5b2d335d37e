//! Tree Utilities
//!
//! Helper functions for tree rendering.

use menu_tree::partition::siblings;
use menu_tree::OptimisticStore;

use crate::models::{MenuItem, Scope};

/// One rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub item: MenuItem,
    pub depth: usize,
    /// Position among its siblings
    pub index: usize,
}

/// Rows in display order: each root item, then the children of a group
pub fn flatten_tree(items: &[MenuItem]) -> Vec<TreeRow> {
    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in siblings(items, &Scope::Root).into_iter().enumerate() {
        rows.push(TreeRow {
            item: item.clone(),
            depth: 0,
            index,
        });
        if item.is_group() {
            let scope = Scope::Group(item.id.clone());
            for (index, child) in siblings(items, &scope).into_iter().enumerate() {
                rows.push(TreeRow {
                    item: child.clone(),
                    depth: 1,
                    index,
                });
            }
        }
    }
    rows
}

/// Gap between rows where a dragged item can land
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneSpec {
    pub parent_id: Option<String>,
    /// Insertion slot among the siblings of `parent_id`
    pub slot: usize,
    pub depth: usize,
}

impl ZoneSpec {
    fn root(slot: usize) -> Self {
        Self { parent_id: None, slot, depth: 0 }
    }
}

/// Zones rendered right after `rows[at]`. A group row opens a zone into the
/// group; the last row of a group also closes it with a root-level zone.
pub fn zones_after(rows: &[TreeRow], at: usize) -> Vec<ZoneSpec> {
    let Some(row) = rows.get(at) else {
        return Vec::new();
    };
    let next = rows.get(at + 1);
    let mut zones = Vec::new();

    if row.item.is_group() {
        zones.push(ZoneSpec {
            parent_id: Some(row.item.id.clone()),
            slot: 0,
            depth: 1,
        });
        if next.map_or(true, |next| next.depth == 0) {
            zones.push(ZoneSpec::root(row.index + 1));
        }
        return zones;
    }

    zones.push(ZoneSpec {
        parent_id: row.item.parent_id.clone(),
        slot: row.index + 1,
        depth: row.depth,
    });
    if row.depth > 0 && next.map_or(true, |next| next.depth == 0) {
        let group_index = rows[..at]
            .iter()
            .rev()
            .find(|candidate| row.item.parent_id.as_deref() == Some(candidate.item.id.as_str()))
            .map(|group| group.index);
        if let Some(group_index) = group_index {
            zones.push(ZoneSpec::root(group_index + 1));
        }
    }
    zones
}

/// Number of children under a group
pub fn child_count(items: &[MenuItem], group_id: &str) -> usize {
    items.iter().filter(|item| item.parent_id.as_deref() == Some(group_id)).count()
}

/// Item open in the editor and whether its kind is locked (group with children)
pub fn editor_key(tree: &OptimisticStore) -> Option<(String, bool)> {
    let item = tree.get(tree.editing.as_deref()?)?;
    let locked = item.is_group() && child_count(tree.items(), &item.id) > 0;
    Some((item.id.clone(), locked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuItemKind;

    fn make_item(id: &str, parent_id: Option<&str>, order: i32, group: bool) -> MenuItem {
        let kind = if group {
            MenuItemKind::Group
        } else {
            MenuItemKind::InternalPath { path: format!("/{}", id) }
        };
        let mut item = MenuItem::new(id, "main", id, kind);
        item.parent_id = parent_id.map(str::to_string);
        item.order = order;
        item
    }

    #[test]
    fn test_flatten_tree() {
        let items = vec![
            make_item("b", None, 1, true),
            make_item("a", None, 0, false),
            make_item("y", Some("b"), 1, false),
            make_item("x", Some("b"), 0, false),
            make_item("c", None, 2, false),
        ];

        let rows: Vec<(String, usize, usize)> = flatten_tree(&items)
            .into_iter()
            .map(|row| (row.item.id, row.depth, row.index))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("a".to_string(), 0, 0),
                ("b".to_string(), 0, 1),
                ("x".to_string(), 1, 0),
                ("y".to_string(), 1, 1),
                ("c".to_string(), 0, 2),
            ]
        );
        assert_eq!(child_count(&items, "b"), 2);
    }

    #[test]
    fn test_editor_key_ignores_reorders() {
        use menu_tree::reorder::plan;
        use menu_tree::{Direction, Gesture};

        let mut tree = OptimisticStore::new(vec![
            make_item("a", None, 0, false),
            make_item("b", None, 1, false),
            make_item("g", None, 2, true),
        ]);
        tree.editing = Some("b".into());
        let before = editor_key(&tree);
        assert_eq!(before, Some(("b".to_string(), false)));

        let nudge = Gesture::Nudge { source: "b".into(), direction: Direction::Up };
        let p = plan(tree.items(), &nudge).unwrap().unwrap();
        tree.apply(&p);
        assert_eq!(tree.get("b").unwrap().order, 0);
        assert_eq!(editor_key(&tree), before);

        let into = Gesture::Drop { source: "b".into(), target: Some("g".into()) };
        let p = plan(tree.items(), &into).unwrap().unwrap();
        tree.apply(&p);
        assert_eq!(tree.get("b").unwrap().parent_id.as_deref(), Some("g"));
        assert_eq!(editor_key(&tree), before);

        tree.editing = Some("g".into());
        assert_eq!(editor_key(&tree), Some(("g".to_string(), true)));
    }

    fn slots(zones: Vec<ZoneSpec>) -> Vec<(Option<String>, usize)> {
        zones.into_iter().map(|z| (z.parent_id, z.slot)).collect()
    }

    #[test]
    fn test_zones_after_rows() {
        let items = vec![
            make_item("a", None, 0, false),
            make_item("g", None, 1, true),
            make_item("x", Some("g"), 0, false),
            make_item("y", Some("g"), 1, false),
            make_item("e", None, 2, true),
        ];
        let rows = flatten_tree(&items);

        assert_eq!(slots(zones_after(&rows, 0)), vec![(None, 1)]);
        assert_eq!(slots(zones_after(&rows, 1)), vec![(Some("g".to_string()), 0)]);
        assert_eq!(slots(zones_after(&rows, 2)), vec![(Some("g".to_string()), 1)]);
        // Last child closes the group
        assert_eq!(slots(zones_after(&rows, 3)), vec![(Some("g".to_string()), 2), (None, 2)]);
        // Empty group at the end
        assert_eq!(slots(zones_after(&rows, 4)), vec![(Some("e".to_string()), 0), (None, 3)]);
        assert!(zones_after(&rows, 5).is_empty());
    }
}

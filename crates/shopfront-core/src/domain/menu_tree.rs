// ============================================================================
// Shopfront Core - Menu Tree Assembly
// File: crates/shopfront-core/src/domain/menu_tree.rs
// Description: Flat adjacency-list rows -> nested navigation forest
// ============================================================================

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use shopfront_shared::constants::MAX_TREE_DEPTH;
use uuid::Uuid;

use super::menu_item::MenuItem;

/// One node of the assembled navigation forest.
#[derive(Debug, Clone, Serialize)]
pub struct MenuTreeNode {
    #[serde(flatten)]
    pub item: MenuItem,
    pub children: Vec<MenuTreeNode>,
}

/// Assemble the flat rows of one menu into an ordered forest.
///
/// Rows are grouped by `parent_id`; a row whose declared parent is not
/// present in the same menu is treated as a root. Sibling groups are ordered
/// by `(position, id)`. Each group is consumed exactly once, so the result is
/// a strict forest: no row can appear twice. Descent stops at
/// `MAX_TREE_DEPTH`, the same bound the mutator enforces on writes.
pub fn build_tree(items: Vec<MenuItem>) -> Vec<MenuTreeNode> {
    let known_ids: HashSet<Uuid> = items.iter().map(|i| i.id).collect();

    let mut groups: HashMap<Option<Uuid>, Vec<MenuItem>> = HashMap::new();
    for item in items {
        let parent = match item.parent_id {
            Some(p) if known_ids.contains(&p) => Some(p),
            _ => None,
        };
        groups.entry(parent).or_default().push(item);
    }

    take_children(None, &mut groups, 0)
}

fn take_children(
    parent: Option<Uuid>,
    groups: &mut HashMap<Option<Uuid>, Vec<MenuItem>>,
    depth: usize,
) -> Vec<MenuTreeNode> {
    if depth >= MAX_TREE_DEPTH {
        return Vec::new();
    }

    let Some(mut items) = groups.remove(&parent) else {
        return Vec::new();
    };
    items.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));

    items
        .into_iter()
        .map(|item| {
            let children = take_children(Some(item.id), groups, depth + 1);
            MenuTreeNode { item, children }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu_item::{LinkTarget, MenuItemKind, MenuItemSettings};

    fn row(id: u128, parent: Option<u128>, position: i32, title: &str) -> MenuItem {
        MenuItem {
            id: Uuid::from_u128(id),
            menu_id: Uuid::from_u128(999),
            parent_id: parent.map(Uuid::from_u128),
            kind: MenuItemKind::Custom,
            reference_key: None,
            title: title.to_string(),
            url: Some("/".to_string()),
            target: LinkTarget::SelfFrame,
            position,
            is_visible: true,
            settings: MenuItemSettings::default(),
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_input_builds_empty_forest() {
        assert!(build_tree(Vec::new()).is_empty());
    }

    #[test]
    fn test_nesting_and_sibling_order() {
        let items = vec![
            row(3, None, 1, "Kategoriler"),
            row(1, None, 0, "Anasayfa"),
            row(4, Some(3), 1, "Yazılım"),
            row(2, Some(3), 0, "Elektronik"),
        ];
        let tree = build_tree(items);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].item.title, "Anasayfa");
        assert_eq!(tree[1].item.title, "Kategoriler");
        let kids: Vec<&str> = tree[1].children.iter().map(|n| n.item.title.as_str()).collect();
        assert_eq!(kids, vec!["Elektronik", "Yazılım"]);
    }

    #[test]
    fn test_position_ties_break_by_id() {
        let items = vec![row(7, None, 5, "B"), row(2, None, 5, "A")];
        let tree = build_tree(items);
        assert_eq!(tree[0].item.title, "A");
        assert_eq!(tree[1].item.title, "B");
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        let items = vec![row(1, Some(42), 0, "Orphan"), row(2, None, 1, "Root")];
        let tree = build_tree(items);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].item.title, "Orphan");
    }

    #[test]
    fn test_no_node_appears_twice() {
        let items = vec![
            row(1, None, 0, "Root"),
            row(2, Some(1), 0, "Child"),
            row(3, Some(1), 1, "Child2"),
        ];
        let tree = build_tree(items);

        fn count(nodes: &[MenuTreeNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        assert_eq!(count(&tree), 3);
    }
}

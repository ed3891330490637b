// ============================================================================
// Shopfront Core - Category Synchronizer
// File: crates/shopfront-core/src/services/category_sync_service.rs
// ============================================================================
//! Reconciles the live category catalog into the category shortcut menu
//! without discarding administrator customizations.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    Category, LinkTarget, MenuChangeSet, MenuItem, MenuItemKind, MenuItemSettings,
};
use crate::error::DomainError;
use crate::repositories::{CategoryRepository, MenuItemRepository, MenuRepository};

/// Row counts of one synchronizer run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Keeps `category`-kind items of the configured menu mirroring the catalog.
///
/// Invoked by the catalog module after any category create/rename/move/delete
/// (or periodically). Non-category items of the same menu are never touched.
pub struct CategorySyncService<C: CategoryRepository, M: MenuRepository, I: MenuItemRepository> {
    categories: Arc<C>,
    menus: Arc<M>,
    items: Arc<I>,
    location: String,
}

impl<C: CategoryRepository, M: MenuRepository, I: MenuItemRepository>
    CategorySyncService<C, M, I>
{
    pub fn new(categories: Arc<C>, menus: Arc<M>, items: Arc<I>, location: String) -> Self {
        Self {
            categories,
            menus,
            items,
            location,
        }
    }

    /// Run one reconciliation pass, atomically.
    ///
    /// Idempotent: a second run with no intervening category changes plans an
    /// empty change set and performs no writes.
    pub async fn sync(&self) -> Result<SyncReport, DomainError> {
        let menu = self
            .menus
            .find_by_location(&self.location)
            .await?
            .ok_or_else(|| {
                warn!(
                    "Category sync aborted: no menu registered for location: {}",
                    self.location
                );
                DomainError::MenuNotConfigured(self.location.clone())
            })?;

        let categories = self.categories.list_all().await?;
        let items = self.items.list_by_menu(&menu.id).await?;
        let changes = plan_category_sync(menu.id, &categories, &items)?;

        let report = SyncReport {
            created: changes.inserts.len(),
            updated: changes.updates.len(),
            removed: changes.deletes.len(),
        };

        if changes.is_empty() {
            info!("Category menu '{}' already in sync", self.location);
            return Ok(report);
        }

        self.items.apply(&menu.id, &changes).await?;
        info!(
            "Category menu '{}' synced: {} created, {} updated, {} removed",
            self.location, report.created, report.updated, report.removed
        );
        Ok(report)
    }
}

/// Diff the category tree against the menu's `category`-kind items.
///
/// Categories are walked pre-order with siblings ordered by id, so a parent's
/// menu item id is always resolved before its children reference it. Items
/// with `title_locked` keep their title and url; structural repair
/// (re-parenting after a category move) applies to every matched item.
fn plan_category_sync(
    menu_id: Uuid,
    categories: &[Category],
    menu_items: &[MenuItem],
) -> Result<MenuChangeSet, DomainError> {
    let live_ids: HashSet<i64> = categories.iter().map(|c| c.id).collect();

    // Sibling groups of the category tree; a dangling parent counts as root.
    let mut child_groups: HashMap<Option<i64>, Vec<&Category>> = HashMap::new();
    for category in categories {
        let parent = category.parent_id.filter(|p| live_ids.contains(p));
        child_groups.entry(parent).or_default().push(category);
    }
    for group in child_groups.values_mut() {
        group.sort_by_key(|c| c.id);
    }

    // Existing category nodes by reference key; on duplicates the first row
    // in (position, id) order wins and the extras are left alone.
    let mut sorted_items: Vec<&MenuItem> = menu_items.iter().collect();
    sorted_items.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));
    let mut item_by_key: HashMap<String, &MenuItem> = HashMap::new();
    for item in sorted_items {
        if item.kind == MenuItemKind::Category {
            if let Some(key) = &item.reference_key {
                item_by_key.entry(key.clone()).or_insert(item);
            }
        }
    }

    let mut changes = MenuChangeSet::default();
    let mut next_slots: HashMap<Option<Uuid>, i32> = HashMap::new();

    let mut stack: Vec<(&Category, Option<Uuid>)> = Vec::new();
    if let Some(roots) = child_groups.get(&None) {
        for category in roots.iter().rev() {
            stack.push((*category, None));
        }
    }

    while let Some((category, parent_item_id)) = stack.pop() {
        let key = category.id.to_string();

        let item_id = match item_by_key.get(&key) {
            None => {
                let position = next_slot(&mut next_slots, menu_items, parent_item_id);
                let item = MenuItem::new(
                    menu_id,
                    parent_item_id,
                    MenuItemKind::Category,
                    Some(key),
                    category.name.clone(),
                    Some(category.url()),
                    LinkTarget::SelfFrame,
                    position,
                    true,
                    MenuItemSettings {
                        title_locked: Some(false),
                        ..Default::default()
                    },
                )?;
                let id = item.id;
                changes.inserts.push(item);
                id
            }
            Some(existing) => {
                let mut updated = (*existing).clone();
                if !existing.is_title_locked() {
                    updated.title = category.name.clone();
                    updated.url = Some(category.url());
                }
                if updated.parent_id != parent_item_id {
                    updated.parent_id = parent_item_id;
                    updated.position = next_slot(&mut next_slots, menu_items, parent_item_id);
                }
                if !updated.content_eq(existing) {
                    updated.touch();
                    changes.updates.push(updated);
                }
                existing.id
            }
        };

        if let Some(children) = child_groups.get(&Some(category.id)) {
            for child in children.iter().rev() {
                stack.push((*child, Some(item_id)));
            }
        }
    }

    // Category nodes whose backing category is gone (or whose key does not
    // even parse) are removed. Everything non-category stays untouched.
    for item in menu_items {
        if item.kind != MenuItemKind::Category {
            continue;
        }
        let alive = item
            .reference_key
            .as_deref()
            .and_then(|key| key.parse::<i64>().ok())
            .map(|id| live_ids.contains(&id))
            .unwrap_or(false);
        if !alive {
            changes.deletes.push(item.id);
        }
    }

    Ok(changes)
}

/// Next free sibling position under `parent`, counting inserts already
/// planned this round.
fn next_slot(
    slots: &mut HashMap<Option<Uuid>, i32>,
    menu_items: &[MenuItem],
    parent: Option<Uuid>,
) -> i32 {
    let slot = slots.entry(parent).or_insert_with(|| {
        menu_items
            .iter()
            .filter(|i| i.parent_id == parent)
            .map(|i| i.position + 1)
            .max()
            .unwrap_or(0)
    });
    let value = *slot;
    *slot += 1;
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Menu;
    use crate::repositories::category_repository::MockCategoryRepository;
    use crate::repositories::menu_item_repository::MockMenuItemRepository;
    use crate::repositories::menu_repository::MockMenuRepository;

    fn category(id: i64, parent_id: Option<i64>, name: &str) -> Category {
        Category {
            id,
            parent_id,
            name: name.to_string(),
        }
    }

    fn category_item(
        menu_id: Uuid,
        key: &str,
        title: &str,
        parent_id: Option<Uuid>,
        position: i32,
        locked: bool,
    ) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            menu_id,
            parent_id,
            kind: MenuItemKind::Category,
            reference_key: Some(key.to_string()),
            title: title.to_string(),
            url: Some(format!("/kategori/{}", shopfront_shared::utils::slugify(title))),
            target: LinkTarget::SelfFrame,
            position,
            is_visible: true,
            settings: MenuItemSettings {
                title_locked: Some(locked),
                ..Default::default()
            },
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    fn custom_item(menu_id: Uuid, title: &str, position: i32) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            menu_id,
            parent_id: None,
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

    fn apply_in_memory(rows: &mut Vec<MenuItem>, changes: &MenuChangeSet) {
        for insert in &changes.inserts {
            rows.push(insert.clone());
        }
        for update in &changes.updates {
            if let Some(row) = rows.iter_mut().find(|r| r.id == update.id) {
                *row = update.clone();
            }
        }
        rows.retain(|r| !changes.deletes.contains(&r.id));
    }

    #[test]
    fn test_creates_missing_items_parents_first() {
        let menu_id = Uuid::new_v4();
        let categories = vec![
            category(1, None, "Elektronik"),
            category(2, Some(1), "Konsol Ürünleri"),
            category(3, None, "Yazılım"),
        ];

        let changes = plan_category_sync(menu_id, &categories, &[]).unwrap();
        assert_eq!(changes.inserts.len(), 3);
        assert!(changes.updates.is_empty());
        assert!(changes.deletes.is_empty());

        let titles: Vec<&str> = changes.inserts.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Elektronik", "Konsol Ürünleri", "Yazılım"]);

        let parent = changes.inserts[0].id;
        assert_eq!(changes.inserts[1].parent_id, Some(parent));
        assert_eq!(changes.inserts[0].url.as_deref(), Some("/kategori/elektronik"));
        assert_eq!(changes.inserts[1].settings.title_locked, Some(false));
    }

    #[test]
    fn test_sync_is_idempotent() {
        let menu_id = Uuid::new_v4();
        let categories = vec![
            category(1, None, "Elektronik"),
            category(2, Some(1), "Konsol Ürünleri"),
        ];

        let mut rows = Vec::new();
        let first = plan_category_sync(menu_id, &categories, &rows).unwrap();
        apply_in_memory(&mut rows, &first);

        let second = plan_category_sync(menu_id, &categories, &rows).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn test_rename_refreshes_unlocked_title_and_url() {
        let menu_id = Uuid::new_v4();
        let existing = vec![category_item(menu_id, "1", "Elektronik", None, 0, false)];
        let categories = vec![category(1, None, "Elektronik Güncel")];

        let changes = plan_category_sync(menu_id, &categories, &existing).unwrap();
        assert_eq!(changes.updates.len(), 1);
        assert_eq!(changes.updates[0].title, "Elektronik Güncel");
        assert_eq!(
            changes.updates[0].url.as_deref(),
            Some("/kategori/elektronik-guncel")
        );
        assert!(changes.updates[0].updated_at.is_some());
    }

    #[test]
    fn test_locked_title_survives_rename() {
        let menu_id = Uuid::new_v4();
        let existing = vec![category_item(menu_id, "1", "Custom Label", None, 0, true)];
        let categories = vec![category(1, None, "Elektronik Güncel")];

        let changes = plan_category_sync(menu_id, &categories, &existing).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_category_move_reparents_even_when_locked() {
        let menu_id = Uuid::new_v4();
        let root_a = category_item(menu_id, "1", "A", None, 0, false);
        let root_b = category_item(menu_id, "2", "B", None, 1, true);
        let existing = vec![root_a.clone(), root_b.clone()];

        // Category 2 moved under category 1.
        let categories = vec![category(1, None, "A"), category(2, Some(1), "B")];
        let changes = plan_category_sync(menu_id, &categories, &existing).unwrap();

        assert_eq!(changes.updates.len(), 1);
        let moved = &changes.updates[0];
        assert_eq!(moved.id, root_b.id);
        assert_eq!(moved.parent_id, Some(root_a.id));
        assert_eq!(moved.title, "B");
    }

    #[test]
    fn test_stale_category_item_deleted_others_untouched() {
        let menu_id = Uuid::new_v4();
        let stale = category_item(menu_id, "9", "Silinen", None, 0, false);
        let garbled = category_item(menu_id, "not-a-number", "Bozuk", None, 1, false);
        let custom = custom_item(menu_id, "Anasayfa", 2);
        let existing = vec![stale.clone(), garbled.clone(), custom.clone()];

        let changes = plan_category_sync(menu_id, &[], &existing).unwrap();
        assert!(changes.inserts.is_empty());
        assert!(changes.updates.is_empty());
        assert_eq!(changes.deletes.len(), 2);
        assert!(changes.deletes.contains(&stale.id));
        assert!(changes.deletes.contains(&garbled.id));
        assert!(!changes.deletes.contains(&custom.id));
    }

    #[test]
    fn test_new_items_take_next_free_slot() {
        let menu_id = Uuid::new_v4();
        let custom = custom_item(menu_id, "Siparişler", 4);
        let existing = vec![custom];

        let categories = vec![category(1, None, "Elektronik"), category(2, None, "Yazılım")];
        let changes = plan_category_sync(menu_id, &categories, &existing).unwrap();

        assert_eq!(changes.inserts[0].position, 5);
        assert_eq!(changes.inserts[1].position, 6);
    }

    #[test]
    fn test_catalog_scenario_with_locked_child() {
        // Categories (1, root, "Elektronik Güncel"), (2, under 1, "Konsol
        // Ürünleri"), (3, root, "Yazılım"); the category-2 item pre-exists,
        // locked, titled "Sabit Başlık", under category 1's item.
        let menu_id = Uuid::new_v4();
        let item1 = category_item(menu_id, "1", "Elektronik", None, 0, false);
        let item2 = category_item(menu_id, "2", "Sabit Başlık", Some(item1.id), 0, true);
        let mut rows = vec![item1.clone(), item2.clone()];

        let categories = vec![
            category(1, None, "Elektronik Güncel"),
            category(2, Some(1), "Konsol Ürünleri"),
            category(3, None, "Yazılım"),
        ];

        let changes = plan_category_sync(menu_id, &categories, &rows).unwrap();
        apply_in_memory(&mut rows, &changes);

        let category_rows: Vec<&MenuItem> = rows
            .iter()
            .filter(|r| r.kind == MenuItemKind::Category)
            .collect();
        assert_eq!(category_rows.len(), 3);

        let by_key = |key: &str| rows.iter().find(|r| r.reference_key.as_deref() == Some(key)).unwrap();
        assert_eq!(by_key("1").title, "Elektronik Güncel");
        assert_eq!(by_key("2").title, "Sabit Başlık");
        assert_eq!(by_key("2").parent_id, Some(item1.id));
        assert_eq!(by_key("3").title, "Yazılım");
    }

    #[tokio::test]
    async fn test_sync_requires_configured_menu() {
        let categories = MockCategoryRepository::new();
        let mut menus = MockMenuRepository::new();
        menus.expect_find_by_location().returning(|_| Ok(None));
        let items = MockMenuItemRepository::new();

        let service = CategorySyncService::new(
            Arc::new(categories),
            Arc::new(menus),
            Arc::new(items),
            "admin".to_string(),
        );
        let result = service.sync().await;
        assert!(matches!(result, Err(DomainError::MenuNotConfigured(loc)) if loc == "admin"));
    }

    #[tokio::test]
    async fn test_sync_reports_counts_and_applies_once() {
        let menu = Menu::new("admin".to_string(), "Yönetim".to_string(), None).unwrap();
        let menu_id = menu.id;

        let mut menus = MockMenuRepository::new();
        menus
            .expect_find_by_location()
            .returning(move |_| Ok(Some(menu.clone())));

        let mut categories = MockCategoryRepository::new();
        categories
            .expect_list_all()
            .returning(|| Ok(vec![Category { id: 1, parent_id: None, name: "Elektronik".to_string() }]));

        let mut items = MockMenuItemRepository::new();
        items.expect_list_by_menu().returning(|_| Ok(Vec::new()));
        items
            .expect_apply()
            .withf(move |id, changes| *id == menu_id && changes.inserts.len() == 1)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = CategorySyncService::new(
            Arc::new(categories),
            Arc::new(menus),
            Arc::new(items),
            "admin".to_string(),
        );
        let report = service.sync().await.unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(report.updated, 0);
        assert_eq!(report.removed, 0);
    }
}

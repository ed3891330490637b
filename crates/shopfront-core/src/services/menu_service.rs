// ============================================================================
// Shopfront Core - Menu Service
// File: crates/shopfront-core/src/services/menu_service.rs
// ============================================================================
//! Navigation tree reads and whole-tree saves for one menu location

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use shopfront_shared::constants::MAX_TREE_DEPTH;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    build_tree, LinkTarget, Menu, MenuChangeSet, MenuItem, MenuItemKind, MenuItemSettings,
    MenuTreeNode,
};
use crate::error::DomainError;
use crate::repositories::{MenuItemRepository, MenuRepository};

/// One node of the desired tree submitted by the drag-and-drop editor.
///
/// `id` present means "update that row"; absent means "create". Sibling order
/// is the vector order; `position` and `parent_id` are derived during
/// planning, never taken from the client.
#[derive(Debug, Clone)]
pub struct MenuNodeInput {
    pub id: Option<Uuid>,
    pub kind: MenuItemKind,
    pub reference_key: Option<String>,
    pub title: String,
    pub url: Option<String>,
    pub target: LinkTarget,
    pub is_visible: bool,
    pub settings: MenuItemSettings,
    pub children: Vec<MenuNodeInput>,
}

/// Service for reading and replacing navigation trees.
pub struct MenuService<M: MenuRepository, I: MenuItemRepository> {
    menus: Arc<M>,
    items: Arc<I>,
}

impl<M: MenuRepository, I: MenuItemRepository> MenuService<M, I> {
    pub fn new(menus: Arc<M>, items: Arc<I>) -> Self {
        Self { menus, items }
    }

    /// List every configured menu placement.
    pub async fn list_menus(&self) -> Result<Vec<Menu>, DomainError> {
        self.menus.list_all().await
    }

    /// Register a new menu placement (setup/seeding path).
    pub async fn create_menu(
        &self,
        location: &str,
        title: &str,
        description: Option<String>,
    ) -> Result<Menu, DomainError> {
        let menu = Menu::new(location.to_string(), title.to_string(), description)?;
        let created = self.menus.create(&menu).await?;
        info!("Menu created: {} ({})", created.location, created.id);
        Ok(created)
    }

    /// Read the ordered navigation forest for a location.
    ///
    /// An unconfigured location or an empty menu yields an empty forest, not
    /// an error. No side effects.
    pub async fn menu_tree(&self, location: &str) -> Result<Vec<MenuTreeNode>, DomainError> {
        let Some(menu) = self.menus.find_by_location(location).await? else {
            return Ok(Vec::new());
        };
        let items = self.items.list_by_menu(&menu.id).await?;
        Ok(build_tree(items))
    }

    /// Replace the whole tree of a location with `desired`, atomically.
    ///
    /// Plans a minimal diff against the stored rows (create / update /
    /// delete) and applies it in one transaction. Stored rows absent from
    /// `desired` are deleted, descendants included. Fails without touching
    /// anything if the location has no menu, if a descriptor id is unknown
    /// or duplicated, if nesting exceeds the depth guard, or if a settings
    /// key is used with the wrong item kind.
    pub async fn save_menu(
        &self,
        location: &str,
        desired: &[MenuNodeInput],
    ) -> Result<(), DomainError> {
        let menu = self.menus.find_by_location(location).await?.ok_or_else(|| {
            warn!("Save rejected: no menu registered for location: {}", location);
            DomainError::MenuNotConfigured(location.to_string())
        })?;

        let existing = self.items.list_by_menu(&menu.id).await?;
        let changes = plan_menu_save(menu.id, &existing, desired)?;

        if changes.is_empty() {
            info!("Menu '{}' unchanged, nothing to persist", location);
            return Ok(());
        }

        self.items.apply(&menu.id, &changes).await?;
        info!(
            "Menu '{}' saved: {} inserted, {} updated, {} deleted",
            location,
            changes.inserts.len(),
            changes.updates.len(),
            changes.deletes.len()
        );
        Ok(())
    }
}

/// Diff the desired tree against the stored rows of one menu.
///
/// Pre-order walk: `position` is the 0-based sibling index, `parent_id` the
/// enclosing node's id. New nodes get their id up front, so parents are
/// always resolvable before their children are visited and the insert list
/// comes out parents-first.
fn plan_menu_save(
    menu_id: Uuid,
    existing: &[MenuItem],
    desired: &[MenuNodeInput],
) -> Result<MenuChangeSet, DomainError> {
    let existing_by_id: HashMap<Uuid, &MenuItem> =
        existing.iter().map(|item| (item.id, item)).collect();

    let mut changes = MenuChangeSet::default();
    let mut seen: HashSet<Uuid> = HashSet::new();
    walk_desired(
        &mut changes,
        &mut seen,
        &existing_by_id,
        menu_id,
        desired,
        None,
        0,
    )?;

    for item in existing {
        if !seen.contains(&item.id) {
            changes.deletes.push(item.id);
        }
    }

    Ok(changes)
}

#[allow(clippy::too_many_arguments)]
fn walk_desired(
    changes: &mut MenuChangeSet,
    seen: &mut HashSet<Uuid>,
    existing_by_id: &HashMap<Uuid, &MenuItem>,
    menu_id: Uuid,
    nodes: &[MenuNodeInput],
    parent_id: Option<Uuid>,
    depth: usize,
) -> Result<(), DomainError> {
    if nodes.is_empty() {
        return Ok(());
    }
    if depth >= MAX_TREE_DEPTH {
        return Err(DomainError::ValidationError(format!(
            "Menu tree exceeds the maximum depth of {}",
            MAX_TREE_DEPTH
        )));
    }

    for (index, node) in nodes.iter().enumerate() {
        node.settings.validate_for(node.kind)?;
        let position = index as i32;

        let resolved_id = match node.id {
            Some(id) => {
                let current = *existing_by_id.get(&id).ok_or_else(|| {
                    DomainError::ValidationError(format!("Unknown menu item id: {}", id))
                })?;
                if !seen.insert(id) {
                    return Err(DomainError::ValidationError(format!(
                        "Menu item id appears more than once: {}",
                        id
                    )));
                }

                let mut updated = current.clone();
                updated.parent_id = parent_id;
                updated.kind = node.kind;
                updated.reference_key = node.reference_key.clone();
                updated.title = node.title.trim().to_string();
                updated.url = node.url.clone();
                updated.target = node.target;
                updated.position = position;
                updated.is_visible = node.is_visible;
                updated.settings = node.settings.clone();
                updated.validate()?;

                if !updated.content_eq(current) {
                    updated.touch();
                    changes.updates.push(updated);
                }
                id
            }
            None => {
                let item = MenuItem::new(
                    menu_id,
                    parent_id,
                    node.kind,
                    node.reference_key.clone(),
                    node.title.clone(),
                    node.url.clone(),
                    node.target,
                    position,
                    node.is_visible,
                    node.settings.clone(),
                )?;
                let id = item.id;
                seen.insert(id);
                changes.inserts.push(item);
                id
            }
        };

        walk_desired(
            changes,
            seen,
            existing_by_id,
            menu_id,
            &node.children,
            Some(resolved_id),
            depth + 1,
        )?;
    }

    Ok(())
}

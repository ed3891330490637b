// ============================================================================
// Shopfront Infrastructure - PostgreSQL Menu Item Repository
// File: crates/shopfront-infrastructure/src/database/postgres/menu_item_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info, warn};
use uuid::Uuid;

use shopfront_core::domain::{
    LinkTarget, MenuChangeSet, MenuItem, MenuItemKind, MenuItemSettings,
};
use shopfront_core::error::DomainError;
use shopfront_core::repositories::MenuItemRepository;

pub struct PgMenuItemRepository {
    pool: PgPool,
}

impl PgMenuItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuItemRow {
    pub id: Uuid,
    pub menu_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub kind: String,
    pub reference_key: Option<String>,
    pub title: String,
    pub url: Option<String>,
    pub target: String,
    pub position: i32,
    pub is_visible: bool,
    pub settings: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        let settings = match row.settings {
            Some(value) => serde_json::from_value::<MenuItemSettings>(value).unwrap_or_else(|e| {
                warn!("Garbled settings on menu item {}: {}", row.id, e);
                MenuItemSettings::default()
            }),
            None => MenuItemSettings::default(),
        };

        MenuItem {
            id: row.id,
            menu_id: row.menu_id,
            parent_id: row.parent_id,
            kind: MenuItemKind::from_str(&row.kind).unwrap_or_default(),
            reference_key: row.reference_key,
            title: row.title,
            url: row.url,
            target: LinkTarget::from_str(&row.target).unwrap_or_default(),
            position: row.position,
            is_visible: row.is_visible,
            settings,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn settings_to_db(settings: &MenuItemSettings) -> Result<Option<serde_json::Value>, DomainError> {
    match serde_json::to_value(settings) {
        Ok(serde_json::Value::Object(map)) if map.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(e) => Err(DomainError::InternalError(format!(
            "Failed to serialize menu item settings: {}",
            e
        ))),
    }
}

#[async_trait]
impl MenuItemRepository for PgMenuItemRepository {
    async fn list_by_menu(&self, menu_id: &Uuid) -> Result<Vec<MenuItem>, DomainError> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT id, menu_id, parent_id, kind, reference_key,
                   title, url, target, "position", is_visible, settings,
                   created_at, updated_at
            FROM menu_items
            WHERE menu_id = $1
            ORDER BY "position", id
            "#,
        )
        .bind(menu_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing menu items: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn apply(&self, menu_id: &Uuid, changes: &MenuChangeSet) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e: sqlx::Error| {
            error!("Database error starting menu transaction: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        // Inserts arrive pre-ordered (parents first), so the parent_id
        // foreign key is satisfied row by row.
        for item in &changes.inserts {
            sqlx::query(
                r#"
                INSERT INTO menu_items (
                    id, menu_id, parent_id, kind, reference_key,
                    title, url, target, "position", is_visible, settings,
                    created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                "#,
            )
            .bind(item.id)
            .bind(item.menu_id)
            .bind(item.parent_id)
            .bind(item.kind.as_str())
            .bind(&item.reference_key)
            .bind(&item.title)
            .bind(&item.url)
            .bind(item.target.as_str())
            .bind(item.position)
            .bind(item.is_visible)
            .bind(settings_to_db(&item.settings)?)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error inserting menu item: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;
        }

        for item in &changes.updates {
            sqlx::query(
                r#"
                UPDATE menu_items
                SET parent_id = $3,
                    kind = $4,
                    reference_key = $5,
                    title = $6,
                    url = $7,
                    target = $8,
                    "position" = $9,
                    is_visible = $10,
                    settings = $11,
                    updated_at = $12
                WHERE id = $1 AND menu_id = $2
                "#,
            )
            .bind(item.id)
            .bind(menu_id)
            .bind(item.parent_id)
            .bind(item.kind.as_str())
            .bind(&item.reference_key)
            .bind(&item.title)
            .bind(&item.url)
            .bind(item.target.as_str())
            .bind(item.position)
            .bind(item.is_visible)
            .bind(settings_to_db(&item.settings)?)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error updating menu item: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;
        }

        if !changes.deletes.is_empty() {
            sqlx::query(
                r#"
                DELETE FROM menu_items
                WHERE menu_id = $1 AND id = ANY($2)
                "#,
            )
            .bind(menu_id)
            .bind(&changes.deletes)
            .execute(&mut *tx)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting menu items: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;
        }

        tx.commit().await.map_err(|e: sqlx::Error| {
            error!("Database error committing menu transaction: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!(
            "Menu {} changes applied: {} inserted, {} updated, {} deleted",
            menu_id,
            changes.inserts.len(),
            changes.updates.len(),
            changes.deletes.len()
        );
        Ok(())
    }
}

// ============================================================================
// Shopfront Infrastructure - PostgreSQL Menu Repository
// File: crates/shopfront-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use shopfront_core::domain::Menu;
use shopfront_core::error::DomainError;
use shopfront_core::repositories::MenuRepository;

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuRow {
    pub id: Uuid,
    pub location: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MenuRow> for Menu {
    fn from(row: MenuRow) -> Self {
        Menu {
            id: row.id,
            location: row.location,
            title: row.title,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn find_by_location(&self, location: &str) -> Result<Option<Menu>, DomainError> {
        let row: Option<MenuRow> = sqlx::query_as(
            r#"
            SELECT id, location, title, description, created_at
            FROM menus
            WHERE location = $1
            "#,
        )
        .bind(location)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding menu by location: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_all(&self) -> Result<Vec<Menu>, DomainError> {
        let rows: Vec<MenuRow> = sqlx::query_as(
            r#"
            SELECT id, location, title, description, created_at
            FROM menus
            ORDER BY location
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing menus: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, menu: &Menu) -> Result<Menu, DomainError> {
        info!("Creating menu: {}", menu.location);

        let row: MenuRow = sqlx::query_as(
            r#"
            INSERT INTO menus (id, location, title, description, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, location, title, description, created_at
            "#,
        )
        .bind(menu.id)
        .bind(&menu.location)
        .bind(&menu.title)
        .bind(&menu.description)
        .bind(menu.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating menu: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::MenuLocationAlreadyExists(menu.location.clone())
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        info!("Menu created successfully: {}", row.id);
        Ok(row.into())
    }
}

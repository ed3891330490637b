// ============================================================================
// Shopfront Infrastructure - PostgreSQL Category Repository (read-only)
// File: crates/shopfront-infrastructure/src/database/postgres/category_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;

use shopfront_core::domain::Category;
use shopfront_core::error::DomainError;
use shopfront_core::repositories::CategoryRepository;

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct CategoryRow {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            parent_id: row.parent_id,
            name: row.name,
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list_all(&self) -> Result<Vec<Category>, DomainError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, parent_id, name
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing categories: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

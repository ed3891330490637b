use std::sync::Arc;

use shopfront_core::services::{CategorySyncService, MenuService};
use shopfront_infrastructure::{PgCategoryRepository, PgMenuItemRepository, PgMenuRepository};
use shopfront_shared::config::AppConfig;
use sqlx::PgPool;

pub type PgMenuService = MenuService<PgMenuRepository, PgMenuItemRepository>;
pub type PgCategorySyncService =
    CategorySyncService<PgCategoryRepository, PgMenuRepository, PgMenuItemRepository>;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: AppConfig,
    pub menus: Arc<PgMenuService>,
    pub category_sync: Arc<PgCategorySyncService>,
}

//! Domain services (business logic)

pub mod category_sync_service;
pub mod menu_service;

pub use category_sync_service::{CategorySyncService, SyncReport};
pub use menu_service::{MenuNodeInput, MenuService};

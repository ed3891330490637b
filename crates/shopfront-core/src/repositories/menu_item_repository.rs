//! Menu item repository trait (port)

use crate::domain::{MenuChangeSet, MenuItem};
use crate::error::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    async fn list_by_menu(&self, menu_id: &Uuid) -> Result<Vec<MenuItem>, DomainError>;

    /// Apply a planned change set inside a single transaction: inserts in the
    /// given (pre-order) order, then updates, then deletes. All-or-nothing.
    async fn apply(&self, menu_id: &Uuid, changes: &MenuChangeSet) -> Result<(), DomainError>;
}

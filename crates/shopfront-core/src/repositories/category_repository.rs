//! Category repository trait (port, read-only)

use crate::domain::Category;
use crate::error::DomainError;
use async_trait::async_trait;

/// Read access to the catalog's category table. The menu engine never writes
/// categories; the catalog module owns them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Category>, DomainError>;
}

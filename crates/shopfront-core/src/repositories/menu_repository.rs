//! Menu repository trait (port)

use crate::domain::Menu;
use crate::error::DomainError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn find_by_location(&self, location: &str) -> Result<Option<Menu>, DomainError>;
    async fn list_all(&self) -> Result<Vec<Menu>, DomainError>;
    async fn create(&self, menu: &Menu) -> Result<Menu, DomainError>;
}

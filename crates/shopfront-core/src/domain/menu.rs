// ============================================================================
// Shopfront Core - Menu Entity
// File: crates/shopfront-core/src/domain/menu.rs
// Description: Named menu placement slot (header, footer, admin, ...)
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Menu entity.
///
/// One row per placement slot; the `location` is unique and is the handle the
/// rest of the system uses ("header", "footer", "admin"). Menus are created
/// during seeding/setup and never mutated by storefront visitors.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Menu {
    pub id: Uuid,

    #[validate(length(min = 1, max = 50, message = "Location must be between 1 and 50 characters"))]
    pub location: String,

    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Menu {
    pub fn new(
        location: String,
        title: String,
        description: Option<String>,
    ) -> Result<Self, validator::ValidationErrors> {
        let menu = Self {
            id: shopfront_shared::new_id(),
            location: location.trim().to_string(),
            title: title.trim().to_string(),
            description: description.map(|d| d.trim().to_string()),
            created_at: Utc::now(),
        };

        menu.validate()?;
        Ok(menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_menu() {
        let menu = Menu::new(
            "header".to_string(),
            "Site Header".to_string(),
            Some("Main navigation".to_string()),
        );
        assert!(menu.is_ok());
        assert_eq!(menu.unwrap().location, "header");
    }

    #[test]
    fn test_empty_location_rejected() {
        let menu = Menu::new("  ".to_string(), "Broken".to_string(), None);
        assert!(menu.is_err());
    }
}

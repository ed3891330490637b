//! Category entity (catalog collaborator, read-only here)

use serde::{Deserialize, Serialize};
use shopfront_shared::constants::CATEGORY_URL_PREFIX;
use shopfront_shared::utils::slugify;

/// Catalog category. Owned and written by the catalog module; the menu
/// engine only reads it as ground truth for `category`-kind menu items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Storefront URL for this category, derived from its name.
    pub fn url(&self) -> String {
        format!("{}/{}", CATEGORY_URL_PREFIX, slugify(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_url() {
        let cat = Category {
            id: 1,
            parent_id: None,
            name: "Elektronik Güncel".to_string(),
        };
        assert_eq!(cat.url(), "/kategori/elektronik-guncel");
    }
}

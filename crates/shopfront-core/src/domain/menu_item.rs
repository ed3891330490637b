// ============================================================================
// Shopfront Core - Menu Item Entity
// File: crates/shopfront-core/src/domain/menu_item.rs
// Description: One node of a menu's navigation tree
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;

/// Node type of a menu item.
///
/// `category` nodes are auto-managed by the category synchronizer; `route`
/// nodes point at back-office routes and carry activation pattern / role
/// settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuItemKind {
    #[default]
    Custom,
    Page,
    Blog,
    Route,
    Category,
    Group,
}

impl MenuItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuItemKind::Custom => "custom",
            MenuItemKind::Page => "page",
            MenuItemKind::Blog => "blog",
            MenuItemKind::Route => "route",
            MenuItemKind::Category => "category",
            MenuItemKind::Group => "group",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "custom" => Some(MenuItemKind::Custom),
            "page" => Some(MenuItemKind::Page),
            "blog" => Some(MenuItemKind::Blog),
            "route" => Some(MenuItemKind::Route),
            "category" => Some(MenuItemKind::Category),
            "group" => Some(MenuItemKind::Group),
            _ => None,
        }
    }
}

/// Link target of a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkTarget {
    #[default]
    #[serde(rename = "_self")]
    SelfFrame,
    #[serde(rename = "_blank")]
    Blank,
}

impl LinkTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkTarget::SelfFrame => "_self",
            LinkTarget::Blank => "_blank",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "_self" => Some(LinkTarget::SelfFrame),
            "_blank" => Some(LinkTarget::Blank),
            _ => None,
        }
    }
}

/// Per-item settings bag.
///
/// Known keys are typed; anything else round-trips through `extra`. Which
/// keys are legal depends on the item kind, checked by `validate_for`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItemSettings {
    /// Icon class/identifier, any kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// URL-activation pattern, `route` kind only. Must compile as a regex.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Allowed role identifiers, `route` kind only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,

    /// `category` kind only: the administrator overrode the auto-synced
    /// title; the synchronizer must not touch it again.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_locked: Option<bool>,

    /// Passthrough for keys this build does not know about.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MenuItemSettings {
    pub fn is_title_locked(&self) -> bool {
        self.title_locked.unwrap_or(false)
    }

    /// Check the bag against the keys recognized for `kind`.
    pub fn validate_for(&self, kind: MenuItemKind) -> Result<(), DomainError> {
        if let Some(pattern) = &self.pattern {
            if kind != MenuItemKind::Route {
                return Err(DomainError::ValidationError(format!(
                    "Setting 'pattern' is only valid for route items, not {}",
                    kind.as_str()
                )));
            }
            regex::Regex::new(pattern).map_err(|e| {
                DomainError::ValidationError(format!("Invalid activation pattern: {}", e))
            })?;
        }

        if self.roles.is_some() && kind != MenuItemKind::Route {
            return Err(DomainError::ValidationError(format!(
                "Setting 'roles' is only valid for route items, not {}",
                kind.as_str()
            )));
        }

        if self.title_locked.is_some() && kind != MenuItemKind::Category {
            return Err(DomainError::ValidationError(format!(
                "Setting 'title_locked' is only valid for category items, not {}",
                kind.as_str()
            )));
        }

        Ok(())
    }
}

/// Menu item entity: one node in a location's navigation tree.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItem {
    pub id: Uuid,

    /// Owning menu. Never changes once set.
    pub menu_id: Uuid,

    /// Parent node in the same menu, `None` for roots. The parent chain is
    /// acyclic and bounded by `MAX_TREE_DEPTH`.
    pub parent_id: Option<Uuid>,

    pub kind: MenuItemKind,

    /// Correlation key to an external entity: category id, page slug, blog
    /// slug, or an admin route URL. Join key for the synchronizer.
    pub reference_key: Option<String>,

    #[validate(length(min = 1, max = 150, message = "Title must be between 1 and 150 characters"))]
    pub title: String,

    /// Target link; derived (and owned) by the synchronizer for category nodes.
    pub url: Option<String>,

    pub target: LinkTarget,

    /// Sibling order. Not necessarily contiguous; ties break by id ascending.
    pub position: i32,

    pub is_visible: bool,

    pub settings: MenuItemSettings,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MenuItem {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        menu_id: Uuid,
        parent_id: Option<Uuid>,
        kind: MenuItemKind,
        reference_key: Option<String>,
        title: String,
        url: Option<String>,
        target: LinkTarget,
        position: i32,
        is_visible: bool,
        settings: MenuItemSettings,
    ) -> Result<Self, validator::ValidationErrors> {
        let item = Self {
            id: shopfront_shared::new_id(),
            menu_id,
            parent_id,
            kind,
            reference_key,
            title: title.trim().to_string(),
            url,
            target,
            position,
            is_visible,
            settings,
            created_at: Utc::now(),
            updated_at: None,
        };

        item.validate()?;
        Ok(item)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_title_locked(&self) -> bool {
        self.kind == MenuItemKind::Category && self.settings.is_title_locked()
    }

    /// Stamp the row as modified.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    /// Field-level equality over everything the mutator and synchronizer may
    /// change. Audit stamps are ignored so a planned no-op stays a no-op.
    pub fn content_eq(&self, other: &MenuItem) -> bool {
        self.parent_id == other.parent_id
            && self.kind == other.kind
            && self.reference_key == other.reference_key
            && self.title == other.title
            && self.url == other.url
            && self.target == other.target
            && self.position == other.position
            && self.is_visible == other.is_visible
            && self.settings == other.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn any_item(kind: MenuItemKind, settings: MenuItemSettings) -> Result<MenuItem, validator::ValidationErrors> {
        MenuItem::new(
            Uuid::new_v4(),
            None,
            kind,
            None,
            "Anasayfa".to_string(),
            Some("/".to_string()),
            LinkTarget::SelfFrame,
            0,
            true,
            settings,
        )
    }

    #[test]
    fn test_create_menu_item() {
        let item = any_item(MenuItemKind::Custom, MenuItemSettings::default());
        assert!(item.is_ok());
        let item = item.unwrap();
        assert!(item.is_root());
        assert!(!item.is_title_locked());
    }

    #[test]
    fn test_empty_title_rejected() {
        let item = MenuItem::new(
            Uuid::new_v4(),
            None,
            MenuItemKind::Custom,
            None,
            "   ".to_string(),
            None,
            LinkTarget::SelfFrame,
            0,
            true,
            MenuItemSettings::default(),
        );
        assert!(item.is_err());
    }

    #[test]
    fn test_settings_keys_are_kind_specific() {
        let route_settings = MenuItemSettings {
            pattern: Some("^/admin/orders(/.*)?$".to_string()),
            roles: Some(vec!["admin".to_string()]),
            ..Default::default()
        };
        assert!(route_settings.validate_for(MenuItemKind::Route).is_ok());
        assert!(route_settings.validate_for(MenuItemKind::Custom).is_err());

        let locked = MenuItemSettings {
            title_locked: Some(true),
            ..Default::default()
        };
        assert!(locked.validate_for(MenuItemKind::Category).is_ok());
        assert!(locked.validate_for(MenuItemKind::Route).is_err());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let settings = MenuItemSettings {
            pattern: Some("([".to_string()),
            ..Default::default()
        };
        assert!(settings.validate_for(MenuItemKind::Route).is_err());
    }

    #[test]
    fn test_content_eq_ignores_audit_stamps() {
        let mut a = any_item(MenuItemKind::Custom, MenuItemSettings::default()).unwrap();
        let b = a.clone();
        a.touch();
        assert!(a.content_eq(&b));

        a.title = "Yeni Başlık".to_string();
        assert!(!a.content_eq(&b));
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in [
            MenuItemKind::Custom,
            MenuItemKind::Page,
            MenuItemKind::Blog,
            MenuItemKind::Route,
            MenuItemKind::Category,
            MenuItemKind::Group,
        ] {
            assert_eq!(MenuItemKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(MenuItemKind::from_str("bogus"), None);
    }
}

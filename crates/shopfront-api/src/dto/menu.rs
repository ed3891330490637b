// ============================================================================
// Shopfront API - Menu DTOs
// File: crates/shopfront-api/src/dto/menu.rs
// ============================================================================
//! Wire shapes for the menu endpoints, matching the tree editor's contract:
//! `{id?, type, reference_key?, title, url?, target, is_visible, settings,
//! children: [...]}`, sibling order = array order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_core::domain::{LinkTarget, Menu, MenuItemKind, MenuItemSettings, MenuTreeNode};
use shopfront_core::services::MenuNodeInput;

/// One node as submitted by the drag-and-drop editor.
#[derive(Debug, Deserialize)]
pub struct MenuNodeRequest {
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: MenuItemKind,
    pub reference_key: Option<String>,
    pub title: String,
    pub url: Option<String>,
    #[serde(default)]
    pub target: LinkTarget,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub settings: MenuItemSettings,
    #[serde(default)]
    pub children: Vec<MenuNodeRequest>,
}

fn default_visible() -> bool {
    true
}

impl From<MenuNodeRequest> for MenuNodeInput {
    fn from(node: MenuNodeRequest) -> Self {
        MenuNodeInput {
            id: node.id,
            kind: node.kind,
            reference_key: node.reference_key,
            title: node.title,
            url: node.url,
            target: node.target,
            is_visible: node.is_visible,
            settings: node.settings,
            children: node.children.into_iter().map(Into::into).collect(),
        }
    }
}

/// One node as returned to the editor, ids populated.
#[derive(Debug, Serialize)]
pub struct MenuNodeResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: MenuItemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_key: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub target: LinkTarget,
    pub position: i32,
    pub is_visible: bool,
    pub settings: MenuItemSettings,
    pub children: Vec<MenuNodeResponse>,
}

impl From<MenuTreeNode> for MenuNodeResponse {
    fn from(node: MenuTreeNode) -> Self {
        MenuNodeResponse {
            id: node.item.id,
            kind: node.item.kind,
            reference_key: node.item.reference_key,
            title: node.item.title,
            url: node.item.url,
            target: node.item.target,
            position: node.item.position,
            is_visible: node.item.is_visible,
            settings: node.item.settings,
            children: node.children.into_iter().map(Into::into).collect(),
        }
    }
}

/// Menu placement for the back-office index.
#[derive(Debug, Serialize)]
pub struct MenuDto {
    pub id: Uuid,
    pub location: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Menu> for MenuDto {
    fn from(menu: Menu) -> Self {
        MenuDto {
            id: menu.id,
            location: menu.location,
            title: menu.title,
            description: menu.description,
        }
    }
}

/// Setup payload for registering a menu placement.
#[derive(Debug, Deserialize)]
pub struct CreateMenuRequest {
    pub location: String,
    pub title: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_payload_deserializes() {
        let body = r#"
        [
            {"type": "custom", "title": "Anasayfa", "url": "/", "target": "_self", "is_visible": true, "children": []},
            {"type": "category", "reference_key": "1", "title": "Elektronik",
             "url": "/kategori/elektronik", "target": "_self", "is_visible": true,
             "settings": {"title_locked": false}, "children": []}
        ]
        "#;

        let nodes: Vec<MenuNodeRequest> = serde_json::from_str(body).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind, MenuItemKind::Custom);
        assert_eq!(nodes[1].kind, MenuItemKind::Category);
        assert_eq!(nodes[1].settings.title_locked, Some(false));
    }

    #[test]
    fn test_optional_fields_default() {
        let body = r#"[{"type": "group", "title": "Kurumsal"}]"#;
        let nodes: Vec<MenuNodeRequest> = serde_json::from_str(body).unwrap();
        assert!(nodes[0].is_visible);
        assert_eq!(nodes[0].target, LinkTarget::SelfFrame);
        assert!(nodes[0].children.is_empty());
        assert_eq!(nodes[0].settings, MenuItemSettings::default());
    }

    #[test]
    fn test_unknown_settings_keys_round_trip() {
        let body = r#"[{"type": "custom", "title": "Promo", "settings": {"icon": "star", "badge": "new"}}]"#;
        let nodes: Vec<MenuNodeRequest> = serde_json::from_str(body).unwrap();
        assert_eq!(nodes[0].settings.icon.as_deref(), Some("star"));
        assert_eq!(
            nodes[0].settings.extra.get("badge"),
            Some(&serde_json::Value::String("new".to_string()))
        );
    }
}

//! Application-wide constants

/// Maximum nesting depth of a navigation tree. The parent chain of any menu
/// item must terminate within this many hops.
pub const MAX_TREE_DEPTH: usize = 50;

/// Menu location that mirrors the live category catalog by default.
pub const DEFAULT_CATEGORY_MENU_LOCATION: &str = "admin";

/// URL prefix for derived category links.
pub const CATEGORY_URL_PREFIX: &str = "/kategori";

//! Repository traits (ports)

pub mod category_repository;
pub mod menu_item_repository;
pub mod menu_repository;

pub use category_repository::CategoryRepository;
pub use menu_item_repository::MenuItemRepository;
pub use menu_repository::MenuRepository;

//! # Shopfront Infrastructure
//!
//! Database implementations (adapters) for the menu engine's ports.

pub mod database;

pub use database::{create_pool, PgCategoryRepository, PgMenuItemRepository, PgMenuRepository};

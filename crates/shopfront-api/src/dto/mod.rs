//! Request/response DTOs

pub mod menu;

pub use menu::{CreateMenuRequest, MenuDto, MenuNodeRequest, MenuNodeResponse};

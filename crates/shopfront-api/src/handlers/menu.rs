// ============================================================================
// Shopfront API - Menu Handlers
// File: crates/shopfront-api/src/handlers/menu.rs
// ============================================================================
//! Menu endpoints: back-office index, tree read, whole-tree save, category
//! sync trigger.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use shopfront_core::error::DomainError;
use shopfront_core::services::{MenuNodeInput, SyncReport};

use crate::dto::{CreateMenuRequest, MenuDto, MenuNodeRequest, MenuNodeResponse};
use crate::response::ApiResponse;
use crate::state::AppState;

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

fn error_response(err: DomainError) -> HandlerError {
    let (status, code) = match &err {
        DomainError::MenuNotConfigured(_) => (StatusCode::NOT_FOUND, "MENU_NOT_CONFIGURED"),
        DomainError::MenuLocationAlreadyExists(_) => (StatusCode::CONFLICT, "LOCATION_EXISTS"),
        DomainError::ValidationError(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
        DomainError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        DomainError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };
    (status, Json(ApiResponse::error(code, &err.to_string())))
}

/// List menu placements - GET /api/v1/menus
pub async fn list_menus(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuDto>>>, HandlerError> {
    let menus = state.menus.list_menus().await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        menus.into_iter().map(Into::into).collect(),
    )))
}

/// Register a menu placement - POST /api/v1/menus
pub async fn create_menu(
    State(state): State<AppState>,
    Json(payload): Json<CreateMenuRequest>,
) -> Result<Json<ApiResponse<MenuDto>>, HandlerError> {
    let menu = state
        .menus
        .create_menu(&payload.location, &payload.title, payload.description)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(menu.into())))
}

/// Read the navigation tree - GET /api/v1/menus/{location}/tree
pub async fn get_menu_tree(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<Json<ApiResponse<Vec<MenuNodeResponse>>>, HandlerError> {
    let tree = state.menus.menu_tree(&location).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        tree.into_iter().map(Into::into).collect(),
    )))
}

/// Replace the navigation tree - PUT /api/v1/menus/{location}/tree
///
/// Body is the editor's node array; the response is the re-read tree so the
/// editor picks up the ids assigned to new nodes.
pub async fn save_menu_tree(
    State(state): State<AppState>,
    Path(location): Path<String>,
    Json(payload): Json<Vec<MenuNodeRequest>>,
) -> Result<Json<ApiResponse<Vec<MenuNodeResponse>>>, HandlerError> {
    let desired: Vec<MenuNodeInput> = payload.into_iter().map(Into::into).collect();
    state
        .menus
        .save_menu(&location, &desired)
        .await
        .map_err(error_response)?;

    let tree = state.menus.menu_tree(&location).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        tree.into_iter().map(Into::into).collect(),
    )))
}

/// Reconcile category shortcuts - POST /api/v1/menus/sync-categories
///
/// Called by the catalog module after any category change.
pub async fn sync_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SyncReport>>, HandlerError> {
    let report = state.category_sync.sync().await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(report)))
}

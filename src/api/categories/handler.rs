//! Category API handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::ServerState;
use crate::db::store::CategoryDetail;
use crate::utils::{AppError, AppResult};

/// GET /categories - all categories with nested subcategories and items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<CategoryDetail>>> {
    Ok(Json(state.store.categories()))
}

/// GET /categories/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CategoryDetail>> {
    let category = state
        .store
        .category(&id)
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;
    Ok(Json(category))
}

/// PATCH /categories/delete/{id} - soft-delete, cascades to subcategories
/// and items
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    state.store.deactivate_category(&id)?;
    Ok(Json(serde_json::json!({ "message": "Category deleted" })))
}

//! Subcategory API handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::ServerState;
use crate::db::store::SubcategoryDetail;
use crate::utils::{AppError, AppResult};

/// GET /subcategory - all subcategories with parent category and items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SubcategoryDetail>>> {
    Ok(Json(state.store.subcategories()))
}

/// GET /subcategory/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SubcategoryDetail>> {
    let subcategory = state
        .store
        .subcategory(&id)
        .ok_or_else(|| AppError::NotFound(format!("Subcategory {} not found", id)))?;
    Ok(Json(subcategory))
}

/// PATCH /subcategory/delete/{id} - soft-delete, cascades to items
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    state.store.deactivate_subcategory(&id)?;
    Ok(Json(serde_json::json!({ "message": "Subcategory deleted" })))
}

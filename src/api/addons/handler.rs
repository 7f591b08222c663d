//! Add-on API handlers

use axum::{extract::State, Json};

use crate::core::ServerState;
use crate::db::store::AddonWithGroup;
use crate::utils::AppResult;

/// GET /addons - flat list of all add-ons with their group and item
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AddonWithGroup>>> {
    Ok(Json(state.store.addons()))
}

//! Subcategory API module

mod handler;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/subcategory", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/delete/{id}", patch(handler::delete))
}

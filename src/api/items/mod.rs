//! Item API module

mod handler;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        // Literal route before /{id} to avoid path conflicts
        .route("/search", get(handler::search))
        .route("/{id}/price", get(handler::price))
        .route("/delete/{id}", patch(handler::delete))
}

//! Booking API module

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/booking/items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}/availability", get(handler::availability))
        .route("/{id}/book", post(handler::book))
}

//! Booking API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{Booking, Slot};
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Date to list slots for (YYYY-MM-DD); defaults to today
    date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub available_slots: Vec<Slot>,
}

/// GET /booking/items/{id}/availability - free slots for a date
pub async fn availability(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let available_slots = state.booking.available_slots(&id, date)?;
    Ok(Json(AvailabilityResponse { available_slots }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub message: &'static str,
    pub booking: Booking,
}

/// POST /booking/items/{id}/book - reserve a time range
pub async fn book(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(request): Json<BookRequest>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let booking = state
        .booking
        .book_slot(&id, request.start_time, request.end_time)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            message: "Booking confirmed",
            booking,
        }),
    ))
}

//! Unified Error Handling
//!
//! Provides the application-level error type and response structure:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - API response envelope
//!
//! # Error code scheme
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E0xxx | business errors | E0003 not found |
//! | E9xxx | system errors | E9001 internal error |
//!
//! Domain errors ([`PricingError`], [`BookingError`], [`StoreError`]) convert
//! into `AppError` at the handler boundary; the HTTP status mapping lives in
//! one place, the `IntoResponse` impl below.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::booking::BookingError;
use crate::db::StoreError;
use crate::pricing::PricingError;

/// Unified API response envelope (used for error bodies)
///
/// ```json
/// {
///   "code": "E0003",
///   "message": "Item not found"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code, see the scheme table above
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub type AppResult<T> = Result<T, AppError>;

/// Application error enum
///
/// | Category | Variants | Status |
/// |----------|----------|--------|
/// | business | NotFound | 404 |
/// | business | Validation, Conflict, BusinessRule | 400 |
/// | system | Internal | 500 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Booking overlap. Surfaced as 400 to match the public API contract.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, "E0004", msg.clone()),
            AppError::BusinessRule(msg) => (StatusCode::BAD_REQUEST, "E0005", msg.clone()),
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

// ========== Conversions from domain error types ==========

impl From<PricingError> for AppError {
    fn from(e: PricingError) -> Self {
        match e {
            PricingError::NotFound => AppError::NotFound(e.to_string()),
            PricingError::ConfigMissing
            | PricingError::UsageRequired
            | PricingError::NoTierAvailable
            | PricingError::NotAvailableNow => AppError::BusinessRule(e.to_string()),
        }
    }
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::NotFound => AppError::NotFound(e.to_string()),
            BookingError::NotBookable | BookingError::InvalidRange => {
                AppError::Validation(e.to_string())
            }
            BookingError::SlotConflict => AppError::Conflict(e.to_string()),
            BookingError::OutsideSchedule => AppError::BusinessRule(e.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::InvalidPricingType(msg) | StoreError::Validation(msg) => {
                AppError::Validation(msg)
            }
        }
    }
}

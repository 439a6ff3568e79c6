use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pricing::PricingError;
use crate::venue::VenueError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// The shopper is outside every delivery range of the venue. Not retryable.
    #[error("Delivery is not available for a distance of {distance:.0} m")]
    DeliveryUnavailable { distance: f64 },

    #[error("Venue data provider error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::DeliveryUnavailable { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::DeliveryUnavailable { distance } => {
                AppError::DeliveryUnavailable { distance }
            }
            PricingError::AmountOverflow => {
                AppError::BadRequest("Order amount exceeds the supported range".to_string())
            }
        }
    }
}

impl From<VenueError> for AppError {
    fn from(err: VenueError) -> Self {
        match err {
            VenueError::NotFound(slug) => AppError::NotFound(format!("Venue '{}' not found", slug)),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

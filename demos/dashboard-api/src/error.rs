use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use farmprofit::FarmProfitError;
use serde_json::json;
use tracing::warn;

/// Renders as a JSON `{"error": "..."}` response with an HTTP status code.
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.into(),
        }
    }

    /// Upstream failures of the market-price route, which reports them as 500.
    pub fn from_fetch(e: FarmProfitError) -> Self {
        match e {
            FarmProfitError::InvalidArgument(msg) => AppError::bad_request(msg),
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<FarmProfitError> for AppError {
    fn from(e: FarmProfitError) -> Self {
        match e {
            FarmProfitError::InvalidArgument(msg) => AppError::bad_request(msg),
            FarmProfitError::NotFound(msg) => AppError::not_found(msg),
            other => AppError::bad_gateway(other.to_string()),
        }
    }
}

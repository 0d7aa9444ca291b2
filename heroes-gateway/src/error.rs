//! Error types for the gateway crate.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use heroes_core::{CoreError, HeroError};
use serde_json::json;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// An error propagated from the hero service.
    #[error(transparent)]
    Hero(#[from] HeroError),

    /// The admin guard rejected the caller.
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    /// The request body, path or query string could not be parsed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<CoreError> for GatewayError {
    fn from(err: CoreError) -> Self {
        Self::Hero(HeroError::Invalid(err))
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::Hero(HeroError::NotFound(_)) => StatusCode::NOT_FOUND,
            GatewayError::Hero(HeroError::Invalid(_)) | GatewayError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::Hero(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_owned()
        } else {
            self.to_string()
        };
        (status, Json(json!({"error": message}))).into_response()
    }
}

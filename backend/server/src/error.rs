use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing API key or service domain")]
    MissingCmsConfig,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Menu item not found: {0}")]
    UnknownMenuItem(String),

    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Upstream error: {0}")]
    Upstream(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingCmsConfig => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SessionNotFound | AppError::UnknownMenuItem(_) => StatusCode::NOT_FOUND,
            AppError::MalformedPayload => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{message::ErrorResponse, services::gemini::GeminiError};

pub const INVALID_JSON: &str = "Invalid JSON body.";
pub const MISSING_MESSAGE: &str = "Missing 'message' in request body.";
pub const SERVER_ERROR: &str = "Server error processing your message.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("upstream generation failed: {0}")]
    Upstream(#[from] GeminiError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, *msg),
            AppError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR),
        };

        (status, Json(ErrorResponse { error: error.to_string() })).into_response()
    }
}

//! Unified error types for the feed bridge
//!
//! This module defines error types for each layer:
//! - `DomainError`: Fetch store errors
//! - `TranscodeError`: JSON decode and Atom encode errors
//! - `FetchError`: Activity API client errors
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Transcoder errors
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("Malformed activity feed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to write Atom feed: {0}")]
    Write(String),
}

impl From<std::io::Error> for TranscodeError {
    fn from(e: std::io::Error) -> Self {
        TranscodeError::Write(e.to_string())
    }
}

/// Activity API client errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Transcode error: {0}")]
    Transcode(#[from] TranscodeError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Transcode(e) => {
                tracing::error!("Transcode error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Transcode error",
                    Some(e.to_string()),
                )
            }
            AppError::Fetch(e) => {
                tracing::error!("Fetch error: {}", e);
                match e {
                    FetchError::Api { message, .. } => (
                        StatusCode::BAD_GATEWAY,
                        "Activity API error",
                        Some(message.clone()),
                    ),
                    FetchError::Request(_) => {
                        (StatusCode::BAD_GATEWAY, "Activity API unreachable", None)
                    }
                }
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

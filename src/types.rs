//! Type definitions for user_routes
//!
//! Shared error types and configuration models used throughout the app.

use crate::user::error::{ErrorResponse, UserError};
use crate::utils::response_handler::{empty_data, Envelope};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Deserialize;
use thiserror::Error;

/// Application startup errors
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Database connection error: {0}")]
    Database(String),
    #[error("Server binding error: {0}")]
    ServerBind(String),
}

/// Request-level errors turned into an envelope by actix
///
/// Returning one of these from a handler or extractor hands it to the
/// process-wide responder below instead of the handler's own envelope.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] UserError),
    #[error("{0}")]
    BadRequest(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Not found")]
    NotFound,
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn error_code(&self) -> Option<String> {
        match self {
            ApiError::Store(err) => err.error_code(),
            ApiError::BadRequest(_) => Some("BAD_REQUEST".to_string()),
            ApiError::Unauthorized => Some("UNAUTHORIZED".to_string()),
            ApiError::NotFound => Some("NOT_FOUND".to_string()),
            ApiError::Internal(_) => Some("INTERNAL_ERROR".to_string()),
        }
    }

    pub fn to_envelope(&self) -> Envelope {
        let status = self.status_code().as_u16();
        let error = ErrorResponse {
            status,
            message: self.to_string(),
            code: self.error_code(),
        };

        Envelope::build(
            status,
            Some(self.to_string()),
            empty_data(),
            serde_json::to_value(error).ok(),
        )
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(err) => err.status_code(),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("request failed: {self}");
        }
        self.to_envelope().into_response()
    }
}

/// Complete app configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub bind_address: String,
    pub database_url: Option<String>,
    pub database_max_connections: usize,
    pub jwt_secret: String,
    pub cors_origins: String,
    pub log_level: String,
    pub workers: Option<usize>,
}

impl AppConfig {
    /// Allowed CORS origins, `*` meaning any
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            database_url: None,
            database_max_connections: 16,
            jwt_secret: String::new(),
            cors_origins: "*".to_string(),
            log_level: "info".to_string(),
            workers: None,
        }
    }
}

//! HTTP Response Envelope
//!
//! Every response this service writes, success or failure, has the same shape:
//!
//! ```json
//! { "status": 200, "message": "success", "data": [...], "error": { ... } }
//! ```
//!
//! `error` only appears when one was supplied. The HTTP status line mirrors
//! the envelope's `status`.

use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use serde_json::Value;

/// Uniform response wrapper
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T = Value> {
    pub status: u16,
    pub message: Option<String>,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl<T> Envelope<T> {
    /// Build an envelope from its parts
    ///
    /// Pure pass-through: nothing is checked or normalised. Callers own the
    /// validity of `status`.
    pub fn build(status: u16, message: Option<String>, data: T, error: Option<Value>) -> Self {
        Self {
            status,
            message,
            data,
            error,
        }
    }

    /// HTTP status for this envelope
    ///
    /// A status outside the valid HTTP range is written as 500.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> Envelope<T> {
    /// Write the envelope as a JSON body with the matching status line
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Payload used on failure paths
pub fn empty_data() -> Value {
    Value::Array(Vec::new())
}

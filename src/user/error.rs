//! User-related error types

use actix_web::http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tokio_postgres::error::SqlState;

/// Error payload carried in the envelope's `error` field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Errors raised by the user data-access layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email already in use")]
    EmailTaken,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Database connection error: {0}")]
    DbConnectionError(String),
}

impl UserError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UserError::UserNotFound => StatusCode::NOT_FOUND,
            UserError::EmailTaken => StatusCode::CONFLICT,
            UserError::ValidationError(_) => StatusCode::BAD_REQUEST,
            UserError::PasswordHashing(_)
            | UserError::DatabaseError(_)
            | UserError::DbConnectionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Numeric HTTP-style status of this error
    pub fn status(&self) -> u16 {
        self.status_code().as_u16()
    }

    pub fn error_code(&self) -> Option<String> {
        let code = match self {
            UserError::UserNotFound => "USER_NOT_FOUND",
            UserError::EmailTaken => "EMAIL_TAKEN",
            UserError::ValidationError(_) => "VALIDATION_ERROR",
            UserError::PasswordHashing(_) => "PASSWORD_HASHING_ERROR",
            UserError::DatabaseError(_) => "DATABASE_ERROR",
            UserError::DbConnectionError(_) => "DB_CONNECTION_ERROR",
        };
        Some(code.to_string())
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            status: self.status(),
            message: self.to_string(),
            code: self.error_code(),
        }
    }
}

impl UserError {
    /// Maps a driver failure by its SQLSTATE; only the unique email index can
    /// raise `UNIQUE_VIOLATION` on the users table.
    fn from_sql_state(code: Option<&SqlState>, message: String) -> Self {
        match code {
            Some(code) if *code == SqlState::UNIQUE_VIOLATION => UserError::EmailTaken,
            _ => UserError::DatabaseError(message),
        }
    }
}

impl From<tokio_postgres::Error> for UserError {
    fn from(error: tokio_postgres::Error) -> Self {
        UserError::from_sql_state(error.code(), error.to_string())
    }
}

impl From<deadpool_postgres::PoolError> for UserError {
    fn from(error: deadpool_postgres::PoolError) -> Self {
        UserError::DbConnectionError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(UserError::UserNotFound.status(), 404);
        assert_eq!(UserError::EmailTaken.status(), 409);
        assert_eq!(UserError::ValidationError("bad".to_string()).status(), 400);
        assert_eq!(UserError::DatabaseError("down".to_string()).status(), 500);
        assert_eq!(UserError::DbConnectionError("refused".to_string()).status(), 500);
    }

    #[test]
    fn test_to_response() {
        let response = UserError::UserNotFound.to_response();
        assert_eq!(response.status, 404);
        assert_eq!(response.message, "User not found");
        assert_eq!(response.code.as_deref(), Some("USER_NOT_FOUND"));
    }

    #[test]
    fn test_unique_violation_is_email_taken() {
        let err = UserError::from_sql_state(Some(&SqlState::UNIQUE_VIOLATION), "dup".to_string());
        assert_eq!(err, UserError::EmailTaken);
        assert_eq!(err.status(), 409);
    }

    #[test]
    fn test_other_sql_states_are_database_errors() {
        let err = UserError::from_sql_state(Some(&SqlState::UNDEFINED_TABLE), "no table".to_string());
        assert_eq!(err, UserError::DatabaseError("no table".to_string()));

        let err = UserError::from_sql_state(None, "closed".to_string());
        assert_eq!(err, UserError::DatabaseError("closed".to_string()));
    }
}

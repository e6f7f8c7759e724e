//! User Data Transfer Objects
//!
//! Typed request shapes for the user routes. Each one is checked with
//! `validate` right after extraction, so handlers only ever see complete input.

use crate::types::ApiError;
use crate::user::models::{NewUser, UserPatch};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));

/// Create user request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub user_email: String,
    pub password: String,
    #[serde(default)]
    pub token: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !EMAIL_REGEX.is_match(self.user_email.trim()) {
            return Err(ApiError::BadRequest("user_email must be a valid email address".to_string()));
        }
        if self.password.trim().is_empty() {
            return Err(ApiError::BadRequest("password cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            user_email: request.user_email.trim().to_string(),
            password: request.password,
            token: request.token,
        }
    }
}

/// Update password request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

impl UpdatePasswordRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.password.trim().is_empty() {
            return Err(ApiError::BadRequest("password cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl From<UpdatePasswordRequest> for UserPatch {
    fn from(request: UpdatePasswordRequest) -> Self {
        Self {
            password: Some(request.password),
        }
    }
}

/// Query string of `/find/{field}`
#[derive(Debug, Clone, Deserialize)]
pub struct FindQuery {
    pub value: String,
}

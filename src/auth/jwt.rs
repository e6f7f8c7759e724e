//! Session token management
//!
//! Issues and validates the HS256 tokens the session gate reads.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::types::ApiError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Authenticated user id
    pub sub: i64,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: i64) -> Self {
        Self::with_lifetime(user_id, Duration::hours(1))
    }

    pub fn with_lifetime(user_id: i64, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

// Custom Debug implementation to hide sensitive keys
impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("encoding_key", &"<hidden>")
            .field("decoding_key", &"<hidden>")
            .finish()
    }
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, claims: &Claims) -> Result<String, ApiError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("Failed to issue session token: {e}")))
    }

    pub fn validate(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                log::debug!("session token rejected: {e}");
                ApiError::Unauthorized
            })
    }
}

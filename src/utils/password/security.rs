use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use actix_web::web;
use thiserror::Error;

use crate::user::error::UserError;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingError(String),
    #[error("Failed to verify password: {0}")]
    VerificationError(String),
}

impl From<PasswordError> for UserError {
    fn from(error: PasswordError) -> Self {
        UserError::PasswordHashing(error.to_string())
    }
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash_password(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingError(e.to_string()))
    }

    /// Hashes on the blocking pool so the calling worker keeps serving requests
    pub async fn hash_password_blocking(password: String) -> Result<String, PasswordError> {
        web::block(move || Self::hash_password(&password))
            .await
            .map_err(|e| PasswordError::HashingError(e.to_string()))?
    }

    pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::VerificationError(e.to_string()))?;

        let argon2 = Argon2::default();
        Ok(argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok())
    }
}

//! Password hashing and API token generation.

use actix_web::web;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Token prefix.
const TOKEN_PREFIX: &str = "tct_";
/// Length of the token prefix stored for identification.
const TOKEN_PREFIX_LENGTH: usize = 8;

/// Hash a password using Argon2.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored Argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

/// [`hash_password`] on the blocking thread pool, off the request worker.
pub async fn hash_password_blocking(password: SecretString) -> AppResult<String> {
    web::block(move || hash_password(password.expose_secret()))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}

/// [`verify_password`] on the blocking thread pool, off the request worker.
pub async fn verify_password_blocking(password: SecretString, hash: String) -> AppResult<bool> {
    web::block(move || verify_password(password.expose_secret(), &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))
}

/// Generate a new random API token.
///
/// Returns the full token (shown to the user once) and its storage prefix.
pub fn generate_token() -> (String, String) {
    let token = format!("{}{}", TOKEN_PREFIX, Uuid::new_v4().simple());
    let prefix = token.chars().take(TOKEN_PREFIX_LENGTH).collect();
    (token, prefix)
}

/// Hash a token using SHA-256.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

//! Signup, login, and profile management.

use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use super::credentials;
use crate::db::DbPool;
use crate::entity::user;
use crate::error::{AppError, AppResult};
use crate::models::user::MIN_PASSWORD_LENGTH;
use crate::models::{
    AuthenticatedUser, LoginRequest, LoginResponse, SignupRequest, UpdateProfileRequest,
    UserResponse,
};

fn validate_profile(username: &str, email: &str) -> AppResult<()> {
    crate::models::require_non_blank("username", username)?;
    if !email.contains('@') {
        return Err(AppError::InvalidInput(
            "email must be a valid address".to_string(),
        ));
    }
    Ok(())
}

async fn issue_token(pool: &DbPool, user: user::Model) -> AppResult<LoginResponse> {
    let (token, prefix) = credentials::generate_token();
    pool.insert_api_token(user.id, &credentials::hash_token(&token), &prefix)
        .await?;

    Ok(LoginResponse {
        token,
        user: user.into(),
    })
}

/// Register a new user and log them in.
pub async fn signup(pool: &DbPool, request: SignupRequest) -> AppResult<LoginResponse> {
    let password = SecretString::from(request.password);

    validate_profile(&request.username, &request.email)?;
    if password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let password_hash = credentials::hash_password_blocking(password).await?;
    let user = pool
        .insert_user(&request.username, &request.email, &password_hash)
        .await?;

    tracing::info!(user_id = %user.id, "User signed up");

    issue_token(pool, user).await
}

/// Exchange a username and password for a fresh token.
pub async fn login(pool: &DbPool, request: LoginRequest) -> AppResult<LoginResponse> {
    let password = SecretString::from(request.password);

    let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

    let user = pool
        .find_user_by_username(&request.username)
        .await?
        .ok_or_else(invalid)?;
    if !credentials::verify_password_blocking(password, user.password_hash.clone()).await? {
        return Err(invalid());
    }

    tracing::info!(user_id = %user.id, "User logged in");

    issue_token(pool, user).await
}

/// Resolve a presented token to its user.
pub async fn authenticate(pool: &DbPool, token: &SecretString) -> AppResult<AuthenticatedUser> {
    let user = pool
        .find_user_by_token_hash(&credentials::hash_token(token.expose_secret()))
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid API token".to_string()))?;

    Ok(AuthenticatedUser {
        id: user.id,
        username: user.username,
    })
}

/// Current profile of a user.
pub async fn get_profile(pool: &DbPool, user_id: Uuid) -> AppResult<UserResponse> {
    pool.get_user_by_id(user_id)
        .await?
        .map(UserResponse::from)
        .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))
}

/// Change a user's username and email.
pub async fn update_profile(
    pool: &DbPool,
    user_id: Uuid,
    request: UpdateProfileRequest,
) -> AppResult<UserResponse> {
    validate_profile(&request.username, &request.email)?;

    let user = pool
        .update_user_profile(user_id, &request.username, &request.email)
        .await?;

    Ok(user.into())
}

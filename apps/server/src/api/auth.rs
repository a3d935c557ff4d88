//! Signup, login, and profile handlers.

use actix_web::{HttpResponse, web};

use crate::auth::CurrentUser;
use crate::db::DbPool;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{LoginRequest, LoginResponse, SignupRequest, UpdateProfileRequest, UserResponse};
use crate::services::identity;

/// Create an account and receive an API token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username taken", body = ErrorResponse),
    )
)]
pub async fn signup(
    pool: web::Data<DbPool>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let response = identity::signup(pool.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// Exchange credentials for a new API token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
    )
)]
pub async fn login(
    pool: web::Data<DbPool>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let response = identity::login(pool.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Current user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn get_me(user: CurrentUser, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let profile = identity::get_profile(pool.get_ref(), user.id()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Update the current user's username and email.
#[utoipa::path(
    put,
    path = "/api/v1/auth/me",
    tag = "Auth",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Username taken", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn update_me(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let profile = identity::update_profile(pool.get_ref(), user.id(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/auth/signup").route(web::post().to(signup)))
        .service(web::resource("/auth/login").route(web::post().to(login)))
        .service(
            web::resource("/auth/me")
                .route(web::get().to(get_me))
                .route(web::put().to(update_me)),
        );
}

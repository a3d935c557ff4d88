//! Actix-web extractor for API token authentication.
//!
//! The presented token is wrapped in `SecretString` as soon as it is read,
//! so it never reaches logs or debug output. Only its SHA-256 hash is
//! compared against the store.

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use futures_util::future::LocalBoxFuture;
use secrecy::SecretString;

use crate::config::API_KEY_HEADER;
use crate::db::DbPool;
use crate::error::{AppError, ErrorResponse};
use crate::models::AuthenticatedUser;
use crate::services::identity;

/// Extract a secret header value, wrapping it in SecretString.
/// Returns None if the header is missing or invalid UTF-8.
fn extract_secret_header(req: &HttpRequest, header_name: &str) -> Option<SecretString> {
    req.headers()
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(|s| SecretString::from(s.trim().to_string()))
}

/// Authentication error for extractors.
#[derive(Debug)]
pub struct AuthError {
    status: StatusCode,
    message: String,
}

impl AuthError {
    fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Unauthorized(message) => Self::unauthorized(message),
            other => {
                tracing::error!("Token lookup failed: {}", other);
                Self::internal("Authentication is temporarily unavailable")
            }
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        let error = if self.status == StatusCode::UNAUTHORIZED {
            "UNAUTHORIZED"
        } else {
            "INTERNAL_ERROR"
        };
        HttpResponse::build(self.status).json(ErrorResponse {
            error: error.to_string(),
            message: self.message.clone(),
        })
    }
}

/// Extractor that requires a valid API token.
///
/// ```ignore
/// async fn protected_handler(user: CurrentUser) -> impl Responder {
///     // user.0.id scopes every query
/// }
/// ```
pub struct CurrentUser(pub AuthenticatedUser);

impl CurrentUser {
    pub fn id(&self) -> uuid::Uuid {
        self.0.id
    }
}

impl FromRequest for CurrentUser {
    type Error = AuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let token = extract_secret_header(req, API_KEY_HEADER);

        Box::pin(async move {
            let pool = pool.ok_or_else(|| AuthError::internal("Internal configuration error"))?;
            let token = token.ok_or_else(|| {
                AuthError::unauthorized(format!(
                    "Missing API token. Provide {} header.",
                    API_KEY_HEADER
                ))
            })?;

            let user = identity::authenticate(pool.get_ref(), &token).await?;
            Ok(CurrentUser(user))
        })
    }
}

//! Activity feed handler.

use actix_web::{HttpResponse, web};

use crate::auth::CurrentUser;
use crate::db::DbPool;
use crate::error::{AppResult, ErrorResponse};
use crate::models::Activity;
use crate::services::activity;

/// The current user's most recent activity, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/activities",
    tag = "Activity",
    responses(
        (status = 200, description = "Up to 20 most recent entries", body = Vec<Activity>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn list_activities(user: CurrentUser, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let entries = activity::list(pool.get_ref(), user.id()).await?;
    Ok(HttpResponse::Ok().json(entries))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/activities").route(web::get().to(list_activities)));
}

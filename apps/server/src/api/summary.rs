//! Dashboard summary handler.

use actix_web::{HttpResponse, web};

use crate::auth::CurrentUser;
use crate::db::DbPool;
use crate::error::{AppResult, ErrorResponse};
use crate::models::SummaryStats;
use crate::services::summary;

/// Totals across all of the current user's projects.
#[utoipa::path(
    get,
    path = "/api/v1/summary",
    tag = "Summary",
    responses(
        (status = 200, description = "Dashboard totals", body = SummaryStats),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn get_summary(user: CurrentUser, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let stats = summary::user_summary(pool.get_ref(), user.id()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/summary").route(web::get().to(get_summary)));
}

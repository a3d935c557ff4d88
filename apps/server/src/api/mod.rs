//! API endpoint modules.

pub mod activities;
pub mod auth;
pub mod health;
pub mod openapi;
pub mod projects;
pub mod summary;
pub mod test_cases;
pub mod test_runs;

use actix_web::web;

use crate::error::AppError;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;

/// Register every versioned API route. Mount under `/api/v1`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(auth::configure_routes)
        .configure(projects::configure_routes)
        .configure(test_cases::configure_routes)
        .configure(test_runs::configure_routes)
        .configure(activities::configure_routes)
        .configure(summary::configure_routes);
}

/// Extractor settings that report malformed bodies, paths, and queries in
/// the same `{error, message}` shape as every other failure.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::InvalidInput(format!("Malformed JSON body: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::InvalidInput(format!("Malformed path: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::InvalidInput(format!("Malformed query: {}", err)).into()
    }));
}

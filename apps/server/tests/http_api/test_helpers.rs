//! Shared test helpers for HTTP API tests.

use actix_web::{App, dev::ServiceResponse, test, web};
use serde_json::{Value, json};
use testcase_tracker_lib::api;
use testcase_tracker_lib::config::{API_KEY_HEADER, DatabaseConfig};
use testcase_tracker_lib::db::DbPool;
use testcase_tracker_lib::middleware::RequestLogger;

/// Fresh, migrated in-memory database.
pub async fn create_test_pool() -> DbPool {
    let settings = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 10,
    };

    let pool = DbPool::connect(&settings)
        .await
        .expect("Failed to connect to in-memory database");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    pool
}

/// Create a test app with the same routing as the server binary.
pub async fn create_test_app(
    pool: &DbPool,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(RequestLogger)
            .app_data(web::Data::new(pool.clone()))
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_extractors)
                    .configure(api::configure_routes),
            ),
    )
    .await
}

/// Send a request and return status plus JSON body (`Null` when empty).
pub async fn send<S>(
    app: &S,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let mut req = match method {
        "GET" => test::TestRequest::get(),
        "POST" => test::TestRequest::post(),
        "PUT" => test::TestRequest::put(),
        "DELETE" => test::TestRequest::delete(),
        other => panic!("unsupported method {}", other),
    }
    .uri(uri);

    if let Some(token) = token {
        req = req.insert_header((API_KEY_HEADER, token));
    }
    if let Some(body) = body {
        req = req.set_json(body);
    }

    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status().as_u16();
    let bytes = test::read_body(resp).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    (status, body)
}

/// Sign up a user and return their token.
pub async fn signup<S>(app: &S, username: &str) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "correct horse",
        })),
    )
    .await;
    assert_eq!(status, 201, "Signup failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

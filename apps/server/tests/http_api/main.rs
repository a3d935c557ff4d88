//! HTTP API test suite.
//!
//! Drives the full route table through `actix_web::test` against an
//! in-memory SQLite database.
//!
//! Run with: cargo test --test http_api

mod test_helpers;

mod test_auth;

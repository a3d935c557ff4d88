//! Test case tracker server library.
//!
//! Projects, versioned test cases, test runs with per-entry outcomes, a
//! bounded activity log, and dashboard aggregates, served over actix-web
//! and stored through SeaORM.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;

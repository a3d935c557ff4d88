//! Shared test helpers for engine tests.

use testcase_tracker_lib::config::DatabaseConfig;
use testcase_tracker_lib::db::DbPool;
use testcase_tracker_lib::models::{
    CreateTestRunRequest, Priority, ProjectRequest, TestCase, TestCaseData, TestCaseStatus,
    TestRunDetail,
};
use testcase_tracker_lib::services::{projects, test_cases, test_runs};
use uuid::Uuid;

/// Fresh, migrated in-memory database.
///
/// A single connection keeps every query on the same SQLite memory database.
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

/// Insert a user directly, skipping password hashing.
pub async fn create_user(pool: &DbPool, username: &str) -> Uuid {
    pool.insert_user(username, &format!("{}@example.com", username), "unused-hash")
        .await
        .expect("Failed to insert user")
        .id
}

pub async fn create_project(pool: &DbPool, user_id: Uuid, name: &str) -> Uuid {
    projects::create_project(
        pool,
        user_id,
        ProjectRequest {
            name: name.to_string(),
            description: String::new(),
        },
    )
    .await
    .expect("Failed to create project")
    .id
}

pub fn data(title: &str, priority: Priority, status: TestCaseStatus) -> TestCaseData {
    TestCaseData {
        title: title.to_string(),
        description: format!("Steps for {}", title),
        priority,
        status,
    }
}

pub async fn create_case(
    pool: &DbPool,
    user_id: Uuid,
    project_id: Uuid,
    title: &str,
) -> TestCase {
    test_cases::create_test_case(
        pool,
        user_id,
        project_id,
        data(title, Priority::Medium, TestCaseStatus::NotStarted),
    )
    .await
    .expect("Failed to create test case")
}

pub async fn create_run(
    pool: &DbPool,
    user_id: Uuid,
    project_id: Uuid,
    test_case_ids: Vec<Uuid>,
) -> TestRunDetail {
    test_runs::create_test_run(
        pool,
        user_id,
        project_id,
        CreateTestRunRequest {
            name: "Regression".to_string(),
            tester: "Dana".to_string(),
            test_case_ids,
        },
    )
    .await
    .expect("Failed to create test run")
}

//! Test case listing filters and sort orders.

use testcase_tracker_lib::models::{ListTestCasesQuery, Priority, TestCaseSort, TestCaseStatus};
use testcase_tracker_lib::services::test_cases;
use uuid::Uuid;

use super::test_helpers::*;

async fn seeded() -> (testcase_tracker_lib::db::DbPool, Uuid, Uuid) {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;

    test_cases::bulk_create_test_cases(
        &pool,
        user,
        project,
        vec![
            data("Login with email", Priority::Low, TestCaseStatus::Completed),
            data("Reset password", Priority::High, TestCaseStatus::NotStarted),
            data("Checkout as guest", Priority::Medium, TestCaseStatus::Completed),
            data("Logout", Priority::High, TestCaseStatus::Failed),
        ],
    )
    .await
    .unwrap();

    (pool, user, project)
}

async fn titles(
    pool: &testcase_tracker_lib::db::DbPool,
    user: Uuid,
    project: Uuid,
    query: ListTestCasesQuery,
) -> Vec<String> {
    test_cases::list_test_cases(pool, user, project, &query)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.title)
        .collect()
}

#[actix_rt::test]
async fn test_default_order_is_newest_first() {
    let (pool, user, project) = seeded().await;

    let listed = titles(&pool, user, project, ListTestCasesQuery::default()).await;
    assert_eq!(
        listed,
        vec![
            "Logout",
            "Checkout as guest",
            "Reset password",
            "Login with email"
        ]
    );

    let oldest_first = titles(
        &pool,
        user,
        project,
        ListTestCasesQuery {
            sort: Some(TestCaseSort::CreatedAtAsc),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(oldest_first.first().map(String::as_str), Some("Login with email"));
}

#[actix_rt::test]
async fn test_filters_combine() {
    let (pool, user, project) = seeded().await;

    let completed = titles(
        &pool,
        user,
        project,
        ListTestCasesQuery {
            status: Some(TestCaseStatus::Completed),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(completed, vec!["Checkout as guest", "Login with email"]);

    let high_login = titles(
        &pool,
        user,
        project,
        ListTestCasesQuery {
            priority: Some(Priority::High),
            search: Some("LOG".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(high_login, vec!["Logout"]);
}

#[actix_rt::test]
async fn test_priority_sort_keeps_newest_first_ties() {
    let (pool, user, project) = seeded().await;

    let listed = titles(
        &pool,
        user,
        project,
        ListTestCasesQuery {
            sort: Some(TestCaseSort::PriorityDesc),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(
        listed,
        vec![
            "Logout",
            "Reset password",
            "Checkout as guest",
            "Login with email"
        ]
    );
}

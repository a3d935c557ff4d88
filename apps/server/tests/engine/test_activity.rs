//! Activity recorder: bounded per-user log, newest first.

use sea_orm::ConnectionTrait;
use testcase_tracker_lib::models::{CreateTestRunRequest, Priority, ProjectRequest, TestCaseStatus};
use testcase_tracker_lib::services::{
    ACTIVITY_LOG_CAPACITY, ActivityEvent, activity, projects, test_cases, test_runs,
};

use super::test_helpers::*;

#[actix_rt::test]
async fn test_log_keeps_last_twenty_newest_first() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;

    for i in 1..=25 {
        activity::record(
            &pool,
            user,
            ActivityEvent::ProjectCreated {
                name: format!("p{}", i),
            },
        )
        .await
        .unwrap();
    }

    let entries = activity::list(&pool, user).await.unwrap();
    assert_eq!(entries.len(), ACTIVITY_LOG_CAPACITY as usize);

    let expected: Vec<String> = (6..=25)
        .rev()
        .map(|i| format!("Created project \"p{}\".", i))
        .collect();
    let messages: Vec<String> = entries.into_iter().map(|e| e.message).collect();
    assert_eq!(messages, expected);

    // Evicted rows are gone from the store, not just hidden by the limit.
    let stored = pool.list_activities(user, 100).await.unwrap();
    assert_eq!(stored.len(), 20);
}

#[actix_rt::test]
async fn test_logs_are_per_user() {
    let pool = create_test_pool().await;
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    create_project(&pool, alice, "Checkout").await;
    create_project(&pool, bob, "Search").await;
    create_project(&pool, bob, "Billing").await;

    assert_eq!(activity::list(&pool, alice).await.unwrap().len(), 1);
    let bob_log = activity::list(&pool, bob).await.unwrap();
    assert_eq!(bob_log.len(), 2);
    assert_eq!(bob_log[0].message, "Created project \"Billing\".");
}

#[actix_rt::test]
async fn test_mutations_record_messages() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let case = create_case(&pool, user, project, "Pay").await;

    test_cases::update_test_case(
        &pool,
        user,
        case.id,
        data("Pay twice", Priority::High, TestCaseStatus::InProgress),
    )
    .await
    .unwrap();
    test_cases::bulk_create_test_cases(
        &pool,
        user,
        project,
        vec![
            data("Refund", Priority::Low, TestCaseStatus::NotStarted),
            data("Void", Priority::Low, TestCaseStatus::NotStarted),
        ],
    )
    .await
    .unwrap();
    create_run(&pool, user, project, vec![case.id]).await;
    test_cases::delete_test_case(&pool, user, case.id)
        .await
        .unwrap();

    let messages: Vec<String> = activity::list(&pool, user)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.message)
        .collect();
    assert_eq!(
        messages,
        vec![
            "Deleted test case \"Pay twice\".",
            "Created test run \"Regression\".",
            "Added 2 new test cases.",
            "Updated test case \"Pay twice\".",
            "Added test case \"Pay\".",
            "Created project \"Checkout\".",
        ]
    );
}

#[actix_rt::test]
async fn test_failed_mutations_record_nothing() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;

    assert!(
        projects::create_project(
            &pool,
            user,
            ProjectRequest {
                name: "   ".to_string(),
                description: String::new(),
            },
        )
        .await
        .is_err()
    );
    assert!(
        test_cases::create_test_case(
            &pool,
            user,
            project,
            data("", Priority::Low, TestCaseStatus::NotStarted),
        )
        .await
        .is_err()
    );
    assert!(
        test_cases::bulk_create_test_cases(
            &pool,
            user,
            project,
            vec![
                data("Fine", Priority::Low, TestCaseStatus::NotStarted),
                data(" ", Priority::Low, TestCaseStatus::NotStarted),
            ],
        )
        .await
        .is_err()
    );

    let log = activity::list(&pool, user).await.unwrap();
    assert_eq!(log.len(), 1);
    assert!(
        test_cases::list_test_cases(&pool, user, project, &Default::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[actix_rt::test]
async fn test_mutation_is_undone_when_its_activity_cannot_be_written() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let case = create_case(&pool, user, project, "v1").await;

    pool.connection()
        .execute_unprepared("DROP TABLE activity_logs")
        .await
        .expect("Failed to drop activity table");

    let result = test_cases::update_test_case(
        &pool,
        user,
        case.id,
        data("v2", Priority::High, TestCaseStatus::Completed),
    )
    .await;
    assert!(result.is_err());

    let live = test_cases::get_test_case(&pool, user, case.id).await.unwrap();
    assert_eq!(live.version, 1);
    assert_eq!(live.title, "v1");
    let history = test_cases::list_version_history(&pool, user, case.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);

    let run = test_runs::create_test_run(
        &pool,
        user,
        project,
        CreateTestRunRequest {
            name: "Nightly".to_string(),
            tester: "Dana".to_string(),
            test_case_ids: vec![case.id],
        },
    )
    .await;
    assert!(run.is_err());
    assert!(test_runs::list_test_runs(&pool, user, project).await.unwrap().is_empty());

    assert!(test_cases::delete_test_case(&pool, user, case.id).await.is_err());
    assert!(projects::delete_project(&pool, user, project).await.is_err());
    assert!(test_cases::get_test_case(&pool, user, case.id).await.is_ok());
    assert!(projects::get_project(&pool, user, project).await.is_ok());
}

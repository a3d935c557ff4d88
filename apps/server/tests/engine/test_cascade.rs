//! Project deletion cascade.

use testcase_tracker_lib::error::AppError;
use testcase_tracker_lib::models::{Priority, TestCaseStatus};
use testcase_tracker_lib::services::{projects, test_cases, test_runs};

use super::test_helpers::*;

#[actix_rt::test]
async fn test_project_delete_removes_everything_scoped_to_it() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let survivor_project = create_project(&pool, user, "Search").await;

    let a = create_case(&pool, user, project, "A").await;
    let b = create_case(&pool, user, project, "B").await;
    for case in [&a, &b] {
        test_cases::update_test_case(
            &pool,
            user,
            case.id,
            data("edited", Priority::High, TestCaseStatus::InProgress),
        )
        .await
        .unwrap();
    }
    let run = create_run(&pool, user, project, vec![a.id, b.id]).await;
    assert_eq!(run.entries.len(), 2);

    let survivor = create_case(&pool, user, survivor_project, "Survivor").await;

    projects::delete_project(&pool, user, project).await.unwrap();

    assert!(pool.get_project(user, project).await.unwrap().is_none());
    for case in [&a, &b] {
        assert!(pool.get_test_case(case.id).await.unwrap().is_none());
        assert!(pool.list_test_case_versions(case.id).await.unwrap().is_empty());
    }
    assert!(pool.get_test_run(run.run.id).await.unwrap().is_none());
    assert!(pool.list_test_run_entries(run.run.id).await.unwrap().is_empty());
    for entry in &run.entries {
        assert!(pool.get_test_run_entry(entry.id).await.unwrap().is_none());
    }

    let err = test_cases::get_test_case(&pool, user, a.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = test_runs::get_test_run(&pool, user, run.run.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert!(pool.get_test_case(survivor.id).await.unwrap().is_some());
}

#[actix_rt::test]
async fn test_project_delete_is_idempotent_and_owner_scoped() {
    let pool = create_test_pool().await;
    let owner = create_user(&pool, "alice").await;
    let other = create_user(&pool, "bob").await;
    let project = create_project(&pool, owner, "Checkout").await;

    let err = projects::delete_project(&pool, other, project)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(pool.get_project(owner, project).await.unwrap().is_some());

    projects::delete_project(&pool, owner, project).await.unwrap();
    projects::delete_project(&pool, owner, project).await.unwrap();
    assert!(pool.get_project(owner, project).await.unwrap().is_none());
}

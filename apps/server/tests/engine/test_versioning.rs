//! Versioning engine: edits, history, rollback, and deletion.

use testcase_tracker_lib::error::AppError;
use testcase_tracker_lib::models::{Priority, TestCaseStatus};
use testcase_tracker_lib::services::{activity, test_cases};
use uuid::Uuid;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_create_starts_at_version_one_without_snapshot() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;

    let case = create_case(&pool, user, project, "Pay with card").await;
    assert_eq!(case.version, 1);
    assert_eq!(case.created_at, case.updated_at);

    assert!(pool.list_test_case_versions(case.id).await.unwrap().is_empty());

    let history = test_cases::list_version_history(&pool, user, case.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert!(history[0].is_current);
    assert_eq!(history[0].version, 1);
}

#[actix_rt::test]
async fn test_n_updates_yield_n_plus_one_history_records() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let case = create_case(&pool, user, project, "v1").await;

    let updates = 4;
    for n in 2..=updates + 1 {
        let updated = test_cases::update_test_case(
            &pool,
            user,
            case.id,
            data(&format!("v{}", n), Priority::High, TestCaseStatus::InProgress),
        )
        .await
        .unwrap();
        assert_eq!(updated.version, n);
    }

    let history = test_cases::list_version_history(&pool, user, case.id)
        .await
        .unwrap();
    assert_eq!(history.len(), updates as usize + 1);

    let versions: Vec<i32> = history.iter().map(|h| h.version).collect();
    assert_eq!(versions, vec![5, 4, 3, 2, 1]);

    // Every record carries the content it had at that version.
    for record in &history {
        assert_eq!(record.data.title, format!("v{}", record.version));
    }
    assert!(history[0].is_current);
    assert_eq!(history.iter().filter(|h| h.is_current).count(), 1);
}

#[actix_rt::test]
async fn test_snapshot_captures_outgoing_state() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let original = create_case(&pool, user, project, "Original").await;

    let updated = test_cases::update_test_case(
        &pool,
        user,
        original.id,
        data("Edited", Priority::Low, TestCaseStatus::Completed),
    )
    .await
    .unwrap();
    assert!(updated.updated_at >= original.updated_at);

    let snapshots = pool.list_test_case_versions(original.id).await.unwrap();
    assert_eq!(snapshots.len(), 1);
    let snapshot = &snapshots[0];
    assert_eq!(snapshot.version, 1);
    assert_eq!(snapshot.title, "Original");
    assert_eq!(snapshot.priority, Priority::Medium);
    assert_eq!(snapshot.status, TestCaseStatus::NotStarted);
    assert_eq!(snapshot.changed_at, original.updated_at);
}

#[actix_rt::test]
async fn test_rollback_is_additive() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;

    let d1 = data("Login succeeds", Priority::High, TestCaseStatus::NotStarted);
    let d2 = data("Login fails", Priority::Low, TestCaseStatus::Failed);

    let case = test_cases::create_test_case(&pool, user, project, d1.clone())
        .await
        .unwrap();
    test_cases::update_test_case(&pool, user, case.id, d2.clone())
        .await
        .unwrap();

    let v1 = pool
        .list_test_case_versions(case.id)
        .await
        .unwrap()
        .into_iter()
        .find(|v| v.version == 1)
        .unwrap();

    let rolled = test_cases::rollback_test_case(&pool, user, case.id, v1.id)
        .await
        .unwrap();
    assert_eq!(rolled.version, 3);
    assert_eq!(rolled.title, d1.title);
    assert_eq!(rolled.description, d1.description);
    assert_eq!(rolled.priority, d1.priority);
    assert_eq!(rolled.status, d1.status);

    let history = test_cases::list_version_history(&pool, user, case.id)
        .await
        .unwrap();
    let versions: Vec<i32> = history.iter().map(|h| h.version).collect();
    assert_eq!(versions, vec![3, 2, 1]);
    assert_eq!(history[1].data, d2);

    let activities = activity::list(&pool, user).await.unwrap();
    assert_eq!(
        activities[0].message,
        "Rolled back test case \"Login succeeds\" to version 1."
    );
}

#[actix_rt::test]
async fn test_rollback_rejects_foreign_or_unknown_versions() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let a = create_case(&pool, user, project, "A").await;
    let b = create_case(&pool, user, project, "B").await;

    test_cases::update_test_case(
        &pool,
        user,
        b.id,
        data("B2", Priority::Medium, TestCaseStatus::InProgress),
    )
    .await
    .unwrap();
    let b_snapshot = pool.list_test_case_versions(b.id).await.unwrap().remove(0);

    let err = test_cases::rollback_test_case(&pool, user, a.id, b_snapshot.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "{:?}", err);

    let err = test_cases::rollback_test_case(&pool, user, a.id, Uuid::now_v7())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = test_cases::rollback_test_case(&pool, user, Uuid::now_v7(), b_snapshot.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Nothing changed on A.
    let a_now = test_cases::get_test_case(&pool, user, a.id).await.unwrap();
    assert_eq!(a_now.version, 1);
}

#[actix_rt::test]
async fn test_update_unknown_or_invalid() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let case = create_case(&pool, user, project, "A").await;

    let err = test_cases::update_test_case(
        &pool,
        user,
        Uuid::now_v7(),
        data("X", Priority::Low, TestCaseStatus::NotStarted),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = test_cases::update_test_case(
        &pool,
        user,
        case.id,
        data("  ", Priority::Low, TestCaseStatus::NotStarted),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let unchanged = test_cases::get_test_case(&pool, user, case.id).await.unwrap();
    assert_eq!(unchanged.version, 1);
    assert!(pool.list_test_case_versions(case.id).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_other_users_cannot_see_or_edit() {
    let pool = create_test_pool().await;
    let owner = create_user(&pool, "alice").await;
    let intruder = create_user(&pool, "mallory").await;
    let project = create_project(&pool, owner, "Checkout").await;
    let case = create_case(&pool, owner, project, "Secret").await;

    let err = test_cases::get_test_case(&pool, intruder, case.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = test_cases::update_test_case(
        &pool,
        intruder,
        case.id,
        data("Hijacked", Priority::High, TestCaseStatus::Failed),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = test_cases::delete_test_case(&pool, intruder, case.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert!(pool.get_test_case(case.id).await.unwrap().is_some());
}

#[actix_rt::test]
async fn test_delete_is_idempotent_and_removes_history() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let case = create_case(&pool, user, project, "Doomed").await;
    let keep = create_case(&pool, user, project, "Kept").await;

    test_cases::update_test_case(
        &pool,
        user,
        case.id,
        data("Doomed v2", Priority::Low, TestCaseStatus::InProgress),
    )
    .await
    .unwrap();
    let run = create_run(&pool, user, project, vec![case.id, keep.id]).await;

    test_cases::delete_test_case(&pool, user, case.id)
        .await
        .unwrap();

    assert!(pool.get_test_case(case.id).await.unwrap().is_none());
    assert!(pool.list_test_case_versions(case.id).await.unwrap().is_empty());

    let entries = pool.list_test_run_entries(run.run.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].test_case_id, keep.id);

    // Second delete is a no-op and records nothing new.
    let before = activity::list(&pool, user).await.unwrap().len();
    test_cases::delete_test_case(&pool, user, case.id)
        .await
        .unwrap();
    assert_eq!(activity::list(&pool, user).await.unwrap().len(), before);
}

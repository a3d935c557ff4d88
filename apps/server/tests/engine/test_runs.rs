//! Test run engine: run creation, entry order, and execution recording.

use testcase_tracker_lib::error::AppError;
use testcase_tracker_lib::models::{
    CreateTestRunRequest, ExecutionStatus, RecordExecutionRequest, TestRunStatus,
};
use testcase_tracker_lib::services::{test_cases, test_runs};
use uuid::Uuid;

use super::test_helpers::*;

fn outcome(status: ExecutionStatus, comments: &str) -> RecordExecutionRequest {
    RecordExecutionRequest {
        status,
        comments: comments.to_string(),
    }
}

#[actix_rt::test]
async fn test_duplicate_ids_collapse_to_one_entry() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let a = create_case(&pool, user, project, "A").await;
    let b = create_case(&pool, user, project, "B").await;

    let detail = create_run(&pool, user, project, vec![a.id, a.id, b.id]).await;

    assert_eq!(detail.run.status, TestRunStatus::InProgress);
    assert_eq!(detail.entries.len(), 2);
    assert!(
        detail
            .entries
            .iter()
            .all(|e| e.status == ExecutionStatus::NotRun && e.executed_at.is_none())
    );
    assert!(detail.entries.iter().all(|e| e.comments.is_empty()));
    assert_eq!(detail.progress.total, 2);
    assert_eq!(detail.progress.not_run, 2);
}

#[actix_rt::test]
async fn test_entries_follow_selection_order() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let a = create_case(&pool, user, project, "A").await;
    let b = create_case(&pool, user, project, "B").await;
    let c = create_case(&pool, user, project, "C").await;

    let detail = create_run(&pool, user, project, vec![c.id, a.id, c.id, b.id]).await;

    let entries = test_runs::list_entries(&pool, user, detail.run.id)
        .await
        .unwrap();
    let order: Vec<Uuid> = entries.iter().map(|e| e.test_case_id).collect();
    assert_eq!(order, vec![c.id, a.id, b.id]);
}

#[actix_rt::test]
async fn test_create_run_validation_commits_nothing() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let other_project = create_project(&pool, user, "Search").await;
    let mine = create_case(&pool, user, project, "Mine").await;
    let elsewhere = create_case(&pool, user, other_project, "Elsewhere").await;

    let request = |name: &str, tester: &str, ids: Vec<Uuid>| CreateTestRunRequest {
        name: name.to_string(),
        tester: tester.to_string(),
        test_case_ids: ids,
    };

    let cases = [
        request("", "Dana", vec![mine.id]),
        request("Nightly", " ", vec![mine.id]),
        request("Nightly", "Dana", vec![]),
        request("Nightly", "Dana", vec![mine.id, elsewhere.id]),
        request("Nightly", "Dana", vec![mine.id, Uuid::now_v7()]),
    ];

    for req in cases {
        let err = test_runs::create_test_run(&pool, user, project, req)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)), "{:?}", err);
    }

    assert!(
        test_runs::list_test_runs(&pool, user, project)
            .await
            .unwrap()
            .is_empty()
    );
}

#[actix_rt::test]
async fn test_record_execution_never_touches_the_test_case() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let case = create_case(&pool, user, project, "Pay").await;
    let before = test_cases::get_test_case(&pool, user, case.id).await.unwrap();

    let detail = create_run(&pool, user, project, vec![case.id]).await;
    let entry_id = detail.entries[0].id;

    for status in [
        ExecutionStatus::Failed,
        ExecutionStatus::Blocked,
        ExecutionStatus::Passed,
    ] {
        let entry = test_runs::record_execution(&pool, user, entry_id, outcome(status, "ok"))
            .await
            .unwrap();
        assert_eq!(entry.status, status);
        assert!(entry.executed_at.is_some());
    }

    let after = test_cases::get_test_case(&pool, user, case.id).await.unwrap();
    assert_eq!(after.status, before.status);
    assert_eq!(after.version, before.version);
    assert_eq!(after.updated_at, before.updated_at);
    assert!(pool.list_test_case_versions(case.id).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_executed_at_is_never_cleared() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let case = create_case(&pool, user, project, "Pay").await;
    let detail = create_run(&pool, user, project, vec![case.id]).await;
    let entry_id = detail.entries[0].id;

    let first = test_runs::record_execution(
        &pool,
        user,
        entry_id,
        outcome(ExecutionStatus::Failed, "500 on submit"),
    )
    .await
    .unwrap();

    let reset = test_runs::record_execution(
        &pool,
        user,
        entry_id,
        outcome(ExecutionStatus::NotRun, "retest later"),
    )
    .await
    .unwrap();

    assert_eq!(reset.status, ExecutionStatus::NotRun);
    assert_eq!(reset.comments, "retest later");
    let stamped = reset.executed_at.expect("executed_at stays set");
    assert!(stamped >= first.executed_at.unwrap());
}

#[actix_rt::test]
async fn test_record_execution_unknown_entry() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;

    let err = test_runs::record_execution(
        &pool,
        user,
        Uuid::now_v7(),
        outcome(ExecutionStatus::Passed, ""),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn test_run_status_is_manual() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let case = create_case(&pool, user, project, "Pay").await;
    let detail = create_run(&pool, user, project, vec![case.id]).await;

    test_runs::record_execution(
        &pool,
        user,
        detail.entries[0].id,
        outcome(ExecutionStatus::Passed, ""),
    )
    .await
    .unwrap();

    let run = test_runs::get_test_run(&pool, user, detail.run.id)
        .await
        .unwrap();
    assert_eq!(run.run.status, TestRunStatus::InProgress);
    assert_eq!(run.progress.passed, 1);
    assert_eq!(run.progress.executed(), 1);

    let completed =
        test_runs::update_test_run_status(&pool, user, detail.run.id, TestRunStatus::Completed)
            .await
            .unwrap();
    assert_eq!(completed.status, TestRunStatus::Completed);
}

#[actix_rt::test]
async fn test_list_runs_reports_progress() {
    let pool = create_test_pool().await;
    let user = create_user(&pool, "alice").await;
    let project = create_project(&pool, user, "Checkout").await;
    let a = create_case(&pool, user, project, "A").await;
    let b = create_case(&pool, user, project, "B").await;

    let first = create_run(&pool, user, project, vec![a.id, b.id]).await;
    let second = create_run(&pool, user, project, vec![b.id]).await;

    test_runs::record_execution(
        &pool,
        user,
        first.entries[1].id,
        outcome(ExecutionStatus::Blocked, "env down"),
    )
    .await
    .unwrap();

    let runs = test_runs::list_test_runs(&pool, user, project).await.unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].run.id, second.run.id);
    assert_eq!(runs[0].progress.total, 1);
    assert_eq!(runs[1].progress.total, 2);
    assert_eq!(runs[1].progress.blocked, 1);
    assert_eq!(runs[1].progress.not_run, 1);
}

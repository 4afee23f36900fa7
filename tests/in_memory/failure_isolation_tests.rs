//! Failures degrade to the previous or empty state plus a notice, and never
//! leak between the task and metrics views.

use rstest::{fixture, rstest};
use taskboard::client::ServiceError;
use taskboard::task::{
    adapters::memory::ServiceOperation,
    domain::{NewTaskForm, TaskId, TaskRecord},
    ports::MutationKind,
    services::MutationError,
};
use taskboard::view::RefreshOutcome;

use crate::test_helpers::TestBoard;

#[fixture]
fn seeded_board() -> TestBoard {
    let board = TestBoard::new();
    board
        .seed(vec![
            TaskRecord::new(1_u64, "Plan", "2024-01-01 10:00"),
            TaskRecord::new(2_u64, "Write", "2024-01-01 11:00"),
        ])
        .expect("seed board");
    board
}

fn unavailable() -> ServiceError {
    ServiceError::Status {
        status: 503,
        message: "Service Unavailable".to_owned(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_delete_restores_the_task_with_one_notice(
    seeded_board: TestBoard,
) -> eyre::Result<()> {
    seeded_board
        .controls
        .fail(ServiceOperation::DeleteTask, unavailable());

    let result = seeded_board.orchestrator.delete(&TaskId::from(1_u64)).await;

    eyre::ensure!(matches!(result, Err(MutationError::Service(_))));
    eyre::ensure!(seeded_board.ids() == vec!["1".to_owned(), "2".to_owned()]);
    let notices = seeded_board.notices.notices();
    eyre::ensure!(notices.len() == 1, "expected one notice, got {notices:?}");
    eyre::ensure!(notices.iter().all(|notice| notice.kind == MutationKind::Delete));
    eyre::ensure!(seeded_board.refetches().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn metrics_failure_does_not_touch_the_task_list(
    seeded_board: TestBoard,
) -> eyre::Result<()> {
    seeded_board.metrics_view.fetch_metrics().await;
    seeded_board
        .controls
        .fail(ServiceOperation::FetchMetrics, unavailable());

    let created = seeded_board
        .orchestrator
        .add(&NewTaskForm::new("Read", "2024-01-01T12:00", "60"))
        .await?;

    eyre::ensure!(seeded_board.store.contains(&created.id));
    eyre::ensure!(seeded_board.store.len() == 3);
    eyre::ensure!(
        seeded_board.metrics_view.snapshot().len() == 3,
        "previous metrics stay on display"
    );
    eyre::ensure!(seeded_board.notices.is_empty(), "refresh failures are only logged");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_refetch_failure_keeps_the_optimistic_record(
    seeded_board: TestBoard,
) -> eyre::Result<()> {
    seeded_board
        .controls
        .fail(ServiceOperation::ListTasks, unavailable());

    let created = seeded_board
        .orchestrator
        .add(&NewTaskForm::new("Read", "2024-01-01T12:00", "60"))
        .await?;

    eyre::ensure!(seeded_board.ids().first() == Some(&created.id.to_string()));
    eyre::ensure!(seeded_board.count(ServiceOperation::FetchMetrics) == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn initial_load_survives_a_failing_task_list(seeded_board: TestBoard) -> eyre::Result<()> {
    seeded_board
        .controls
        .fail(ServiceOperation::ListTasks, unavailable());

    seeded_board.orchestrator.initial_load().await;

    eyre::ensure!(seeded_board.store.len() == 2, "previous list stays on display");
    eyre::ensure!(seeded_board.metrics_view.snapshot().len() == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn service_rejection_of_add_changes_nothing(seeded_board: TestBoard) -> eyre::Result<()> {
    let result = seeded_board
        .orchestrator
        .add(&NewTaskForm::new("Read", "someday", "60"))
        .await;

    eyre::ensure!(matches!(
        result,
        Err(MutationError::Service(ServiceError::Status { status: 400, .. }))
    ));
    eyre::ensure!(seeded_board.store.len() == 2);
    eyre::ensure!(seeded_board.notices.len() == 1);
    eyre::ensure!(seeded_board.refetches().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn detached_views_ignore_late_responses(seeded_board: TestBoard) -> eyre::Result<()> {
    seeded_board.controls.hold(ServiceOperation::ListTasks);
    seeded_board.controls.hold(ServiceOperation::FetchMetrics);
    let revision = seeded_board.store.revision();

    let ((task_outcome, metrics_outcome), ()) = tokio::join!(
        async {
            tokio::join!(
                seeded_board.task_view.refresh_tasks(),
                seeded_board.metrics_view.fetch_metrics()
            )
        },
        async {
            seeded_board.store.replace_all(Vec::new());
            seeded_board.store.detach();
            seeded_board.metrics_view.detach();
            seeded_board.controls.release(ServiceOperation::ListTasks);
            seeded_board.controls.release(ServiceOperation::FetchMetrics);
        }
    );

    eyre::ensure!(matches!(task_outcome, RefreshOutcome::Discarded));
    eyre::ensure!(matches!(metrics_outcome, RefreshOutcome::Discarded));
    eyre::ensure!(seeded_board.store.is_empty());
    eyre::ensure!(seeded_board.store.revision() == revision + 1);
    eyre::ensure!(seeded_board.metrics_view.snapshot().is_empty());
    Ok(())
}

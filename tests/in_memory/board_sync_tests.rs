//! Mutation sequencing across the task list and the metrics view.

use std::time::Duration;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use taskboard::metrics::domain::Algorithm;
use taskboard::task::adapters::memory::ServiceOperation;
use taskboard::task::domain::{NewTaskForm, TaskId, TaskRecord, TaskStatus};

use crate::test_helpers::{TestBoard, wait_for};

#[fixture]
fn board() -> TestBoard {
    TestBoard::new()
}

#[fixture]
fn seeded_board() -> TestBoard {
    let board = TestBoard::new();
    board
        .seed(vec![
            TaskRecord::new(1_u64, "Plan", "2024-01-01 10:00").with_duration(30),
            TaskRecord::new(2_u64, "Write", "2024-01-01 11:00").with_duration(60),
        ])
        .expect("seed board");
    board
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_is_visible_at_once_and_refreshes_metrics_once(board: TestBoard) -> eyre::Result<()> {
    board.controls.hold(ServiceOperation::ListTasks);
    let form = NewTaskForm::new("Read", "2024-01-01T10:00", "1800");

    let (result, names_during_refetch) = tokio::join!(board.orchestrator.add(&form), async {
        let waited = wait_for(|| board.count(ServiceOperation::ListTasks) == 1).await;
        let names: Vec<String> = board
            .store
            .snapshot()
            .into_iter()
            .map(|record| record.name)
            .collect();
        board.controls.release(ServiceOperation::ListTasks);
        waited.map(|()| names)
    });

    let created = result?;
    eyre::ensure!(names_during_refetch? == vec!["Read".to_owned()]);
    eyre::ensure!(board.ids() == vec![created.id.to_string()]);
    eyre::ensure!(
        board.refetches() == vec![ServiceOperation::ListTasks, ServiceOperation::FetchMetrics],
        "expected one task refetch followed by one metrics refetch, got {:?}",
        board.refetches()
    );
    eyre::ensure!(board.metrics_view.snapshot().len() == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_done_relabels_after_the_refetch(seeded_board: TestBoard) -> eyre::Result<()> {
    let id = TaskId::from(1_u64);
    let status_of = |board: &TestBoard| {
        board
            .store
            .rows(&DefaultClock)
            .into_iter()
            .find(|row| row.record.id == id)
            .map(|row| row.status.status)
    };
    eyre::ensure!(
        matches!(
            status_of(&seeded_board),
            Some(TaskStatus::Scheduled | TaskStatus::Overdue)
        ),
        "seeded task should start out scheduled"
    );

    seeded_board.orchestrator.mark_done(&id).await?;

    eyre::ensure!(status_of(&seeded_board) == Some(TaskStatus::Done));
    eyre::ensure!(
        seeded_board.refetches()
            == vec![ServiceOperation::ListTasks, ServiceOperation::FetchMetrics]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_hides_the_task_for_the_whole_round_trip(
    seeded_board: TestBoard,
) -> eyre::Result<()> {
    let id = TaskId::from(1_u64);
    seeded_board.controls.hold(ServiceOperation::DeleteTask);
    seeded_board
        .controls
        .delay_next(ServiceOperation::ListTasks, Duration::from_millis(20));

    let (result, observations) = tokio::join!(seeded_board.orchestrator.delete(&id), async {
        let mut seen = Vec::new();
        let waited =
            wait_for(|| seeded_board.count(ServiceOperation::DeleteTask) == 1).await;
        seen.push(seeded_board.store.contains(&id));
        seeded_board.controls.release(ServiceOperation::DeleteTask);
        let refetched = wait_for(|| seeded_board.count(ServiceOperation::ListTasks) == 1).await;
        seen.push(seeded_board.store.contains(&id));
        waited.and(refetched).map(|()| seen)
    });

    result?;
    eyre::ensure!(observations? == vec![false, false]);
    eyre::ensure!(!seeded_board.store.contains(&id));
    eyre::ensure!(seeded_board.ids() == vec!["2".to_owned()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rapid_deletes_stay_hidden_when_answered_out_of_order(
    seeded_board: TestBoard,
) -> eyre::Result<()> {
    seeded_board
        .controls
        .delay_next(ServiceOperation::DeleteTask, Duration::from_millis(300));
    seeded_board
        .controls
        .delay_next(ServiceOperation::DeleteTask, Duration::ZERO);
    let slow = TaskId::from(2_u64);
    let fast = TaskId::from(1_u64);

    let (slow_result, fast_result, mid_flight) = tokio::join!(
        seeded_board.orchestrator.delete(&slow),
        async {
            wait_for(|| seeded_board.count(ServiceOperation::DeleteTask) == 1).await?;
            seeded_board
                .orchestrator
                .delete(&fast)
                .await
                .map_err(eyre::Report::from)
        },
        async {
            wait_for(|| seeded_board.count(ServiceOperation::FetchMetrics) == 1).await?;
            Ok::<_, eyre::Report>(seeded_board.ids())
        }
    );

    slow_result?;
    fast_result?;
    let shown = mid_flight?;
    eyre::ensure!(
        shown.is_empty(),
        "task list showed {shown:?} while the slow delete was pending"
    );
    eyre::ensure!(seeded_board.store.is_empty());
    eyre::ensure!(seeded_board.count(ServiceOperation::ListTasks) == 2);
    eyre::ensure!(seeded_board.count(ServiceOperation::FetchMetrics) == 2);
    eyre::ensure!(seeded_board.notices.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_done_refetch_does_not_resurrect_a_pending_delete(
    seeded_board: TestBoard,
) -> eyre::Result<()> {
    let deleting = TaskId::from(2_u64);
    let finishing = TaskId::from(1_u64);
    seeded_board.controls.hold(ServiceOperation::DeleteTask);

    let (delete_result, observed) = tokio::join!(
        seeded_board.orchestrator.delete(&deleting),
        async {
            wait_for(|| seeded_board.count(ServiceOperation::DeleteTask) == 1).await?;
            seeded_board.orchestrator.mark_done(&finishing).await?;
            let shown = seeded_board.ids();
            seeded_board.controls.release(ServiceOperation::DeleteTask);
            Ok::<_, eyre::Report>(shown)
        }
    );

    delete_result?;
    eyre::ensure!(observed? == vec!["1".to_owned()]);
    eyre::ensure!(seeded_board.ids() == vec!["1".to_owned()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn initial_load_fills_both_views(seeded_board: TestBoard) -> eyre::Result<()> {
    seeded_board.store.replace_all(Vec::new());

    seeded_board.orchestrator.initial_load().await;

    eyre::ensure!(seeded_board.ids() == vec!["1".to_owned(), "2".to_owned()]);
    let order: Vec<Algorithm> = seeded_board
        .metrics_view
        .summaries()
        .into_iter()
        .map(|summary| summary.algo)
        .collect();
    eyre::ensure!(order == Algorithm::DISPLAY_ORDER.to_vec());
    eyre::ensure!(seeded_board.count(ServiceOperation::ListTasks) == 1);
    eyre::ensure!(seeded_board.count(ServiceOperation::FetchMetrics) == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn metrics_chart_is_shaped_for_rendering(board: TestBoard) -> eyre::Result<()> {
    board.metrics_view.fetch_metrics().await;

    let chart = board.metrics_view.chart(&Algorithm::Fcfs);

    eyre::ensure!(chart.labels == vec!["Task 1".to_owned(), "Task 2".to_owned()]);
    eyre::ensure!(chart.turnaround.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn service_side_execution_shows_after_refetch(seeded_board: TestBoard) -> eyre::Result<()> {
    let running = TaskId::from(1_u64);
    let finished = TaskId::from(2_u64);
    seeded_board
        .task_service
        .start_task(&running, "2024-01-01 10:00:05")
        .map_err(|err| eyre::eyre!("start task: {err}"))?;
    seeded_board
        .task_service
        .finish_task(&finished, "2024-01-01 11:01:00")
        .map_err(|err| eyre::eyre!("finish task: {err}"))?;

    seeded_board.task_view.refresh_tasks().await;

    let statuses: Vec<TaskStatus> = seeded_board
        .store
        .rows(&DefaultClock)
        .into_iter()
        .map(|row| row.status.status)
        .collect();
    eyre::ensure!(statuses == vec![TaskStatus::Running, TaskStatus::Done]);
    Ok(())
}

//! When steps for task board synchronisation scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::task::{
    adapters::memory::ServiceOperation,
    domain::{NewTaskForm, TaskId},
};

use crate::test_helpers::wait_for;

#[when(r#"the user adds a task named "{name}" at "{scheduled}" lasting "{duration}" seconds"#)]
fn user_adds_task(world: &mut BoardWorld, name: String, scheduled: String, duration: String) {
    let form = NewTaskForm::new(name, scheduled, duration);
    let result = run_async(world.board.orchestrator.add(&form));
    world.last_results = vec![result.map(|_created| ())];
}

#[when("the user marks task {id:u64} as done")]
fn user_marks_done(world: &mut BoardWorld, id: u64) {
    let result = run_async(world.board.orchestrator.mark_done(&TaskId::from(id)));
    world.last_results = vec![result];
}

#[when("the user deletes task {id:u64}")]
fn user_deletes(world: &mut BoardWorld, id: u64) {
    let result = run_async(world.board.orchestrator.delete(&TaskId::from(id)));
    world.last_results = vec![result];
}

#[when("the user deletes task {first:u64} and then task {second:u64} in quick succession")]
fn user_deletes_two(world: &mut BoardWorld, first: u64, second: u64) -> Result<(), eyre::Report> {
    let first_id = TaskId::from(first);
    let second_id = TaskId::from(second);
    let board = &world.board;
    let (first_result, second_result, shown) = run_async(async {
        tokio::join!(
            board.orchestrator.delete(&first_id),
            async {
                // Ensures the first deletion claims the first queued delay.
                if wait_for(|| board.count(ServiceOperation::DeleteTask) == 1)
                    .await
                    .is_err()
                {
                    tracing::warn!("first deletion never reached the service");
                }
                board.orchestrator.delete(&second_id).await
            },
            async {
                wait_for(|| board.count(ServiceOperation::FetchMetrics) == 1).await?;
                Ok::<_, eyre::Report>(board.ids())
            }
        )
    });
    world.last_results = vec![first_result, second_result];
    world.shown_mid_flight = Some(shown?);
    Ok(())
}

//! Then steps for task board synchronisation scenarios.

use super::world::BoardWorld;
use mockable::DefaultClock;
use rstest_bdd_macros::then;
use taskboard::task::{
    adapters::memory::ServiceOperation, domain::TaskId, services::MutationError,
};

#[then(r#"the task list shows "{name}""#)]
fn task_list_shows(world: &BoardWorld, name: String) -> Result<(), eyre::Report> {
    let names: Vec<String> = world
        .board
        .store
        .snapshot()
        .into_iter()
        .map(|record| record.name)
        .collect();
    if !names.contains(&name) {
        return Err(eyre::eyre!("expected {name} in task list, found {names:?}"));
    }
    Ok(())
}

#[then("the task list was refetched before the metrics")]
fn refetched_in_order(world: &BoardWorld) -> Result<(), eyre::Report> {
    let refetches = world.board.refetches();
    if refetches != vec![ServiceOperation::ListTasks, ServiceOperation::FetchMetrics] {
        return Err(eyre::eyre!(
            "expected one task refetch then one metrics refetch, got {refetches:?}"
        ));
    }
    Ok(())
}

#[then("the add is rejected as invalid")]
fn add_rejected(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_results
        .first()
        .ok_or_else(|| eyre::eyre!("missing add result"))?;
    if !matches!(result, Err(MutationError::Validation(_))) {
        return Err(eyre::eyre!("expected validation error, got {result:?}"));
    }
    Ok(())
}

#[then("no service call was made")]
fn no_service_call(world: &BoardWorld) -> Result<(), eyre::Report> {
    let calls = world.board.controls.calls().entries();
    if !calls.is_empty() {
        return Err(eyre::eyre!("expected no service calls, got {calls:?}"));
    }
    Ok(())
}

#[then(r#"task {id:u64} has status "{label}""#)]
fn task_has_status(world: &BoardWorld, id: u64, label: String) -> Result<(), eyre::Report> {
    let id = TaskId::from(id);
    let row = world
        .board
        .store
        .rows(&DefaultClock)
        .into_iter()
        .find(|row| row.record.id == id)
        .ok_or_else(|| eyre::eyre!("task {id} is not listed"))?;
    if row.status.status.label() != label {
        return Err(eyre::eyre!(
            "expected status {label}, found {}",
            row.status.status.label()
        ));
    }
    Ok(())
}

#[then("exactly one failure notice is shown")]
fn one_notice(world: &BoardWorld) -> Result<(), eyre::Report> {
    let notices = world.board.notices.notices();
    if notices.len() != 1 {
        return Err(eyre::eyre!("expected one notice, got {notices:?}"));
    }
    Ok(())
}

#[then("neither task was shown while the slow deletion was pending")]
fn nothing_shown_mid_flight(world: &BoardWorld) -> Result<(), eyre::Report> {
    let shown = world
        .shown_mid_flight
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing mid-flight observation"))?;
    if !shown.is_empty() {
        return Err(eyre::eyre!(
            "expected no tasks while the slow deletion was pending, found {shown:?}"
        ));
    }
    Ok(())
}

#[then("the task list is empty")]
fn task_list_empty(world: &BoardWorld) -> Result<(), eyre::Report> {
    let ids = world.board.ids();
    if !ids.is_empty() {
        return Err(eyre::eyre!("expected an empty task list, found {ids:?}"));
    }
    Ok(())
}

#[then("no failure notice is shown")]
fn no_notice(world: &BoardWorld) -> Result<(), eyre::Report> {
    if !world.board.notices.is_empty() {
        return Err(eyre::eyre!(
            "expected no notices, got {:?}",
            world.board.notices.notices()
        ));
    }
    for result in &world.last_results {
        if let Err(err) = result {
            return Err(eyre::eyre!("mutation failed: {err}"));
        }
    }
    Ok(())
}

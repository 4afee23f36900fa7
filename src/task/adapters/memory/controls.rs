//! Fault and timing controls for the in-memory service doubles.
//!
//! Every call into an in-memory service passes through
//! [`ServiceControls::enter`], which records the call, waits while the
//! operation is held, applies any queued delay and then returns an injected
//! failure if one is set.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;

use super::{CallLog, ServiceCall, ServiceOperation};
use crate::client::{ServiceError, ServiceResult};

/// Shared controls for one simulated backend.
#[derive(Debug, Clone, Default)]
pub struct ServiceControls {
    inner: Arc<ControlState>,
}

#[derive(Debug, Default)]
struct ControlState {
    calls: CallLog,
    gates: Gates,
    failures: Mutex<HashMap<ServiceOperation, ServiceError>>,
    delays: Mutex<HashMap<ServiceOperation, VecDeque<Duration>>>,
}

#[derive(Debug)]
struct Gates {
    list_tasks: watch::Sender<bool>,
    create_task: watch::Sender<bool>,
    mark_done: watch::Sender<bool>,
    delete_task: watch::Sender<bool>,
    fetch_metrics: watch::Sender<bool>,
}

impl Default for Gates {
    fn default() -> Self {
        Self {
            list_tasks: watch::Sender::new(false),
            create_task: watch::Sender::new(false),
            mark_done: watch::Sender::new(false),
            delete_task: watch::Sender::new(false),
            fetch_metrics: watch::Sender::new(false),
        }
    }
}

impl Gates {
    const fn sender(&self, operation: ServiceOperation) -> &watch::Sender<bool> {
        match operation {
            ServiceOperation::ListTasks => &self.list_tasks,
            ServiceOperation::CreateTask => &self.create_task,
            ServiceOperation::MarkDone => &self.mark_done,
            ServiceOperation::DeleteTask => &self.delete_task,
            ServiceOperation::FetchMetrics => &self.fetch_metrics,
        }
    }
}

impl ServiceControls {
    /// Creates controls with nothing held, delayed or failing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the log of initiated calls.
    #[must_use]
    pub fn calls(&self) -> &CallLog {
        &self.inner.calls
    }

    /// Holds every subsequent call of `operation` until released.
    ///
    /// Calls already waiting stay parked; calls are recorded as initiated
    /// before they wait.
    pub fn hold(&self, operation: ServiceOperation) {
        self.inner.gates.sender(operation).send_replace(true);
    }

    /// Releases held calls of `operation`.
    pub fn release(&self, operation: ServiceOperation) {
        self.inner.gates.sender(operation).send_replace(false);
    }

    /// Makes every call of `operation` fail with `error` until recovered.
    pub fn fail(&self, operation: ServiceOperation, error: ServiceError) {
        self.inner
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(operation, error);
    }

    /// Clears an injected failure.
    pub fn recover(&self, operation: ServiceOperation) {
        self.inner
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&operation);
    }

    /// Delays the next not-yet-delayed call of `operation` by `delay`.
    ///
    /// Delays are consumed in call order, so queueing a long delay and then
    /// a short one makes two overlapping calls answer out of send order.
    pub fn delay_next(&self, operation: ServiceOperation, delay: Duration) {
        self.inner
            .delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(operation)
            .or_default()
            .push_back(delay);
    }

    /// Records `call` and applies holds, delays and failures.
    ///
    /// # Errors
    ///
    /// Returns the injected failure for the call's operation, if any.
    pub async fn enter(&self, call: ServiceCall) -> ServiceResult<()> {
        let operation = call.operation();
        self.inner.calls.record(call);

        let mut gate = self.inner.gates.sender(operation).subscribe();
        loop {
            if !*gate.borrow_and_update() {
                break;
            }
            if gate.changed().await.is_err() {
                break;
            }
        }

        let delay = self
            .inner
            .delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&operation)
            .and_then(VecDeque::pop_front);
        if let Some(pause) = delay {
            tokio::time::sleep(pause).await;
        }

        let failure = self
            .inner
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&operation)
            .cloned();
        failure.map_or(Ok(()), Err)
    }
}

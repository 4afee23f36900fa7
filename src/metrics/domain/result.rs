//! Per-algorithm metrics results and their render helpers.

use serde::{Deserialize, Deserializer, Serialize};

use super::Algorithm;
use crate::task::domain::TaskId;

/// Waiting and turnaround time of one task under one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMetric {
    /// Task the figures belong to.
    pub task_id: TaskId,
    /// Seconds between arrival and start.
    #[serde(default, deserialize_with = "number_or_zero")]
    pub waiting_time: f64,
    /// Seconds between arrival and completion.
    #[serde(default, deserialize_with = "number_or_zero")]
    pub turnaround_time: f64,
}

/// Metrics computed by the service for one scheduling algorithm.
///
/// Absent or `null` aggregates decode as zero and an absent or `null` task
/// list as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    /// Algorithm the result was computed for.
    pub algo: Algorithm,
    /// Per-task figures in the service's order.
    #[serde(default, deserialize_with = "list_or_empty")]
    pub metrics: Vec<TaskMetric>,
    /// Mean waiting time in seconds.
    #[serde(default, deserialize_with = "number_or_zero")]
    pub avg_waiting: f64,
    /// Mean turnaround time in seconds.
    #[serde(default, deserialize_with = "number_or_zero")]
    pub avg_tat: f64,
    /// Completed tasks per second of simulated wall time.
    #[serde(default, deserialize_with = "number_or_zero")]
    pub throughput: f64,
}

impl AlgorithmResult {
    /// Creates a result with no tasks and zero aggregates.
    #[must_use]
    pub const fn empty(algo: Algorithm) -> Self {
        Self {
            algo,
            metrics: Vec::new(),
            avg_waiting: 0.0,
            avg_tat: 0.0,
            throughput: 0.0,
        }
    }

    /// Sets the aggregates.
    #[must_use]
    pub const fn with_aggregates(mut self, avg_waiting: f64, avg_tat: f64, throughput: f64) -> Self {
        self.avg_waiting = avg_waiting;
        self.avg_tat = avg_tat;
        self.throughput = throughput;
        self
    }

    /// Appends one task's figures.
    #[must_use]
    pub fn with_metric(
        mut self,
        task_id: impl Into<TaskId>,
        waiting_time: f64,
        turnaround_time: f64,
    ) -> Self {
        self.metrics.push(TaskMetric {
            task_id: task_id.into(),
            waiting_time,
            turnaround_time,
        });
        self
    }

    /// Returns the aggregate line shown under the charts.
    #[must_use]
    pub fn summary(&self) -> AlgorithmSummary {
        AlgorithmSummary {
            algo: self.algo.clone(),
            avg_waiting: self.avg_waiting,
            avg_tat: self.avg_tat,
            throughput: self.throughput,
        }
    }

    /// Returns the chart series for this result.
    #[must_use]
    pub fn chart(&self) -> ChartSeries {
        ChartSeries {
            labels: self
                .metrics
                .iter()
                .map(|metric| format!("Task {}", metric.task_id))
                .collect(),
            waiting: self
                .metrics
                .iter()
                .map(|metric| metric.waiting_time.round())
                .collect(),
            turnaround: self
                .metrics
                .iter()
                .map(|metric| metric.turnaround_time.round())
                .collect(),
        }
    }
}

/// Aggregates of one algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmSummary {
    /// Algorithm the aggregates belong to.
    pub algo: Algorithm,
    /// Mean waiting time in seconds.
    pub avg_waiting: f64,
    /// Mean turnaround time in seconds.
    pub avg_tat: f64,
    /// Completed tasks per second.
    pub throughput: f64,
}

/// Line chart data for one algorithm: one label and two points per task.
///
/// Values are rounded to whole seconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    /// `Task {id}` for each task, in the service's order.
    pub labels: Vec<String>,
    /// Rounded waiting times.
    pub waiting: Vec<f64>,
    /// Rounded turnaround times.
    pub turnaround: Vec<f64>,
}

impl ChartSeries {
    /// Returns `true` when the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

fn list_or_empty<'de, D>(deserializer: D) -> Result<Vec<TaskMetric>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TaskMetric>>::deserialize(deserializer)?.unwrap_or_default())
}

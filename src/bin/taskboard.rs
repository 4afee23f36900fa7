//! Terminal front end for the scheduled-task service.
//!
//! Usage:
//!
//! ```text
//! taskboard [--config FILE] [--base-url URL] [--timeout-ms MS] [--metrics-path PATH] <command>
//! ```
//!
//! Commands:
//!
//! - `show`: load the task list and the metrics together
//! - `list [--at TIME]`: list tasks, deriving status against `TIME` or now
//! - `add NAME --scheduled-time TIME --duration SECS`: create a task
//! - `done ID`: mark a task done
//! - `delete ID`: delete a task
//! - `metrics [--algo KEY]`: show metrics for every or one algorithm
//!
//! Configuration is layered from defaults, the optional TOML file, the
//! `TASKBOARD_*` environment variables and finally the flags above. Logs go
//! to stderr and are filtered through `RUST_LOG` (default `taskboard=info`).

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use taskboard::client::{ApiClient, ConfigError, ServiceConfig, ServiceError};
use taskboard::metrics::{
    adapters::http::HttpMetricsService,
    domain::{Algorithm, AlgorithmResult},
    ports::MetricsService,
    services::MetricsRefresher,
};
use taskboard::task::{
    adapters::http::HttpTaskService,
    domain::{FixedClock, NewTaskForm, TaskId, TaskRow, parse_timestamp},
    ports::{Notice, NoticeSink},
    services::{DependentViews, MutationError, MutationOrchestrator, TaskRefresher, TaskStore},
};
use taskboard::view::RefreshOutcome;

const DEFAULT_LOG_FILTER: &str = "taskboard=info";

/// Client for a remote scheduled-task service.
#[derive(Parser)]
#[command(name = "taskboard", version, about = "Create, track and complete scheduled tasks")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the service.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Path of the metrics endpoint.
    #[arg(long, global = true)]
    metrics_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the task list and the metrics together.
    Show,
    /// List tasks with their derived status.
    List {
        /// Derive statuses as of this local time instead of now.
        #[arg(long)]
        at: Option<String>,
    },
    /// Create a task.
    Add {
        /// Task name.
        name: String,
        /// Scheduled start, e.g. `2024-01-01T10:00`.
        #[arg(long)]
        scheduled_time: String,
        /// Planned duration in whole seconds.
        #[arg(long)]
        duration: String,
    },
    /// Mark a task done.
    Done {
        /// Task identifier.
        id: String,
    },
    /// Delete a task.
    Delete {
        /// Task identifier.
        id: String,
    },
    /// Show scheduling metrics.
    Metrics {
        /// Only show this algorithm (`fcfs`, `ljf` or `lifo`).
        #[arg(long)]
        algo: Option<String>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Mutation(#[from] MutationError),
    #[error("failed to load tasks: {0}")]
    Tasks(ServiceError),
    #[error("failed to load metrics: {0}")]
    Metrics(ServiceError),
    #[error("invalid time '{0}'")]
    InvalidTime(String),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Writes failure notices to stderr.
struct StderrNotices;

impl NoticeSink for StderrNotices {
    fn notify(&self, notice: Notice) {
        if writeln!(io::stderr(), "{notice}").is_err() {
            tracing::warn!(%notice, "failed to write notice");
        }
    }
}

/// The wired task and metrics views.
struct Board {
    tasks: TaskRefresher<HttpTaskService>,
    metrics: MetricsRefresher<HttpMetricsService>,
    metrics_service: Arc<HttpMetricsService>,
    orchestrator: MutationOrchestrator<HttpTaskService>,
}

impl Board {
    fn connect(config: &ServiceConfig) -> Result<Self, ConfigError> {
        let api = ApiClient::new(config)?;
        let task_service = Arc::new(HttpTaskService::new(api.clone()));
        let metrics_service = Arc::new(HttpMetricsService::new(api));

        let store = TaskStore::new();
        let tasks = TaskRefresher::new(Arc::clone(&task_service), store.clone());
        let metrics = MetricsRefresher::new(Arc::clone(&metrics_service));
        let views = DependentViews::new(Arc::new(tasks.clone()), Arc::new(metrics.clone()));
        let orchestrator =
            MutationOrchestrator::new(task_service, store, views, Arc::new(StderrNotices));

        Ok(Self {
            tasks,
            metrics,
            metrics_service,
            orchestrator,
        })
    }

    fn store(&self) -> &TaskStore {
        self.orchestrator.store()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Mutation(MutationError::Service(_))) => ExitCode::FAILURE,
        Err(err) => {
            if writeln!(io::stderr(), "taskboard: {err}").is_err() {
                tracing::error!(error = %err, "command failed");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let board = Board::connect(&config)?;
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Show => {
            board.orchestrator.initial_load().await;
            render_tasks(&mut out, &board.store().rows(&DefaultClock))?;
            writeln!(out)?;
            render_metrics(&mut out, board.metrics.snapshot().results())?;
        }
        Command::List { at } => {
            if let RefreshOutcome::Failed(err) = board.tasks.refresh_tasks().await {
                return Err(CliError::Tasks(err));
            }
            let rows = match at {
                Some(raw) => board.store().rows(&clock_at(&raw)?),
                None => board.store().rows(&DefaultClock),
            };
            render_tasks(&mut out, &rows)?;
        }
        Command::Add {
            name,
            scheduled_time,
            duration,
        } => {
            let form = NewTaskForm::new(name, scheduled_time, duration);
            let created = board.orchestrator.add(&form).await?;
            writeln!(out, "Created task {}.", created.id)?;
            render_tasks(&mut out, &board.store().rows(&DefaultClock))?;
        }
        Command::Done { id } => {
            board.orchestrator.mark_done(&TaskId::new(id)).await?;
            render_tasks(&mut out, &board.store().rows(&DefaultClock))?;
        }
        Command::Delete { id } => {
            board.orchestrator.delete(&TaskId::new(id)).await?;
            render_tasks(&mut out, &board.store().rows(&DefaultClock))?;
        }
        Command::Metrics { algo: None } => {
            if let RefreshOutcome::Failed(err) = board.metrics.fetch_metrics().await {
                return Err(CliError::Metrics(err));
            }
            render_metrics(&mut out, board.metrics.snapshot().results())?;
        }
        Command::Metrics { algo: Some(key) } => {
            let result = board
                .metrics_service
                .fetch_algorithm(&Algorithm::from(key.as_str()))
                .await
                .map_err(CliError::Metrics)?;
            render_metrics(&mut out, std::slice::from_ref(&result))?;
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ServiceConfig, ConfigError> {
    let base = match &cli.config {
        Some(path) => ServiceConfig::from_file(path)?,
        None => ServiceConfig::default(),
    };
    let mut config = base.with_process_env()?;
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(metrics_path) = &cli.metrics_path {
        config.metrics_path.clone_from(metrics_path);
    }
    config.validate()?;
    Ok(config)
}

fn clock_at(raw: &str) -> Result<FixedClock, CliError> {
    parse_timestamp(raw)
        .and_then(FixedClock::from_local)
        .ok_or_else(|| CliError::InvalidTime(raw.to_owned()))
}

fn render_tasks(out: &mut impl Write, rows: &[TaskRow]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No tasks.");
    }
    writeln!(
        out,
        "{:<10} {:>5}  {:<24} {:<20} {}",
        "STATUS", "ID", "NAME", "SCHEDULED", "DURATION"
    )?;
    for row in rows {
        let name = if row.struck_through() {
            format!("~{}~", row.record.name)
        } else {
            row.record.name.clone()
        };
        writeln!(
            out,
            "{:<10} {:>5}  {:<24} {:<20} {}",
            row.status.status.label(),
            row.record.id.as_str(),
            name,
            row.record.scheduled_time,
            row.record.duration_label().unwrap_or_default(),
        )?;
    }
    Ok(())
}

fn render_metrics(out: &mut impl Write, results: &[AlgorithmResult]) -> io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "No metrics yet.");
    }
    for result in results {
        writeln!(out, "{}", result.algo.heading())?;
        let chart = result.chart();
        for ((label, waiting), turnaround) in chart
            .labels
            .iter()
            .zip(&chart.waiting)
            .zip(&chart.turnaround)
        {
            writeln!(out, "  {label:<10} waiting {waiting:>6}s  turnaround {turnaround:>6}s")?;
        }
    }
    writeln!(out)?;
    for summary in results.iter().map(AlgorithmResult::summary) {
        writeln!(
            out,
            "{}  Avg WT: {:.2}  Avg TAT: {:.2}  Throughput: {:.4}",
            summary.algo.heading(),
            summary.avg_waiting,
            summary.avg_tat,
            summary.throughput,
        )?;
    }
    Ok(())
}

//! Cron-driven ingestion.
//!
//! Registers a single job that runs the scrape command and ingests its
//! output on every tick. Each run reloads the state file, so nothing is
//! carried in memory between runs.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use vidtrack_core::AppConfig;

use crate::run::run_ingest;
use crate::source::VideoSource;

/// Run scheduled ingestion until ctrl-c or SIGTERM.
///
/// # Errors
///
/// Returns an error if no scrape command is configured or the scheduler
/// cannot be built.
pub(crate) async fn run_scheduled(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let source = VideoSource::resolve(None, &config)?;
    let mut scheduler = build_scheduler(Arc::clone(&config), source).await?;

    tracing::info!(
        schedule = %config.schedule,
        data_path = %config.data_path.display(),
        "scheduler running (UTC); press ctrl-c to stop"
    );

    shutdown_signal().await;
    scheduler.shutdown().await?;
    Ok(())
}

/// Builds and starts the job scheduler with the ingestion job registered.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the cron expression is rejected or the
/// scheduler cannot be started.
pub(crate) async fn build_scheduler(
    config: Arc<AppConfig>,
    source: VideoSource,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    register_ingest_job(&scheduler, config, source).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_ingest_job(
    scheduler: &JobScheduler,
    config: Arc<AppConfig>,
    source: VideoSource,
) -> Result<(), JobSchedulerError> {
    let source = Arc::new(source);
    // One ingestion at a time against the state file.
    let running = Arc::new(Mutex::new(()));
    let schedule = config.schedule.clone();

    let job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
        let config = Arc::clone(&config);
        let source = Arc::clone(&source);
        let running = Arc::clone(&running);

        Box::pin(async move {
            let Ok(_guard) = running.try_lock() else {
                tracing::warn!("scheduler: previous ingestion still running; skipping tick");
                return;
            };

            tracing::info!("scheduler: starting scheduled ingestion");
            match run_ingest(&config, &source).await {
                Ok(()) => tracing::info!("scheduler: scheduled ingestion complete"),
                Err(e) => {
                    tracing::error!(error = %format!("{e:#}"), "scheduler: scheduled ingestion failed");
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduler");
}

use crate::controller::DashboardController;
use crate::errors::AppError;
use crate::jobs::{dashboard_stats_job, holdings_refresh_job};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

// Context passed to job functions
#[derive(Clone)]
pub struct JobContext {
    pub controller: DashboardController,
}

/// Refresh periods for the repeating page jobs.
#[derive(Debug, Clone, Copy)]
pub struct RefreshIntervals {
    pub holdings: Duration,
    pub dashboard_stats: Duration,
}

pub struct JobSchedulerService {
    scheduler: JobScheduler,
    context: JobContext,
    jobs: usize,
}

impl JobSchedulerService {
    pub async fn new(controller: DashboardController) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::Scheduler(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            context: JobContext { controller },
            jobs: 0,
        })
    }

    /// Start the repeating refresh jobs. The first run of each happens one
    /// full interval after start.
    pub async fn start(&mut self, intervals: RefreshIntervals) -> Result<(), AppError> {
        info!("🚀 Starting job scheduler...");

        self.schedule_job(
            intervals.holdings,
            "refresh_holdings",
            holdings_refresh_job::refresh_holdings,
        )
        .await?;

        self.schedule_job(
            intervals.dashboard_stats,
            "update_dashboard_stats",
            dashboard_stats_job::update_dashboard_stats,
        )
        .await?;

        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::Scheduler(format!("Failed to start scheduler: {}", e)))?;

        info!("✅ Job scheduler started successfully with {} jobs", self.jobs);
        Ok(())
    }

    /// Stop the scheduler. No job fires after this returns.
    pub async fn stop(&mut self) -> Result<(), AppError> {
        info!("🛑 Stopping job scheduler...");
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::Scheduler(format!("Failed to stop scheduler: {}", e)))?;
        info!("✅ Job scheduler stopped");
        Ok(())
    }

    /// Helper to schedule a repeating job with tracking
    async fn schedule_job<F, Fut>(
        &mut self,
        every: Duration,
        job_name: &'static str,
        job_fn: F,
    ) -> Result<(), AppError>
    where
        F: Fn(JobContext) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<JobResult, AppError>> + Send + 'static,
    {
        let context = self.context.clone();
        let job_fn = Arc::new(job_fn);

        let job = Job::new_repeated_async(every, move |_uuid, _l| {
            let context = context.clone();
            let job_fn = job_fn.clone();
            Box::pin(async move {
                execute_job_with_tracking(job_name, context, job_fn).await;
            })
        })
        .map_err(|e| AppError::Scheduler(format!("Failed to create job {}: {}", job_name, e)))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::Scheduler(format!("Failed to add job {}: {}", job_name, e)))?;

        self.jobs += 1;
        info!("📅 Scheduled: {} every {}s", job_name, every.as_secs());
        Ok(())
    }
}

// Job tracking wrapper
pub(crate) async fn execute_job_with_tracking<F, Fut>(
    job_name: &str,
    context: JobContext,
    job_fn: Arc<F>,
) -> Option<JobResult>
where
    F: Fn(JobContext) -> Fut,
    Fut: std::future::Future<Output = Result<JobResult, AppError>>,
{
    tracing::debug!("🏃 Starting job: {}", job_name);
    let started_at = Utc::now();

    let result = job_fn(context).await;

    let duration_ms = (Utc::now() - started_at).num_milliseconds();

    match result {
        Ok(job_result) => {
            if job_result.skipped {
                tracing::debug!("Job skipped: {} (region not on page)", job_name);
            } else {
                info!(
                    "✅ Job completed: {} (updated: {}, duration: {}ms)",
                    job_name, job_result.updated, duration_ms
                );
            }
            Some(job_result)
        }
        Err(e) => {
            error!("❌ Job failed: {} - {}", job_name, e);
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobResult {
    /// Whether the page region was re-rendered.
    pub updated: bool,
    /// The job's region is not mounted on the current page.
    pub skipped: bool,
}

impl JobResult {
    pub fn skipped() -> Self {
        Self {
            updated: false,
            skipped: true,
        }
    }

    pub fn ran(updated: bool) -> Self {
        Self {
            updated,
            skipped: false,
        }
    }
}

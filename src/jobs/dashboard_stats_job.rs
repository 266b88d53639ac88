use crate::errors::AppError;
use crate::services::job_scheduler_service::{JobContext, JobResult};
use crate::view::Region;

/// Re-renders the stock count, portfolio value and API status cards.
pub async fn update_dashboard_stats(ctx: JobContext) -> Result<JobResult, AppError> {
    let mounted = ctx
        .controller
        .state()
        .page
        .lock()
        .is_mounted(Region::DashboardStats);
    if !mounted {
        return Ok(JobResult::skipped());
    }

    Ok(JobResult::ran(ctx.controller.update_dashboard_stats().await))
}

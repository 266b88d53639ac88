use crate::errors::AppError;
use crate::services::job_scheduler_service::{JobContext, JobResult};
use crate::view::Region;

/// Re-renders the holdings table.
pub async fn refresh_holdings(ctx: JobContext) -> Result<JobResult, AppError> {
    let mounted = ctx
        .controller
        .state()
        .page
        .lock()
        .is_mounted(Region::HoldingsContainer);
    if !mounted {
        return Ok(JobResult::skipped());
    }

    Ok(JobResult::ran(ctx.controller.refresh_holdings().await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::controller::DashboardController;
    use crate::external::stub::{Reply, StubDashboardApi};
    use crate::interaction::ScriptedInteraction;
    use crate::services::request_tokens::RequestTokens;
    use crate::state::AppState;
    use crate::view::{Notifier, Page, PageKind};

    fn context(api: Arc<StubDashboardApi>, kind: PageKind) -> JobContext {
        let page = Page::shared(kind);
        JobContext {
            controller: DashboardController::new(AppState {
                api,
                notifier: Notifier::new(page.clone(), Duration::from_secs(5)),
                page,
                tokens: RequestTokens::new(),
                interaction: Arc::new(ScriptedInteraction::default()),
                rng: Arc::new(Mutex::new(StdRng::seed_from_u64(3))),
                training_delay: Duration::ZERO,
            }),
        }
    }

    #[tokio::test]
    async fn test_skips_without_holdings_region() {
        let api = Arc::new(StubDashboardApi::default());
        let result = refresh_holdings(context(api.clone(), PageKind::Dashboard))
            .await
            .unwrap();
        assert_eq!(result, JobResult::skipped());
        assert_eq!(api.holdings_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_is_silent() {
        let api = Arc::new(StubDashboardApi::default());
        *api.holdings.lock() = Reply::Network("refused".into());
        let ctx = context(api, PageKind::Data);

        let result = refresh_holdings(ctx.clone()).await.unwrap();

        assert_eq!(result, JobResult::ran(false));
        assert!(ctx.controller.state().page.lock().alert().is_none());
    }
}

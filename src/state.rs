use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;

use crate::external::dashboard_api::DashboardApi;
use crate::interaction::Interaction;
use crate::services::request_tokens::RequestTokens;
use crate::view::{Notifier, SharedPage};

/// Everything a handler needs, passed by reference instead of living in globals.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn DashboardApi>,
    pub page: SharedPage,
    pub notifier: Notifier,
    pub tokens: RequestTokens,
    pub interaction: Arc<dyn Interaction>,
    /// Jitter source for predictions and simulated metrics.
    pub rng: Arc<Mutex<StdRng>>,
    pub training_delay: Duration,
}

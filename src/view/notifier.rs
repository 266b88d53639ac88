use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::view::page::{Alert, AlertKind, SharedPage};

/// Transient alert banner. At most one is visible; a new alert replaces the
/// current one at once and each dismisses itself after `ttl`.
#[derive(Clone)]
pub struct Notifier {
    page: SharedPage,
    ttl: Duration,
    next_id: Arc<AtomicU64>,
}

impl Notifier {
    pub fn new(page: SharedPage, ttl: Duration) -> Self {
        Self {
            page,
            ttl,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn loading(&self, message: impl Into<String>) -> u64 {
        self.show(AlertKind::Info, message)
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(AlertKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(AlertKind::Danger, message)
    }

    /// Must be called from within a Tokio runtime; the dismissal timer is a
    /// spawned task.
    pub fn show(&self, kind: AlertKind, message: impl Into<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let message = message.into();
        debug!("Alert #{} ({:?}): {}", id, kind, message);

        self.page.lock().show_alert(Alert {
            id,
            kind,
            message,
        });

        let page = self.page.clone();
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            page.lock().dismiss_alert(id);
        });

        id
    }
}

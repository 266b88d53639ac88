use std::sync::Arc;

use dashmap::DashMap;

/// Logical operations whose responses may race each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Holdings,
    DashboardStats,
    PortfolioAnalytics,
    PortfolioSymbols,
    Analysis,
    Predictions,
    RecentData,
}

/// Token handed out when an operation starts; only the newest token for an
/// operation may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    pub operation: Operation,
    pub generation: u64,
}

/// Per-operation generation counters used to drop stale responses.
///
/// A response is applied only if no newer request of the same operation has
/// started since it was sent.
#[derive(Clone, Default)]
pub struct RequestTokens {
    generations: Arc<DashMap<Operation, u64>>,
}

impl RequestTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request for `operation`, superseding any in flight.
    pub fn begin(&self, operation: Operation) -> RequestToken {
        let mut entry = self.generations.entry(operation).or_insert(0);
        *entry += 1;
        RequestToken {
            operation,
            generation: *entry,
        }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.generations
            .get(&token.operation)
            .map(|g| *g == token.generation)
            .unwrap_or(false)
    }
}

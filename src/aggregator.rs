use std::sync::Arc;

use tracing::info;

use crate::config::AggregatorConfig;
use crate::fetcher::SourceFetcher;
use crate::model::AggregatedPayload;
use crate::scheduler::{PayloadSource, SchedulerState, Subscription, SubscriptionScheduler, TickOutcome};

/// Owns the fetch pipeline and the subscriber scheduler for one nation.
pub struct DataAggregator {
    source: Arc<dyn PayloadSource>,
    scheduler: SubscriptionScheduler,
}

impl DataAggregator {
    pub fn new(config: &AggregatorConfig) -> Self {
        info!(
            nation = %config.team.nation,
            providers = ?config.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            poll_secs = config.poll_interval.as_secs(),
            "Constructing DataAggregator"
        );
        let fetcher = SourceFetcher::from_config(config);
        Self::with_source(Arc::new(fetcher), config)
    }

    /// Build around any payload source, using the config's polling period and change detection.
    pub fn with_source(source: Arc<dyn PayloadSource>, config: &AggregatorConfig) -> Self {
        let scheduler = SubscriptionScheduler::new(Arc::clone(&source), config.poll_interval, config.change_detection);
        Self { source, scheduler }
    }

    /// One-shot fetch for the initial load. Always resolves with a usable payload.
    pub async fn get_all(&self) -> AggregatedPayload {
        self.source.fetch().await
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AggregatedPayload) + Send + Sync + 'static,
    {
        self.scheduler.subscribe(callback)
    }

    pub async fn refresh_now(&self) -> TickOutcome {
        self.scheduler.refresh_now().await
    }

    pub fn latest(&self) -> Option<Arc<AggregatedPayload>> {
        self.scheduler.latest()
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn subscriber_count(&self) -> usize {
        self.scheduler.subscriber_count()
    }
}

//! Live football data for a national-team fan site.
//!
//! Fixtures, results and standings are pulled from upstream providers in
//! priority order, padded with a verified static snapshot when providers fail,
//! and pushed to subscribers whenever the polled payload changes.

pub mod aggregator;
pub mod config;
pub mod emblem;
pub mod error;
pub mod fallback;
pub mod fetcher;
pub mod http;
pub mod model;
pub mod provider;
pub mod retry;
pub mod scheduler;

pub use aggregator::DataAggregator;
pub use config::{AggregatorConfig, TeamContext};
pub use error::{ConfigError, FallbackError, FetchError};
pub use fallback::FallbackResolver;
pub use fetcher::SourceFetcher;
pub use model::payload::{AggregatedPayload, DataSource};
pub use scheduler::{ChangeDetection, PayloadSource, SchedulerState, Subscription, SubscriptionScheduler, TickOutcome};

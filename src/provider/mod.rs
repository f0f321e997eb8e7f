use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use tracing::info;

use crate::config::{AggregatorConfig, ProviderConfig};
use crate::error::FetchError;
use crate::http::HttpClient;
use crate::model::{LiveMatch, MatchFixture, MatchResult, StandingsSnapshot};

pub mod football_data;
pub mod sportsdb;

pub use football_data::FootballData;
pub use sportsdb::TheSportsDb;

/// One upstream source of match data. An empty list or `None` means the
/// provider had nothing to offer for that facet; the next provider is tried.
#[async_trait]
pub trait FootballProvider: Send + Sync {
    /// Human-readable name for logging and the payload's data source label.
    fn name(&self) -> &str;

    async fn upcoming_fixtures(&self) -> Result<Vec<MatchFixture>, FetchError>;

    async fn recent_results(&self) -> Result<Vec<MatchResult>, FetchError>;

    async fn standings(&self) -> Result<Option<StandingsSnapshot>, FetchError> {
        Ok(None)
    }

    async fn live_matches(&self) -> Result<Vec<LiveMatch>, FetchError> {
        Ok(Vec::new())
    }
}

/// Instantiate the configured providers in priority order.
pub fn from_config(config: &AggregatorConfig) -> Vec<Arc<dyn FootballProvider>> {
    let http = HttpClient::new(&config.http);
    let mut providers: Vec<Arc<dyn FootballProvider>> = Vec::new();

    for provider in &config.providers {
        match provider {
            ProviderConfig::FootballData { base_url, api_key, team_id, competition } => {
                let Some(api_key) = api_key.clone() else {
                    info!(provider = provider.name(), "No API key configured, skipping provider");
                    continue;
                };
                providers.push(Arc::new(FootballData::new(
                    http.clone(),
                    base_url.clone(),
                    api_key,
                    *team_id,
                    competition.clone(),
                    config.team.clone(),
                )));
            }
            ProviderConfig::SportsDb { base_url, team_id } => {
                providers.push(Arc::new(TheSportsDb::new(
                    http.clone(),
                    base_url.clone(),
                    team_id.clone(),
                    config.team.clone(),
                )));
            }
        }
    }

    providers
}

/// Parse a provider timestamp as RFC 3339, or as a naive `YYYY-MM-DDTHH:MM:SS` taken to be UTC.
pub(crate) fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|naive| Utc.from_utc_datetime(&naive)))
        .ok()
}

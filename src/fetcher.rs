use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::config::{AggregatorConfig, TeamContext};
use crate::error::FetchError;
use crate::fallback::FallbackResolver;
use crate::model::{AggregatedPayload, DataSource, LiveMatch, MatchFixture, MatchResult, StandingsSnapshot};
use crate::provider::{self, FootballProvider};
use crate::scheduler::PayloadSource;

/// A facet value and the provider that served it.
#[derive(Debug, Clone)]
struct Sourced<T> {
    value: T,
    provider: String,
}

/// Queries providers facet by facet and always produces a complete payload.
pub struct SourceFetcher {
    providers: Vec<Arc<dyn FootballProvider>>,
    fallback: FallbackResolver,
    team: TeamContext,
    compute_standings: bool,
}

impl SourceFetcher {
    pub fn new(
        providers: Vec<Arc<dyn FootballProvider>>,
        fallback: FallbackResolver,
        team: TeamContext,
        compute_standings: bool,
    ) -> Self {
        if !fallback.covers(&team) {
            warn!(
                nation = %team.nation,
                fallback_nation = %fallback.nation(),
                "Fallback snapshot was verified for another nation; degraded payloads will carry its data"
            );
        }
        Self { providers, fallback, team, compute_standings }
    }

    pub fn from_config(config: &AggregatorConfig) -> Self {
        Self::new(
            provider::from_config(config),
            FallbackResolver::default(),
            config.team.clone(),
            config.compute_standings,
        )
    }

    pub fn fallback(&self) -> &FallbackResolver {
        &self.fallback
    }

    /// Fetch every facet concurrently. Provider failures are absorbed; a facet
    /// that no provider serves is filled from the fallback snapshot.
    #[instrument(level = "info", skip(self), fields(providers = self.providers.len()))]
    pub async fn fetch(&self) -> AggregatedPayload {
        let (fixtures, results, standings, live) = tokio::join!(
            self.first_available("fixtures", |p| async move { Ok::<_, FetchError>(non_empty(p.upcoming_fixtures().await?)) }),
            self.first_available("results", |p| async move { Ok::<_, FetchError>(non_empty(p.recent_results().await?)) }),
            self.first_available("standings", |p| async move {
                let standings = p.standings().await?;
                Ok::<_, FetchError>(standings.filter(|s| {
                    let consistent = s.is_consistent();
                    if !consistent {
                        warn!(provider = p.name(), standings = ?s, "Discarding suspect standings");
                    }
                    consistent
                }))
            }),
            self.first_available("live", |p| async move { Ok::<_, FetchError>(non_empty(p.live_matches().await?)) }),
        );
        self.assemble(fixtures, results, standings, live, Utc::now())
    }

    /// Try each provider in priority order until one yields data for the facet.
    async fn first_available<T, F, Fut>(&self, facet: &'static str, call: F) -> Option<Sourced<T>>
    where
        F: Fn(Arc<dyn FootballProvider>) -> Fut,
        Fut: Future<Output = Result<Option<T>, FetchError>>,
    {
        for provider in &self.providers {
            let name = provider.name().to_string();
            match call(Arc::clone(provider)).await {
                Ok(Some(value)) => {
                    debug!(facet, provider = %name, "Facet served");
                    return Some(Sourced { value, provider: name });
                }
                Ok(None) => info!(facet, provider = %name, "Provider returned no data"),
                Err(e) => warn!(facet, provider = %name, error = %e, "Provider failed, trying next"),
            }
        }
        None
    }

    fn assemble(
        &self,
        fixtures: Option<Sourced<Vec<MatchFixture>>>,
        results: Option<Sourced<Vec<MatchResult>>>,
        standings: Option<Sourced<StandingsSnapshot>>,
        live: Option<Sourced<Vec<LiveMatch>>>,
        now: DateTime<Utc>,
    ) -> AggregatedPayload {
        if fixtures.is_none() && results.is_none() && standings.is_none() && live.is_none() {
            warn!("No provider served any facet, using verified fallback");
            let mut payload = self.fallback.snapshot();
            payload.last_update = now;
            return payload;
        }

        let standings = match standings {
            Some(standings) => Some(standings),
            None if self.compute_standings => results.as_ref().and_then(|r| {
                info!(provider = %r.provider, count = r.value.len(), "Computing standings from results");
                let computed = StandingsSnapshot::from_results(&r.value, &self.team.nation);
                if !computed.is_consistent() {
                    warn!(provider = %r.provider, standings = ?computed, "Computed standings overflowed, using fallback");
                    return None;
                }
                Some(Sourced { value: computed, provider: r.provider.clone() })
            }),
            None => None,
        };

        let mut providers: Vec<String> = Vec::new();
        for name in [
            fixtures.as_ref().map(|s| &s.provider),
            results.as_ref().map(|s| &s.provider),
            standings.as_ref().map(|s| &s.provider),
            live.as_ref().map(|s| &s.provider),
        ]
        .into_iter()
        .flatten()
        {
            if !providers.contains(name) {
                providers.push(name.clone());
            }
        }
        let all_core_live = fixtures.is_some() && results.is_some() && standings.is_some();
        let data_source = if all_core_live {
            DataSource::Live { providers }
        } else {
            DataSource::Partial { providers }
        };

        let next_match = fixtures
            .and_then(|f| f.value.into_iter().min_by_key(|fixture| fixture.kickoff))
            .unwrap_or_else(|| self.fallback.next_match());
        let live_matches = live.map(|l| l.value).unwrap_or_default();

        AggregatedPayload {
            next_match,
            recent_results: results.map(|r| r.value).unwrap_or_else(|| self.fallback.recent_results()),
            standings: standings.map(|s| s.value).unwrap_or_else(|| self.fallback.standings()),
            player_stats: self.fallback.player_stats(),
            is_live: !live_matches.is_empty(),
            live_matches,
            last_update: now,
            data_source,
        }
    }
}

#[async_trait]
impl PayloadSource for SourceFetcher {
    async fn fetch(&self) -> AggregatedPayload {
        SourceFetcher::fetch(self).await
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{LiveMatch, MatchFixture, MatchResult, PlayerStat, StandingsSnapshot};

/// Where the facets of a payload came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DataSource {
    /// Every core facet was served by a live provider.
    Live { providers: Vec<String> },
    /// Some facets are live, the rest were filled from the fallback snapshot.
    Partial { providers: Vec<String> },
    VerifiedStatic,
}

impl DataSource {
    pub fn is_live(&self) -> bool {
        !matches!(self, DataSource::VerifiedStatic)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Live { providers } => write!(f, "live ({})", providers.join(", ")),
            DataSource::Partial { providers } => {
                write!(f, "live ({}) + verified fallback", providers.join(", "))
            }
            DataSource::VerifiedStatic => f.write_str("verified static data"),
        }
    }
}

/// The unit delivered to consumers. Built fresh every fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPayload {
    pub next_match: MatchFixture,
    pub recent_results: Vec<MatchResult>,
    pub standings: StandingsSnapshot,
    pub player_stats: Vec<PlayerStat>,
    pub live_matches: Vec<LiveMatch>,
    pub last_update: DateTime<Utc>,
    pub is_live: bool,
    pub data_source: DataSource,
}

impl AggregatedPayload {
    /// Equality ignoring `last_update`, which is restamped on every cycle.
    pub fn same_content(&self, other: &AggregatedPayload) -> bool {
        self.next_match == other.next_match
            && self.recent_results == other.recent_results
            && self.standings == other.standings
            && self.player_stats == other.player_stats
            && self.live_matches == other.live_matches
            && self.is_live == other.is_live
            && self.data_source == other.data_source
    }
}

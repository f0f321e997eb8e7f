use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::{info, instrument, warn};

use crate::config::TeamContext;
use crate::emblem::emblem_or_badge;
use crate::error::FetchError;
use crate::http::HttpClient;
use crate::model::sportsdb::{Event, LastEventsDocument, NextEventsDocument};
use crate::model::{MatchFixture, MatchResult, MatchStatus};
use crate::provider::{FootballProvider, parse_utc};

const UPCOMING_LIMIT: usize = 3;
const RESULTS_LIMIT: usize = 5;

/// TheSportsDB free tier. Serves fixtures and results only.
#[derive(Debug)]
pub struct TheSportsDb {
    http: HttpClient,
    base_url: String,
    team_id: String,
    team: TeamContext,
}

impl TheSportsDb {
    pub fn new(http: HttpClient, base_url: String, team_id: String, team: TeamContext) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            team_id,
            team,
        }
    }
}

#[async_trait]
impl FootballProvider for TheSportsDb {
    fn name(&self) -> &str {
        "sportsdb"
    }

    #[instrument(level = "info", skip(self), fields(provider = "sportsdb", team_id = %self.team_id))]
    async fn upcoming_fixtures(&self) -> Result<Vec<MatchFixture>, FetchError> {
        let url = format!("{}/eventsnext.php?id={}", self.base_url, self.team_id);
        let body = self.http.get_text(&url, &[]).await?;
        let fixtures = parse_next_events(&body, &self.team)?;
        info!(count = fixtures.len(), "Fetched upcoming fixtures");
        Ok(fixtures)
    }

    #[instrument(level = "info", skip(self), fields(provider = "sportsdb", team_id = %self.team_id))]
    async fn recent_results(&self) -> Result<Vec<MatchResult>, FetchError> {
        let url = format!("{}/eventslast.php?id={}", self.base_url, self.team_id);
        let body = self.http.get_text(&url, &[]).await?;
        let results = parse_last_events(&body, &self.team)?;
        info!(count = results.len(), "Fetched recent results");
        Ok(results)
    }
}

/// Normalize an `eventsnext.php` body. A `null` event list is an empty schedule.
pub fn parse_next_events(body: &str, team: &TeamContext) -> Result<Vec<MatchFixture>, FetchError> {
    let doc = serde_json::from_str::<NextEventsDocument>(body)?;
    Ok(doc
        .events
        .unwrap_or_default()
        .iter()
        .filter_map(|event| to_fixture(event, team))
        .take(UPCOMING_LIMIT)
        .collect())
}

/// Normalize an `eventslast.php` body. Unparsable scores read as 0.
pub fn parse_last_events(body: &str, team: &TeamContext) -> Result<Vec<MatchResult>, FetchError> {
    let doc = serde_json::from_str::<LastEventsDocument>(body)?;
    Ok(doc
        .results
        .unwrap_or_default()
        .iter()
        .filter_map(|event| {
            let kickoff = kickoff(event)?;
            Some(MatchResult::finished(
                event.id_event.clone(),
                kickoff,
                event.str_home_team.clone(),
                event.str_away_team.clone(),
                (score(event.int_home_score.as_deref()), score(event.int_away_score.as_deref())),
                league(event),
                &team.nation,
            ))
        })
        .take(RESULTS_LIMIT)
        .collect())
}

fn to_fixture(event: &Event, team: &TeamContext) -> Option<MatchFixture> {
    let kickoff = kickoff(event)?;
    Some(MatchFixture {
        id: event.id_event.clone(),
        kickoff,
        local_time: team.local_time(kickoff),
        home_team: event.str_home_team.clone(),
        away_team: event.str_away_team.clone(),
        home_emblem: emblem_or_badge(&event.str_home_team, event.str_home_team_badge.as_deref()),
        away_emblem: emblem_or_badge(&event.str_away_team, event.str_away_team_badge.as_deref()),
        competition: league(event),
        venue: event
            .str_venue
            .clone()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "TBD".to_string()),
        status: event
            .str_status
            .as_deref()
            .map(MatchStatus::from_provider)
            .unwrap_or(MatchStatus::Scheduled),
    })
}

/// Prefer the full timestamp; otherwise combine date and time, defaulting to 20:00 UTC.
fn kickoff(event: &Event) -> Option<DateTime<Utc>> {
    if let Some(ts) = event.str_timestamp.as_deref().and_then(parse_utc) {
        return Some(ts);
    }
    let Some(date) = event
        .date_event
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
    else {
        warn!(event_id = %event.id_event, "Skipping event without a usable date");
        return None;
    };
    let time = event
        .str_time
        .as_deref()
        .and_then(|t| {
            let t = t.trim();
            t.get(..8)
                .and_then(|hms| NaiveTime::parse_from_str(hms, "%H:%M:%S").ok())
                .or_else(|| t.get(..5).and_then(|hm| NaiveTime::parse_from_str(hm, "%H:%M").ok()))
        })
        .or_else(|| NaiveTime::from_hms_opt(20, 0, 0))?;
    Some(date.and_time(time).and_utc())
}

fn score(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0)
}

fn league(event: &Event) -> String {
    event.str_league.clone().unwrap_or_else(|| "International".to_string())
}

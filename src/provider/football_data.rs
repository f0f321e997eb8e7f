use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::config::TeamContext;
use crate::emblem::emblem_for;
use crate::error::FetchError;
use crate::http::HttpClient;
use crate::model::football_data::{Match, MatchesDocument, StandingsDocument};
use crate::model::{LiveMatch, MatchFixture, MatchResult, MatchStatus, StandingsSnapshot};
use crate::provider::{FootballProvider, parse_utc};

const UPCOMING_LIMIT: usize = 5;
const RESULTS_LIMIT: usize = 10;

/// football-data.org v4, authenticated with an `X-Auth-Token` header.
pub struct FootballData {
    http: HttpClient,
    base_url: String,
    api_key: String,
    team_id: u32,
    competition: String,
    team: TeamContext,
}

impl FootballData {
    pub fn new(
        http: HttpClient,
        base_url: String,
        api_key: String,
        team_id: u32,
        competition: String,
        team: TeamContext,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            team_id,
            competition,
            team,
        }
    }

    async fn get(&self, path: &str) -> Result<String, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        self.http.get_text(&url, &[("X-Auth-Token", self.api_key.as_str())]).await
    }

    fn matches_path(&self, status: &str, limit: Option<usize>) -> String {
        match limit {
            Some(limit) => format!("/teams/{}/matches?status={}&limit={}", self.team_id, status, limit),
            None => format!("/teams/{}/matches?status={}", self.team_id, status),
        }
    }
}

#[async_trait]
impl FootballProvider for FootballData {
    fn name(&self) -> &str {
        "football-data"
    }

    #[instrument(level = "info", skip(self), fields(provider = "football-data"))]
    async fn upcoming_fixtures(&self) -> Result<Vec<MatchFixture>, FetchError> {
        let body = self.get(&self.matches_path("SCHEDULED", Some(UPCOMING_LIMIT))).await?;
        let fixtures = parse_fixtures(&body, &self.team)?;
        info!(count = fixtures.len(), "Fetched upcoming fixtures");
        Ok(fixtures)
    }

    #[instrument(level = "info", skip(self), fields(provider = "football-data"))]
    async fn recent_results(&self) -> Result<Vec<MatchResult>, FetchError> {
        let body = self.get(&self.matches_path("FINISHED", Some(RESULTS_LIMIT))).await?;
        let results = parse_results(&body, &self.team)?;
        info!(count = results.len(), "Fetched recent results");
        Ok(results)
    }

    #[instrument(level = "info", skip(self), fields(provider = "football-data", competition = %self.competition))]
    async fn standings(&self) -> Result<Option<StandingsSnapshot>, FetchError> {
        let body = self.get(&format!("/competitions/{}/standings", self.competition)).await?;
        parse_standings(&body, &self.team)
    }

    #[instrument(level = "info", skip(self), fields(provider = "football-data"))]
    async fn live_matches(&self) -> Result<Vec<LiveMatch>, FetchError> {
        let body = self.get(&self.matches_path("LIVE", None)).await?;
        parse_live_matches(&body, &self.team)
    }
}

/// Normalize a `/teams/{id}/matches` body into upcoming fixtures.
pub fn parse_fixtures(body: &str, team: &TeamContext) -> Result<Vec<MatchFixture>, FetchError> {
    let doc = serde_json::from_str::<MatchesDocument>(body)?;
    Ok(doc
        .matches
        .iter()
        .filter_map(|m| to_fixture(m, team))
        .take(UPCOMING_LIMIT)
        .collect())
}

/// Normalize finished matches. Matches without a full-time score are dropped.
pub fn parse_results(body: &str, team: &TeamContext) -> Result<Vec<MatchResult>, FetchError> {
    let doc = serde_json::from_str::<MatchesDocument>(body)?;
    let mut results = Vec::new();
    for m in &doc.matches {
        let (Some(home_score), Some(away_score)) = (m.score.full_time.home, m.score.full_time.away) else {
            continue;
        };
        let Some(fixture) = to_fixture(m, team) else {
            continue;
        };
        let mut result = MatchResult::finished(
            fixture.id,
            fixture.kickoff,
            fixture.home_team,
            fixture.away_team,
            (home_score, away_score),
            fixture.competition,
            &team.nation,
        );
        result.is_live = fixture.status == MatchStatus::Live;
        results.push(result);
        if results.len() == RESULTS_LIMIT {
            break;
        }
    }
    Ok(results)
}

/// In-play matches; a score not yet reported reads as 0.
pub fn parse_live_matches(body: &str, team: &TeamContext) -> Result<Vec<LiveMatch>, FetchError> {
    let doc = serde_json::from_str::<MatchesDocument>(body)?;
    Ok(doc
        .matches
        .iter()
        .filter_map(|m| {
            let mut fixture = to_fixture(m, team)?;
            fixture.status = MatchStatus::Live;
            Some(LiveMatch {
                fixture,
                home_score: m.score.full_time.home.unwrap_or(0),
                away_score: m.score.full_time.away.unwrap_or(0),
                minute: m.minute.unwrap_or(0),
            })
        })
        .collect())
}

/// Find the target nation's row in any group of a `/competitions/{code}/standings` body.
pub fn parse_standings(body: &str, team: &TeamContext) -> Result<Option<StandingsSnapshot>, FetchError> {
    let doc = serde_json::from_str::<StandingsDocument>(body)?;
    let competition = doc.competition.as_ref().map(|c| c.name.as_str());

    for group in &doc.standings {
        let row = group
            .table
            .iter()
            .find(|row| row.team.name.as_deref().is_some_and(|name| team.is_nation(name)));
        if let Some(row) = row {
            return Ok(Some(StandingsSnapshot {
                position: row.position,
                points: row.points,
                played: row.played_games,
                won: row.won,
                drawn: row.draw,
                lost: row.lost,
                goals_for: row.goals_for,
                goals_against: row.goals_against,
                goal_difference: row.goal_difference,
                group: group_label(competition, group.group.as_deref()),
            }));
        }
    }

    warn!(nation = %team.nation, "Target nation not present in standings table");
    Ok(None)
}

fn group_label(competition: Option<&str>, group: Option<&str>) -> String {
    // "GROUP_G" -> "Group G"
    let group = group.map(|g| {
        let g = g.replace('_', " ");
        if let Some(rest) = g.strip_prefix("GROUP ").or_else(|| g.strip_prefix("Group ")) {
            return format!("Group {}", rest);
        }
        g
    });
    match (competition, group) {
        (Some(c), Some(g)) => format!("{} {}", c, g),
        (Some(c), None) => c.to_string(),
        (None, Some(g)) => g,
        (None, None) => "Standings".to_string(),
    }
}

fn to_fixture(m: &Match, team: &TeamContext) -> Option<MatchFixture> {
    let home = m.home_team.name.as_deref()?;
    let away = m.away_team.name.as_deref()?;
    let Some(kickoff) = parse_utc(&m.utc_date) else {
        warn!(match_id = m.id, utc_date = %m.utc_date, "Skipping match with unparsable date");
        return None;
    };
    Some(MatchFixture {
        id: m.id.to_string(),
        kickoff,
        local_time: team.local_time(kickoff),
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_emblem: emblem_for(home).to_string(),
        away_emblem: emblem_for(away).to_string(),
        competition: m.competition.name.clone(),
        venue: m.venue.clone().filter(|v| !v.trim().is_empty()).unwrap_or_else(|| "TBD".to_string()),
        status: MatchStatus::from_provider(&m.status),
    })
}

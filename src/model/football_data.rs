//! Wire shapes for the football-data.org v4 API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchesDocument {
    #[serde(default)]
    pub matches: Vec<Match>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: i64,
    pub utc_date: String,
    pub status: String,
    pub minute: Option<u32>,
    pub venue: Option<String>,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    pub competition: CompetitionRef,
    #[serde(default)]
    pub score: Score,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: Option<i64>,
    // Unannounced knockout slots come back with a null name
    pub name: Option<String>,
    pub crest: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompetitionRef {
    pub name: String,
    pub code: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    #[serde(default)]
    pub full_time: ScoreLine,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ScoreLine {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StandingsDocument {
    pub competition: Option<CompetitionRef>,
    #[serde(default)]
    pub standings: Vec<StandingGroup>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StandingGroup {
    pub group: Option<String>,
    #[serde(rename = "type")]
    pub type_field: Option<String>,
    #[serde(default)]
    pub table: Vec<TableRow>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub position: u32,
    pub team: TeamRef,
    pub played_games: u32,
    pub won: u32,
    pub draw: u32,
    pub lost: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
}

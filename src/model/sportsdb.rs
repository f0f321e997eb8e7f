//! Wire shapes for TheSportsDB v1. Every value arrives as an optional string.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct NextEventsDocument {
    // `null` when the team has nothing scheduled
    pub events: Option<Vec<Event>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LastEventsDocument {
    pub results: Option<Vec<Event>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "idEvent")]
    pub id_event: String,
    #[serde(rename = "dateEvent")]
    pub date_event: Option<String>,
    #[serde(rename = "strTime")]
    pub str_time: Option<String>,
    #[serde(rename = "strTimestamp")]
    pub str_timestamp: Option<String>,
    #[serde(rename = "strHomeTeam")]
    pub str_home_team: String,
    #[serde(rename = "strAwayTeam")]
    pub str_away_team: String,
    #[serde(rename = "strHomeTeamBadge")]
    pub str_home_team_badge: Option<String>,
    #[serde(rename = "strAwayTeamBadge")]
    pub str_away_team_badge: Option<String>,
    #[serde(rename = "strLeague")]
    pub str_league: Option<String>,
    #[serde(rename = "strVenue")]
    pub str_venue: Option<String>,
    #[serde(rename = "intHomeScore")]
    pub int_home_score: Option<String>,
    #[serde(rename = "intAwayScore")]
    pub int_away_score: Option<String>,
    #[serde(rename = "strStatus")]
    pub str_status: Option<String>,
}

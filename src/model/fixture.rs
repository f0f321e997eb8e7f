use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
}

impl MatchStatus {
    /// Map a provider status string onto the three canonical states.
    /// Anything not recognised as in progress or over is treated as scheduled.
    pub fn from_provider(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "LIVE" | "IN_PLAY" | "PAUSED" | "1H" | "2H" | "HT" | "ET" => MatchStatus::Live,
            "FINISHED" | "AWARDED" | "FT" | "MATCH FINISHED" | "AET" | "PEN" => MatchStatus::Finished,
            _ => MatchStatus::Scheduled,
        }
    }
}

/// An upcoming (or in-progress) match as shown on the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFixture {
    pub id: String,
    pub kickoff: DateTime<Utc>,
    /// Kick-off wall clock ("HH:MM") in the home nation's time zone.
    pub local_time: String,
    pub home_team: String,
    pub away_team: String,
    pub home_emblem: String,
    pub away_emblem: String,
    pub competition: String,
    pub venue: String,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMatch {
    #[serde(flatten)]
    pub fixture: MatchFixture,
    pub home_score: u32,
    pub away_score: u32,
    pub minute: u32,
}

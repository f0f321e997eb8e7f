use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Match outcome from the target nation's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl Outcome {
    /// Equal scores draw; otherwise the target nation wins iff its side scored more.
    pub fn from_scores(target_is_home: bool, home_score: u32, away_score: u32) -> Self {
        if home_score == away_score {
            return Outcome::Draw;
        }
        let (ours, theirs) = if target_is_home {
            (home_score, away_score)
        } else {
            (away_score, home_score)
        };
        if ours > theirs { Outcome::Win } else { Outcome::Loss }
    }

    /// The same match seen from the opposing side.
    pub fn inverse(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Draw => Outcome::Draw,
            Outcome::Loss => Outcome::Win,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Draw => "D",
            Outcome::Loss => "L",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub id: String,
    pub date: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub competition: String,
    pub outcome: Outcome,
    pub is_live: bool,
}

impl MatchResult {
    /// Build a finished result, deriving the outcome for `nation`.
    pub fn finished(
        id: impl Into<String>,
        date: DateTime<Utc>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        (home_score, away_score): (u32, u32),
        competition: impl Into<String>,
        nation: &str,
    ) -> Self {
        let home_team = home_team.into();
        let target_is_home = same_team(&home_team, nation);
        MatchResult {
            id: id.into(),
            date,
            away_team: away_team.into(),
            home_team,
            home_score,
            away_score,
            competition: competition.into(),
            outcome: Outcome::from_scores(target_is_home, home_score, away_score),
            is_live: false,
        }
    }

    pub fn is_home_for(&self, team: &str) -> bool {
        same_team(&self.home_team, team)
    }

    /// Outcome recomputed from an arbitrary team's side of this match.
    pub fn outcome_for(&self, team: &str) -> Outcome {
        Outcome::from_scores(self.is_home_for(team), self.home_score, self.away_score)
    }

    /// (goals for, goals against) from `team`'s side.
    pub fn goals_for(&self, team: &str) -> (u32, u32) {
        if self.is_home_for(team) {
            (self.home_score, self.away_score)
        } else {
            (self.away_score, self.home_score)
        }
    }
}

// Providers pad and recase names inconsistently
fn same_team(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

use serde::{Deserialize, Serialize};

use crate::model::match_result::{MatchResult, Outcome};

pub const RECENT_FORM_GROUP: &str = "Recent Form";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsSnapshot {
    pub position: u32,
    pub points: u32,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub group: String,
}

impl StandingsSnapshot {
    /// Tally a form table from a result list. Goals are attributed per side
    /// depending on whether `nation` was home or away in each match.
    /// Tallies saturate, so absurd provider scores yield an inconsistent
    /// table rather than an overflow.
    pub fn from_results(results: &[MatchResult], nation: &str) -> Self {
        let mut won: u32 = 0;
        let mut drawn: u32 = 0;
        let mut lost: u32 = 0;
        let mut goals_for: u32 = 0;
        let mut goals_against: u32 = 0;

        for result in results {
            match result.outcome_for(nation) {
                Outcome::Win => won = won.saturating_add(1),
                Outcome::Draw => drawn = drawn.saturating_add(1),
                Outcome::Loss => lost = lost.saturating_add(1),
            }
            let (scored, conceded) = result.goals_for(nation);
            goals_for = goals_for.saturating_add(scored);
            goals_against = goals_against.saturating_add(conceded);
        }

        let difference = i64::from(goals_for) - i64::from(goals_against);
        StandingsSnapshot {
            position: 1,
            points: won.saturating_mul(3).saturating_add(drawn),
            played: won.saturating_add(drawn).saturating_add(lost),
            won,
            drawn,
            lost,
            goals_for,
            goals_against,
            goal_difference: i32::try_from(difference).unwrap_or(if difference < 0 { i32::MIN } else { i32::MAX }),
            group: RECENT_FORM_GROUP.to_string(),
        }
    }

    /// Position is 1-based and the points, played and goal-difference
    /// identities hold. A tally that overflows counts as inconsistent.
    pub fn is_consistent(&self) -> bool {
        let points = self.won.checked_mul(3).and_then(|p| p.checked_add(self.drawn));
        let played = self.won.checked_add(self.drawn).and_then(|p| p.checked_add(self.lost));
        let difference = i64::from(self.goals_for) - i64::from(self.goals_against);

        self.position >= 1
            && points == Some(self.points)
            && played == Some(self.played)
            && i64::from(self.goal_difference) == difference
    }
}

pub mod fixture;
pub mod football_data;
pub mod match_result;
pub mod payload;
pub mod player;
pub mod sportsdb;
pub mod standings;

pub use fixture::{LiveMatch, MatchFixture, MatchStatus};
pub use match_result::{MatchResult, Outcome};
pub use payload::{AggregatedPayload, DataSource};
pub use player::PlayerStat;
pub use standings::StandingsSnapshot;

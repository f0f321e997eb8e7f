use chrono::{TimeZone, Utc};

use fennec_live_stats::TeamContext;
use fennec_live_stats::model::{MatchStatus, Outcome};
use fennec_live_stats::provider::football_data::{parse_fixtures, parse_live_matches, parse_results, parse_standings};

fn load_fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {}", path, e))
}

#[test]
fn parses_scheduled_matches_into_fixtures() {
    let body = load_fixture("football_data_scheduled.json");
    let fixtures = parse_fixtures(&body, &TeamContext::default()).expect("parse_fixtures failed");

    // The third match has no teams drawn yet
    assert_eq!(fixtures.len(), 2, "fixtures were: {:?}", fixtures);

    let first = &fixtures[0];
    assert_eq!(first.id, "498712");
    assert_eq!(first.kickoff, Utc.with_ymd_and_hms(2025, 12, 24, 19, 0, 0).unwrap());
    assert_eq!(first.local_time, "20:00");
    assert_eq!(first.home_team, "Algeria");
    assert_eq!(first.away_team, "Sudan");
    assert_eq!(first.home_emblem, "https://flagcdn.com/w320/dz.png");
    assert_eq!(first.away_emblem, "https://flagcdn.com/w320/sd.png");
    assert_eq!(first.competition, "Africa Cup of Nations");
    assert_eq!(first.venue, "Prince Moulay Abdellah Stadium");
    assert_eq!(first.status, MatchStatus::Scheduled);

    let second = &fixtures[1];
    assert_eq!(second.local_time, "17:30");
    assert_eq!(second.venue, "TBD");
    assert_eq!(second.away_team, "Algeria");
}

#[test]
fn parses_finished_matches_with_outcomes() {
    let body = load_fixture("football_data_finished.json");
    let results = parse_results(&body, &TeamContext::default()).expect("parse_results failed");

    // The awarded match without a score is dropped
    assert_eq!(results.len(), 3, "results were: {:?}", results);

    assert_eq!(results[0].id, "470001");
    assert_eq!((results[0].home_score, results[0].away_score), (2, 0));
    assert_eq!(results[0].outcome, Outcome::Win);

    assert_eq!(results[1].home_team, "Togo");
    assert_eq!(results[1].outcome, Outcome::Loss);

    assert_eq!(results[2].outcome, Outcome::Draw);
    assert!(results.iter().all(|r| !r.is_live));
}

#[test]
fn outcomes_follow_configured_nation() {
    let body = load_fixture("football_data_finished.json");
    let togo = TeamContext::new("Togo", chrono_tz::Africa::Lome);
    let results = parse_results(&body, &togo).expect("parse_results failed");

    assert_eq!(results[1].outcome, Outcome::Win);
}

#[test]
fn parses_live_match_with_missing_score_as_zero() {
    let body = load_fixture("football_data_live.json");
    let live = parse_live_matches(&body, &TeamContext::default()).expect("parse_live_matches failed");

    assert_eq!(live.len(), 1);
    let m = &live[0];
    assert_eq!(m.fixture.status, MatchStatus::Live);
    assert_eq!(m.home_score, 1);
    assert_eq!(m.away_score, 0);
    assert_eq!(m.minute, 63);
}

#[test]
fn finds_nation_row_in_any_group() {
    let body = load_fixture("football_data_standings.json");
    let standings = parse_standings(&body, &TeamContext::default())
        .expect("parse_standings failed")
        .expect("expected Algeria in the table");

    assert_eq!(standings.position, 1);
    assert_eq!(standings.points, 15);
    assert_eq!(standings.played, 6);
    assert_eq!((standings.won, standings.drawn, standings.lost), (5, 0, 1));
    assert_eq!((standings.goals_for, standings.goals_against), (16, 6));
    assert_eq!(standings.goal_difference, 10);
    assert_eq!(standings.group, "AFCON Qualifiers Group G");
    assert!(standings.is_consistent());
}

#[test]
fn missing_nation_in_standings_is_none() {
    let body = load_fixture("football_data_standings.json");
    let morocco = TeamContext::new("Morocco", chrono_tz::Africa::Casablanca);
    let standings = parse_standings(&body, &morocco).expect("parse_standings failed");

    assert!(standings.is_none());
}

#[test]
fn malformed_body_is_an_error() {
    let err = parse_fixtures("<html>rate limited</html>", &TeamContext::default()).unwrap_err();
    assert!(!err.is_retryable(), "error was: {}", err);
}

#[test]
fn oversized_table_row_parses_but_is_flagged_inconsistent() {
    let body = r#"{
        "competition": { "name": "AFCON Qualifiers" },
        "standings": [{
            "group": "GROUP_G",
            "table": [{
                "position": 1,
                "team": { "id": 5616, "name": "Algeria" },
                "playedGames": 6, "won": 2000000000, "draw": 0, "lost": 1,
                "points": 15, "goalsFor": 16, "goalsAgainst": 6, "goalDifference": 10
            }]
        }]
    }"#;
    let standings = parse_standings(body, &TeamContext::default())
        .expect("parse_standings failed")
        .expect("expected Algeria in the table");

    assert_eq!(standings.won, 2_000_000_000);
    assert!(!standings.is_consistent());
}

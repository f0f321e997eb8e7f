use fennec_live_stats::model::{MatchStatus, Outcome};
use fennec_live_stats::{DataSource, FallbackError, FallbackResolver, TeamContext};

#[test]
fn verified_snapshot_is_internally_consistent() {
    let payload = FallbackResolver::default().snapshot();

    assert_eq!(payload.data_source, DataSource::VerifiedStatic);
    assert!(!payload.is_live);
    assert!(payload.live_matches.is_empty());
    assert!(payload.standings.is_consistent());
    assert_eq!(payload.standings.points, 15);
    assert_eq!(payload.standings.lost, 1);
    assert_eq!(payload.standings.group, "AFCON Qualifiers Group G");

    assert_eq!(payload.next_match.home_team, "Algeria");
    assert_eq!(payload.next_match.away_team, "Burkina Faso");
    assert_eq!(payload.next_match.status, MatchStatus::Scheduled);
    assert_eq!(payload.next_match.away_emblem, "https://flagcdn.com/w320/bf.png");

    assert_eq!(payload.recent_results.len(), 6);
    assert_eq!(payload.player_stats.len(), 4);
}

#[test]
fn fallback_results_carry_derived_outcomes() {
    let results = FallbackResolver::default().recent_results();
    for r in &results {
        assert_eq!(r.outcome, r.outcome_for("Algeria"), "result {}", r.id);
    }
    let losses = results.iter().filter(|r| r.outcome == Outcome::Loss).count();
    assert_eq!(losses, 1);
}

#[test]
fn snapshot_is_deterministic() {
    let resolver = FallbackResolver::default();
    assert_eq!(resolver.snapshot(), resolver.snapshot());
    assert_eq!(FallbackResolver::default().snapshot(), resolver.snapshot());
}

#[test]
fn rejects_custom_snapshot_with_broken_standings() {
    let mut payload = FallbackResolver::default().snapshot();
    payload.standings.goal_difference = 3;

    let err = FallbackResolver::with_snapshot("Algeria", payload).unwrap_err();
    assert!(matches!(err, FallbackError::InconsistentStandings { goal_difference: 3, .. }));
}

#[test]
fn custom_snapshot_is_tagged_as_static() {
    let mut payload = FallbackResolver::default().snapshot();
    payload.data_source = DataSource::Live { providers: vec!["sportsdb".to_string()] };

    let resolver = FallbackResolver::with_snapshot("Algeria", payload).unwrap();
    assert_eq!(resolver.snapshot().data_source, DataSource::VerifiedStatic);
}

#[test]
fn default_snapshot_covers_only_its_own_nation() {
    let resolver = FallbackResolver::default();

    assert_eq!(resolver.nation(), "Algeria");
    assert!(resolver.covers(&TeamContext::default()));
    assert!(resolver.covers(&TeamContext::new(" algeria ", chrono_tz::Africa::Algiers)));
    assert!(!resolver.covers(&TeamContext::new("Morocco", chrono_tz::Africa::Casablanca)));
}

#[test]
fn custom_snapshot_covers_its_declared_nation() {
    let resolver = FallbackResolver::with_snapshot("Morocco", FallbackResolver::default().snapshot()).unwrap();

    assert!(resolver.covers(&TeamContext::new("Morocco", chrono_tz::Africa::Casablanca)));
    assert!(!resolver.covers(&TeamContext::default()));
}

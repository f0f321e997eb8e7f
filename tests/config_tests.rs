use std::collections::HashMap;
use std::time::Duration;

use fennec_live_stats::config::ProviderConfig;
use fennec_live_stats::{AggregatorConfig, ChangeDetection, ConfigError};

fn from_pairs(pairs: &[(&str, &str)]) -> Result<AggregatorConfig, ConfigError> {
    let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    AggregatorConfig::from_lookup(|key| env.get(key).cloned())
}

fn provider_names(config: &AggregatorConfig) -> Vec<&'static str> {
    config.providers.iter().map(|p| p.name()).collect()
}

#[test]
fn defaults_without_environment() {
    let config = from_pairs(&[]).expect("defaults should load");

    assert_eq!(config.team.nation, "Algeria");
    assert_eq!(config.team.timezone, chrono_tz::Africa::Algiers);
    assert_eq!(config.poll_interval, Duration::from_secs(300));
    assert_eq!(config.change_detection, ChangeDetection::Structural);
    assert!(config.compute_standings);
    assert_eq!(config.http.retry.max_attempts, 3);
    assert_eq!(provider_names(&config), vec!["sportsdb", "football-data"]);
}

#[test]
fn overrides_from_environment() {
    let config = from_pairs(&[
        ("FENNEC_TARGET_NATION", "Morocco"),
        ("FENNEC_TIMEZONE", "Africa/Casablanca"),
        ("FENNEC_POLL_SECS", " 600 "),
        ("FENNEC_CHANGE_DETECTION", "Coarse"),
        ("FENNEC_COMPUTE_STANDINGS", "false"),
        ("FENNEC_RETRY_ATTEMPTS", "5"),
        ("FENNEC_RETRY_BASE_MS", "250"),
        ("FENNEC_PROVIDERS", "football-data"),
        ("FOOTBALL_DATA_API_KEY", "secret-token"),
        ("FOOTBALL_DATA_TEAM_ID", "815"),
    ])
    .expect("config should load");

    assert_eq!(config.team.nation, "Morocco");
    assert_eq!(config.poll_interval, Duration::from_secs(600));
    assert_eq!(config.change_detection, ChangeDetection::Coarse);
    assert!(!config.compute_standings);
    assert_eq!(config.http.retry.max_attempts, 5);
    assert_eq!(config.http.retry.initial_delay, Duration::from_millis(250));

    match &config.providers[..] {
        [ProviderConfig::FootballData { api_key, team_id, .. }] => {
            assert_eq!(api_key.as_deref(), Some("secret-token"));
            assert_eq!(*team_id, 815);
        }
        other => panic!("unexpected providers: {:?}", other),
    }
}

#[test]
fn blank_values_are_unset() {
    let config = from_pairs(&[("FENNEC_TARGET_NATION", "  "), ("FOOTBALL_DATA_API_KEY", "")]).expect("config should load");

    assert_eq!(config.team.nation, "Algeria");
    assert!(matches!(
        &config.providers[1],
        ProviderConfig::FootballData { api_key: None, .. }
    ));
}

#[test]
fn api_key_is_redacted_in_debug_output() {
    let config = from_pairs(&[("FOOTBALL_DATA_API_KEY", "secret-token")]).expect("config should load");
    let debug = format!("{:?}", config);

    assert!(!debug.contains("secret-token"), "debug was: {}", debug);
    assert!(debug.contains("<redacted>"), "debug was: {}", debug);
}

#[test]
fn provider_order_is_deduplicated() {
    let config = from_pairs(&[("FENNEC_PROVIDERS", "footballdata, TheSportsDB, football-data")]).expect("config should load");
    assert_eq!(provider_names(&config), vec!["football-data", "sportsdb"]);
}

#[test]
fn rejects_unknown_provider() {
    let err = from_pairs(&[("FENNEC_PROVIDERS", "sportsdb,api-football")]).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownProvider(ref name) if name == "api-football"), "error was: {}", err);
}

#[test]
fn rejects_invalid_timezone() {
    let err = from_pairs(&[("FENNEC_TIMEZONE", "Mars/Olympus_Mons")]).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "FENNEC_TIMEZONE", .. }), "error was: {}", err);
}

#[test]
fn rejects_zero_poll_period() {
    let err = from_pairs(&[("FENNEC_POLL_SECS", "0")]).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "FENNEC_POLL_SECS", .. }), "error was: {}", err);
}

#[test]
fn rejects_unknown_change_detection() {
    let err = from_pairs(&[("FENNEC_CHANGE_DETECTION", "deep")]).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "FENNEC_CHANGE_DETECTION", .. }));
}

#[test]
fn rejects_non_numeric_retry_attempts() {
    let err = from_pairs(&[("FENNEC_RETRY_ATTEMPTS", "three")]).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "FENNEC_RETRY_ATTEMPTS", .. }));
}

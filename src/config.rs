use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::ConfigError;
use crate::scheduler::ChangeDetection;

/// The nation whose point of view every outcome and tally is computed from.
#[derive(Debug, Clone)]
pub struct TeamContext {
    pub nation: String,
    pub timezone: Tz,
}

impl TeamContext {
    pub fn new(nation: impl Into<String>, timezone: Tz) -> Self {
        Self { nation: nation.into(), timezone }
    }

    pub fn is_nation(&self, team: &str) -> bool {
        team.trim().eq_ignore_ascii_case(self.nation.trim())
    }

    /// Kick-off wall clock in the nation's time zone.
    pub fn local_time(&self, kickoff: DateTime<Utc>) -> String {
        kickoff.with_timezone(&self.timezone).format("%H:%M").to_string()
    }
}

impl Default for TeamContext {
    fn default() -> Self {
        Self::new("Algeria", chrono_tz::Africa::Algiers)
    }
}

/// Backoff schedule for a single provider call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: u32,
}

impl RetryPolicy {
    pub fn next_delay(&self, delay: Duration) -> Duration {
        delay
            .saturating_mul(self.backoff_multiplier.max(1))
            .min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// One upstream provider, in the order it should be tried.
#[derive(Clone)]
pub enum ProviderConfig {
    FootballData {
        base_url: String,
        api_key: Option<String>,
        team_id: u32,
        competition: String,
    },
    SportsDb {
        base_url: String,
        team_id: String,
    },
}

impl ProviderConfig {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderConfig::FootballData { .. } => "football-data",
            ProviderConfig::SportsDb { .. } => "sportsdb",
        }
    }
}

// Keep API keys out of logs
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::FootballData { base_url, api_key, team_id, competition } => f
                .debug_struct("FootballData")
                .field("base_url", base_url)
                .field("api_key", &api_key.as_ref().map(|_| "<redacted>"))
                .field("team_id", team_id)
                .field("competition", competition)
                .finish(),
            ProviderConfig::SportsDb { base_url, team_id } => f
                .debug_struct("SportsDb")
                .field("base_url", base_url)
                .field("team_id", team_id)
                .finish(),
        }
    }
}

/// Configuration for a DataAggregator instance.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub team: TeamContext,
    /// Period of the subscriber polling timer
    pub poll_interval: Duration,
    pub change_detection: ChangeDetection,
    /// Tally standings from live results when no provider serves a table
    pub compute_standings: bool,
    pub http: HttpConfig,
    pub providers: Vec<ProviderConfig>,
}

pub const FOOTBALL_DATA_BASE_URL: &str = "https://api.football-data.org/v4";
pub const SPORTSDB_BASE_URL: &str = "https://www.thesportsdb.com/api/v1/json/3";

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            team: TeamContext::default(),
            poll_interval: Duration::from_secs(5 * 60),
            change_detection: ChangeDetection::Structural,
            compute_standings: true,
            http: HttpConfig::default(),
            providers: vec![
                ProviderConfig::SportsDb {
                    base_url: SPORTSDB_BASE_URL.to_string(),
                    team_id: "134516".to_string(),
                },
                ProviderConfig::FootballData {
                    base_url: FOOTBALL_DATA_BASE_URL.to_string(),
                    api_key: None,
                    team_id: 5616,
                    competition: "2016".to_string(),
                },
            ],
        }
    }
}

impl AggregatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, starting from defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(nation) = get("FENNEC_TARGET_NATION") {
            config.team.nation = nation;
        }
        if let Some(tz) = get("FENNEC_TIMEZONE") {
            config.team.timezone = tz.parse::<Tz>().map_err(|e| ConfigError::Invalid {
                key: "FENNEC_TIMEZONE",
                value: tz.clone(),
                reason: e.to_string(),
            })?;
        }
        if let Some(secs) = get("FENNEC_POLL_SECS") {
            let secs: u64 = parse_value("FENNEC_POLL_SECS", &secs)?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    key: "FENNEC_POLL_SECS",
                    value: secs.to_string(),
                    reason: "polling period must be positive".to_string(),
                });
            }
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(mode) = get("FENNEC_CHANGE_DETECTION") {
            config.change_detection = match mode.to_ascii_lowercase().as_str() {
                "structural" => ChangeDetection::Structural,
                "coarse" => ChangeDetection::Coarse,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "FENNEC_CHANGE_DETECTION",
                        value: mode,
                        reason: "expected `structural` or `coarse`".to_string(),
                    });
                }
            };
        }
        if let Some(flag) = get("FENNEC_COMPUTE_STANDINGS") {
            config.compute_standings = parse_value("FENNEC_COMPUTE_STANDINGS", &flag)?;
        }
        if let Some(secs) = get("FENNEC_HTTP_TIMEOUT_SECS") {
            config.http.timeout = Duration::from_secs(parse_value("FENNEC_HTTP_TIMEOUT_SECS", &secs)?);
        }
        if let Some(attempts) = get("FENNEC_RETRY_ATTEMPTS") {
            let attempts: u32 = parse_value("FENNEC_RETRY_ATTEMPTS", &attempts)?;
            config.http.retry.max_attempts = attempts.max(1);
        }
        if let Some(ms) = get("FENNEC_RETRY_BASE_MS") {
            config.http.retry.initial_delay = Duration::from_millis(parse_value("FENNEC_RETRY_BASE_MS", &ms)?);
        }

        let football_data = ProviderConfig::FootballData {
            base_url: get("FOOTBALL_DATA_BASE_URL").unwrap_or_else(|| FOOTBALL_DATA_BASE_URL.to_string()),
            api_key: get("FOOTBALL_DATA_API_KEY"),
            team_id: match get("FOOTBALL_DATA_TEAM_ID") {
                Some(id) => parse_value("FOOTBALL_DATA_TEAM_ID", &id)?,
                None => 5616,
            },
            competition: get("FOOTBALL_DATA_COMPETITION").unwrap_or_else(|| "2016".to_string()),
        };
        let sportsdb = ProviderConfig::SportsDb {
            base_url: get("SPORTSDB_BASE_URL").unwrap_or_else(|| SPORTSDB_BASE_URL.to_string()),
            team_id: get("SPORTSDB_TEAM_ID").unwrap_or_else(|| "134516".to_string()),
        };

        let order = get("FENNEC_PROVIDERS").unwrap_or_else(|| "sportsdb,football-data".to_string());
        let mut providers = Vec::new();
        for name in order.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let provider = match name.to_ascii_lowercase().as_str() {
                "sportsdb" | "thesportsdb" => sportsdb.clone(),
                "football-data" | "footballdata" => football_data.clone(),
                _ => return Err(ConfigError::UnknownProvider(name.to_string())),
            };
            if !providers.iter().any(|p: &ProviderConfig| p.name() == provider.name()) {
                providers.push(provider);
            }
        }
        config.providers = providers;

        Ok(config)
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

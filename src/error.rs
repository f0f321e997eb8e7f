use thiserror::Error;

/// Failure of a single provider call.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("provider unreachable at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("provider returned status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("malformed provider response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl FetchError {
    /// Transport and status failures are retried; malformed bodies are not.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FetchError::Malformed(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("unknown provider {0:?} in FENNEC_PROVIDERS")]
    UnknownProvider(String),
}

#[derive(Debug, Error)]
pub enum FallbackError {
    #[error(
        "fallback standings are inconsistent: points={points}, won={won}, drawn={drawn}, lost={lost}, played={played}, gf={goals_for}, ga={goals_against}, gd={goal_difference}"
    )]
    InconsistentStandings {
        points: u32,
        won: u32,
        drawn: u32,
        lost: u32,
        played: u32,
        goals_for: u32,
        goals_against: u32,
        goal_difference: i32,
    },
}

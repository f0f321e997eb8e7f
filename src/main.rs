use fennec_live_stats::{AggregatorConfig, DataAggregator};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

type Error = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env before the filter reads RUST_LOG
    let dotenv = dotenvy::dotenv();

    // Initialize structured logging with tracing
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .try_init();

    if let Err(e) = dotenv {
        warn!(error = %e, "No .env file loaded");
    }

    let config = match AggregatorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    let aggregator = DataAggregator::new(&config);

    // Initial load before the first subscription tick
    let initial = aggregator.get_all().await;
    info!(
        next_match = %format!("{} vs {}", initial.next_match.home_team, initial.next_match.away_team),
        results = initial.recent_results.len(),
        data_source = %initial.data_source,
        "Initial football data loaded"
    );

    let subscription = aggregator.subscribe(|payload| match serde_json::to_string(payload) {
        Ok(json) => info!(payload = %json, "Football data updated"),
        Err(e) => error!(error = %e, "Failed to serialize payload"),
    });

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    subscription.unsubscribe();

    Ok(())
}

//! Background weather collection scheduler
//!
//! Optional automatic collection from Open-Meteo, enabled via environment
//! variables:
//!
//! - `SKYLOG_COLLECT_INTERVAL`: Interval in seconds (e.g., "3600" for hourly)
//! - `SKYLOG_LATITUDE` / `SKYLOG_LONGITUDE`: Collection coordinates
//!
//! The scheduler runs in the background and inserts one observation per tick.

use std::time::Duration;

use tokio::time::interval;
use tracing::{error, info, warn};

use skylog_core::collector::OpenMeteoClient;
use skylog_core::Database;

/// Configuration for scheduled collection
#[derive(Debug, Clone)]
pub struct CollectorScheduleConfig {
    /// Interval between collections in seconds
    pub interval_secs: u64,
}

impl CollectorScheduleConfig {
    /// Parse configuration from environment variables
    ///
    /// Returns None if collection is not configured (SKYLOG_COLLECT_INTERVAL
    /// not set).
    pub fn from_env() -> Option<Self> {
        let interval_secs: u64 = std::env::var("SKYLOG_COLLECT_INTERVAL")
            .ok()
            .and_then(|s| s.parse().ok())?;

        if interval_secs == 0 {
            warn!("SKYLOG_COLLECT_INTERVAL is 0, automatic collection disabled");
            return None;
        }

        Some(Self { interval_secs })
    }
}

/// Start the collection scheduler as a background task
///
/// Spawns a tokio task that runs indefinitely, fetching current conditions
/// from Open-Meteo at the configured interval. The first tick fires
/// immediately, which doubles as a startup collection.
pub fn start_collector_scheduler(db: Database, config: CollectorScheduleConfig) {
    info!(
        "Starting weather collection scheduler: every {} seconds",
        config.interval_secs
    );

    tokio::spawn(async move {
        let client = OpenMeteoClient::from_env();
        let mut ticker = interval(Duration::from_secs(config.interval_secs));

        loop {
            ticker.tick().await;

            match run_collection(&db, &client).await {
                Ok(id) => {
                    info!(observation_id = id, "Scheduled collection completed");
                }
                Err(e) => {
                    error!("Scheduled collection failed: {}", e);
                }
            }
        }
    });
}

/// Run a single collection
async fn run_collection(db: &Database, client: &OpenMeteoClient) -> Result<i64, String> {
    let observation = client
        .fetch_current()
        .await
        .map_err(|e| format!("Failed to fetch weather data: {}", e))?;

    info!(
        location = %observation.location,
        temperature = observation.temperature,
        humidity = observation.humidity,
        "Collected weather observation"
    );

    db.insert_observation(&observation)
        .map_err(|e| format!("Failed to store observation: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_not_set() {
        // When SKYLOG_COLLECT_INTERVAL is not set, should return None
        std::env::remove_var("SKYLOG_COLLECT_INTERVAL");
        assert!(CollectorScheduleConfig::from_env().is_none());
    }

    #[test]
    fn test_config_from_env_zero() {
        // When SKYLOG_COLLECT_INTERVAL is 0, should return None
        std::env::set_var("SKYLOG_COLLECT_INTERVAL", "0");
        assert!(CollectorScheduleConfig::from_env().is_none());
        std::env::remove_var("SKYLOG_COLLECT_INTERVAL");
    }
}

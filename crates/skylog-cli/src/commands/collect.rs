//! Open-Meteo collection command

use std::time::Duration;

use anyhow::{Context, Result};
use skylog_core::collector::OpenMeteoClient;
use skylog_core::db::Database;

pub async fn cmd_collect(db: &Database, interval: Option<u64>) -> Result<()> {
    let client = OpenMeteoClient::from_env();

    match interval {
        None => {
            collect_once(db, &client).await?;
        }
        Some(secs) => {
            println!("🌦️  Collecting every {} seconds (Ctrl-C to stop)...", secs);
            let mut ticker = tokio::time::interval(Duration::from_secs(secs.max(1)));
            loop {
                ticker.tick().await;
                if let Err(e) = collect_once(db, &client).await {
                    eprintln!("⚠️  Collection failed: {}", e);
                }
            }
        }
    }

    Ok(())
}

async fn collect_once(db: &Database, client: &OpenMeteoClient) -> Result<()> {
    let observation = client
        .fetch_current()
        .await
        .context("Failed to fetch weather data from Open-Meteo")?;

    println!(
        "🌡️  {}: {:.1}°C, {:.0}% humidity, {:.1} km/h wind, {}",
        observation.location,
        observation.temperature,
        observation.humidity,
        observation.wind_speed,
        observation.condition,
    );

    let id = db
        .insert_observation(&observation)
        .context("Failed to store observation")?;
    println!("✅ Observation #{} recorded", id);

    Ok(())
}

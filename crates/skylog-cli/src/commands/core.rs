//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_stats` - Show windowed statistics

use std::path::Path;

use anyhow::{Context, Result};
use skylog_core::db::Database;

/// Open the database, running migrations if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Collect weather data: skylog collect");
    println!("  2. Start web UI: skylog serve");

    Ok(())
}

pub fn cmd_stats(db: &Database, days: u32) -> Result<()> {
    let stats = db.stats(days)?;

    println!("📊 Weather statistics (last {} days)", days);
    println!("   ─────────────────────────────");

    if stats.count == 0 {
        println!("   No observations in this window.");
        return Ok(());
    }

    println!("   Data points: {}", stats.count);
    println!("   🌡️  Avg temperature: {:.1}°C", stats.avg_temperature);
    println!(
        "   🌡️  Range: {:.1}°C - {:.1}°C",
        stats.min_temperature, stats.max_temperature
    );
    println!("   💧 Avg humidity: {:.1}%", stats.avg_humidity);
    println!("   💨 Avg wind speed: {:.1} km/h", stats.avg_wind_speed);

    if let Some(period) = stats.period {
        println!(
            "   Period: {} - {}",
            period.start.format("%Y-%m-%d %H:%M"),
            period.end.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}

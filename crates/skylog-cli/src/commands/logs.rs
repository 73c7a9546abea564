//! Observation commands (add, list, latest)

use anyhow::{bail, Result};
use skylog_core::db::Database;
use skylog_core::models::{NewObservation, ObservationFilter, WeatherObservation};

/// Arguments for `skylog add`
pub struct AddArgs {
    pub location: String,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub condition: String,
    pub rain_probability: Option<f64>,
    pub pressure: Option<f64>,
    pub feels_like: Option<f64>,
    pub uv_index: Option<f64>,
}

pub fn cmd_add(db: &Database, args: AddArgs) -> Result<()> {
    if !(0.0..=100.0).contains(&args.humidity) {
        bail!("Humidity must be between 0 and 100");
    }
    if args.wind_speed < 0.0 {
        bail!("Wind speed cannot be negative");
    }
    if let Some(rain) = args.rain_probability {
        if !(0.0..=100.0).contains(&rain) {
            bail!("Rain probability must be between 0 and 100");
        }
    }

    let id = db.insert_observation(&NewObservation {
        location: args.location,
        temperature: args.temperature,
        humidity: args.humidity,
        wind_speed: args.wind_speed,
        condition: args.condition,
        rain_probability: args.rain_probability,
        pressure: args.pressure,
        feels_like: args.feels_like,
        uv_index: args.uv_index,
        timestamp: None,
    })?;

    println!("✅ Observation #{} recorded", id);
    Ok(())
}

pub fn cmd_logs_list(db: &Database, limit: i64, location: Option<&str>) -> Result<()> {
    let filter = ObservationFilter {
        location: location.map(|s| s.to_string()),
        limit: Some(limit),
        ..Default::default()
    };
    let observations = db.list_observations(&filter)?;

    if observations.is_empty() {
        println!("No observations recorded yet. Try: skylog collect");
        return Ok(());
    }

    println!(
        "{:<6} {:<17} {:<24} {:>8} {:>7} {:>8}  {}",
        "ID", "Timestamp", "Location", "Temp", "Hum", "Wind", "Condition"
    );
    for obs in &observations {
        println!(
            "{:<6} {:<17} {:<24} {:>7.1}° {:>6.0}% {:>8.1}  {}",
            obs.id,
            obs.timestamp.format("%Y-%m-%d %H:%M"),
            super::truncate(&obs.location, 24),
            obs.temperature,
            obs.humidity,
            obs.wind_speed,
            obs.condition,
        );
    }

    Ok(())
}

pub fn cmd_logs_latest(db: &Database) -> Result<()> {
    match db.latest_observation()? {
        Some(obs) => print_observation(&obs),
        None => println!("No observations recorded yet. Try: skylog collect"),
    }
    Ok(())
}

fn print_observation(obs: &WeatherObservation) {
    println!("🌦️  Observation #{}", obs.id);
    println!("   Location: {}", obs.location);
    println!("   Time: {}", obs.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("   Condition: {}", obs.condition);
    println!("   🌡️  Temperature: {:.1}°C", obs.temperature);
    if let Some(feels_like) = obs.feels_like {
        println!("   🌡️  Feels like: {:.1}°C", feels_like);
    }
    println!("   💧 Humidity: {:.0}%", obs.humidity);
    println!("   💨 Wind: {:.1} km/h", obs.wind_speed);
    if let Some(rain) = obs.rain_probability {
        println!("   🌧️  Rain probability: {:.0}%", rain);
    }
    if let Some(pressure) = obs.pressure {
        println!("   Pressure: {:.1} hPa", pressure);
    }
    if let Some(uv) = obs.uv_index {
        println!("   UV index: {:.1}", uv);
    }
}

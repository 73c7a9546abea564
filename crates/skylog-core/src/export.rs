//! CSV export of weather observations
//!
//! Produces the download served by `GET /api/export/csv` and the
//! `skylog export` command. Newest observations first, capped at
//! [`EXPORT_ROW_CAP`] rows.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::db::Database;
use crate::error::Result;
use crate::models::ObservationFilter;

/// Hard cap on exported rows
pub const EXPORT_ROW_CAP: i64 = 1000;

/// Options for observation export
#[derive(Debug, Clone, Default)]
pub struct ObservationExportOptions {
    /// Inclusive lower bound on timestamp
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on timestamp
    pub to: Option<DateTime<Utc>>,
    /// Case-insensitive substring match on location
    pub location: Option<String>,
}

/// Export observations as a CSV string
pub fn export_observations_csv(
    db: &Database,
    options: &ObservationExportOptions,
) -> Result<String> {
    let filter = ObservationFilter {
        location: options.location.clone(),
        start: options.from,
        end: options.to,
        limit: Some(EXPORT_ROW_CAP),
        skip: None,
    };
    let observations = db.list_observations(&filter)?;

    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "Timestamp",
        "Location",
        "Temperature",
        "Humidity",
        "Wind Speed",
        "Condition",
        "Rain Probability",
        "Pressure",
        "Feels Like",
        "UV Index",
    ])?;

    for obs in &observations {
        writer.write_record([
            obs.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            obs.location.clone(),
            obs.temperature.to_string(),
            obs.humidity.to_string(),
            obs.wind_speed.to_string(),
            obs.condition.clone(),
            obs.rain_probability.map(|v| v.to_string()).unwrap_or_default(),
            obs.pressure.map(|v| v.to_string()).unwrap_or_default(),
            obs.feels_like.map(|v| v.to_string()).unwrap_or_default(),
            obs.uv_index.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| crate::error::Error::InvalidData(format!("CSV writer error: {}", e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewObservation;
    use chrono::Duration;

    fn insert(db: &Database, location: &str, temp: f64, hours_ago: i64) {
        db.insert_observation(&NewObservation {
            location: location.to_string(),
            temperature: temp,
            humidity: 65.0,
            wind_speed: 12.0,
            condition: "Sunny".to_string(),
            rain_probability: Some(30.0),
            pressure: None,
            feels_like: None,
            uv_index: None,
            timestamp: Some(Utc::now() - Duration::hours(hours_ago)),
        })
        .unwrap();
    }

    #[test]
    fn test_export_header_and_rows() {
        let db = Database::in_memory().unwrap();
        insert(&db, "Pindamonhangaba, SP", 25.0, 1);
        insert(&db, "Taubate, SP", 22.0, 2);

        let csv = export_observations_csv(&db, &ObservationExportOptions::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert!(lines[0].starts_with("Timestamp,Location,Temperature,Humidity,Wind Speed"));
        assert_eq!(lines.len(), 3);
        // Newest first
        assert!(lines[1].contains("Pindamonhangaba"));
        assert!(lines[2].contains("Taubate"));
    }

    #[test]
    fn test_export_optional_fields_empty() {
        let db = Database::in_memory().unwrap();
        insert(&db, "A", 20.0, 1);

        let csv = export_observations_csv(&db, &ObservationExportOptions::default()).unwrap();
        let row = csv.lines().nth(1).unwrap();
        // pressure, feels_like, uv_index were not recorded
        assert!(row.ends_with(",,,"));
    }

    #[test]
    fn test_export_location_filter() {
        let db = Database::in_memory().unwrap();
        insert(&db, "Pindamonhangaba, SP", 25.0, 1);
        insert(&db, "Taubate, SP", 22.0, 2);

        let options = ObservationExportOptions {
            location: Some("taubate".to_string()),
            ..Default::default()
        };
        let csv = export_observations_csv(&db, &options).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("Taubate"));
    }

    #[test]
    fn test_export_empty_database() {
        let db = Database::in_memory().unwrap();
        let csv = export_observations_csv(&db, &ObservationExportOptions::default()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}

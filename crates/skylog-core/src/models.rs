//! Data models for the Skylog observation store
//!
//! Wire format note: the dashboard frontend consumes camelCase JSON
//! (`windSpeed`, `rainProbability`, ...), so the serde representations here
//! use `rename_all = "camelCase"`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded weather reading at a point in time
///
/// Observations are immutable once recorded; there is no update path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObservation {
    pub id: i64,
    pub location: String,
    /// Temperature in °C
    pub temperature: f64,
    /// Relative humidity, 0-100 %
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Short condition description, e.g. "Partly Cloudy"
    pub condition: String,
    /// Rain probability, 0-100 %
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_probability: Option<f64>,
    /// Atmospheric pressure in hPa
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Apparent temperature in °C
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,
    /// UV index, >= 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// A new observation, before insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewObservation {
    pub location: String,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub condition: String,
    #[serde(default)]
    pub rain_probability: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub uv_index: Option<f64>,
    /// Defaults to the insertion time when absent
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Filters for listing observations
#[derive(Debug, Clone, Default)]
pub struct ObservationFilter {
    /// Case-insensitive substring match on location
    pub location: Option<String>,
    /// Inclusive lower bound on timestamp
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on timestamp
    pub end: Option<DateTime<Utc>>,
    /// Max rows to return (default 100, capped at 1000)
    pub limit: Option<i64>,
    /// Rows to skip
    pub skip: Option<i64>,
}

/// Start/end of a statistics window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Aggregated statistics over a trailing window of days
///
/// Derived on demand, never stored. When `count` is 0 every numeric field is
/// exactly 0.0 and `period` is None.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherStats {
    pub count: i64,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_wind_speed: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<StatsPeriod>,
}

impl WeatherStats {
    /// Statistics for an empty window
    pub fn empty() -> Self {
        Self {
            count: 0,
            avg_temperature: 0.0,
            avg_humidity: 0.0,
            avg_wind_speed: 0.0,
            max_temperature: 0.0,
            min_temperature: 0.0,
            period: None,
        }
    }
}

/// One point of the temperature time series used for trend analysis
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSample {
    pub temperature: f64,
    pub timestamp: DateTime<Utc>,
}

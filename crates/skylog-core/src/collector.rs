//! Open-Meteo collector client
//!
//! Fetches current conditions from the Open-Meteo forecast API (no API key
//! required) and normalizes them into a `NewObservation` for the store. Used
//! by the server's collection scheduler and the `skylog collect` command.

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::NewObservation;

/// Default Open-Meteo API host
const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// Fields requested from the `current` block
const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code,pressure_msl,apparent_temperature";

/// Open-Meteo client for a fixed set of coordinates
#[derive(Clone)]
pub struct OpenMeteoClient {
    http_client: Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
}

/// Open-Meteo forecast response (subset)
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current: OpenMeteoCurrent,
    hourly: Option<OpenMeteoHourly>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    /// km/h (Open-Meteo's default wind speed unit)
    wind_speed_10m: f64,
    weather_code: i64,
    pressure_msl: f64,
    apparent_temperature: f64,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoHourly {
    #[serde(default)]
    precipitation_probability: Vec<f64>,
}

impl OpenMeteoClient {
    /// Create a new client for the given coordinates
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            http_client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            latitude,
            longitude,
        }
    }

    /// Create with a custom base URL (for testing)
    pub fn with_base_url(latitude: f64, longitude: f64, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::new(latitude, longitude)
        }
    }

    /// Create from environment variables
    ///
    /// `SKYLOG_LATITUDE` / `SKYLOG_LONGITUDE`, defaulting to
    /// Pindamonhangaba, SP.
    pub fn from_env() -> Self {
        let latitude = std::env::var("SKYLOG_LATITUDE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(-22.9249);
        let longitude = std::env::var("SKYLOG_LONGITUDE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(-45.4625);
        Self::new(latitude, longitude)
    }

    /// Fetch current conditions as a ready-to-insert observation
    pub async fn fetch_current(&self) -> Result<NewObservation> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current={}&hourly=precipitation_probability&forecast_days=1&timezone=UTC",
            self.base_url, self.latitude, self.longitude, CURRENT_FIELDS
        );

        debug!(latitude = self.latitude, longitude = self.longitude, "Fetching current weather from Open-Meteo");

        let response = self
            .http_client
            .get(&url)
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::InvalidData(format!(
                "Open-Meteo API error {}: {}",
                status, body
            )));
        }

        let data: OpenMeteoResponse = response.json().await?;
        Ok(self.normalize(data))
    }

    fn normalize(&self, data: OpenMeteoResponse) -> NewObservation {
        let rain_probability = data
            .hourly
            .as_ref()
            .and_then(|h| h.precipitation_probability.first().copied());

        NewObservation {
            location: format!("Lat: {}, Lon: {}", self.latitude, self.longitude),
            temperature: data.current.temperature_2m,
            humidity: data.current.relative_humidity_2m,
            wind_speed: data.current.wind_speed_10m,
            condition: map_weather_code(data.current.weather_code).to_string(),
            rain_probability,
            pressure: Some(data.current.pressure_msl),
            feels_like: Some(data.current.apparent_temperature),
            uv_index: None,
            timestamp: Some(Utc::now()),
        }
    }
}

/// Map a WMO weather code to a condition description
pub fn map_weather_code(code: i64) -> &'static str {
    match code {
        0 => "Clear Sky",
        1 => "Mainly Clear",
        2 => "Partly Cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing Rime Fog",
        51 => "Light Drizzle",
        53 => "Moderate Drizzle",
        55 => "Dense Drizzle",
        61 => "Slight Rain",
        63 => "Moderate Rain",
        65 => "Heavy Rain",
        71 => "Slight Snow",
        73 => "Moderate Snow",
        75 => "Heavy Snow",
        77 => "Snow Grains",
        80 => "Slight Rain Showers",
        81 => "Moderate Rain Showers",
        82 => "Violent Rain Showers",
        85 => "Slight Snow Showers",
        86 => "Heavy Snow Showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with Slight Hail",
        99 => "Thunderstorm with Heavy Hail",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_weather_code() {
        assert_eq!(map_weather_code(0), "Clear Sky");
        assert_eq!(map_weather_code(2), "Partly Cloudy");
        assert_eq!(map_weather_code(95), "Thunderstorm");
        assert_eq!(map_weather_code(42), "Unknown");
    }

    #[test]
    fn test_normalize_response() {
        let client = OpenMeteoClient::new(-22.9249, -45.4625);
        let data = OpenMeteoResponse {
            current: OpenMeteoCurrent {
                temperature_2m: 21.4,
                relative_humidity_2m: 71.0,
                wind_speed_10m: 9.3,
                weather_code: 3,
                pressure_msl: 1015.2,
                apparent_temperature: 22.0,
            },
            hourly: Some(OpenMeteoHourly {
                precipitation_probability: vec![40.0, 35.0],
            }),
        };

        let obs = client.normalize(data);
        assert_eq!(obs.location, "Lat: -22.9249, Lon: -45.4625");
        assert_eq!(obs.temperature, 21.4);
        assert_eq!(obs.condition, "Overcast");
        assert_eq!(obs.rain_probability, Some(40.0));
        assert_eq!(obs.pressure, Some(1015.2));
        assert!(obs.timestamp.is_some());
    }

    #[test]
    fn test_normalize_without_hourly_block() {
        let client = OpenMeteoClient::new(0.0, 0.0);
        let data = OpenMeteoResponse {
            current: OpenMeteoCurrent {
                temperature_2m: 30.0,
                relative_humidity_2m: 50.0,
                wind_speed_10m: 5.0,
                weather_code: 0,
                pressure_msl: 1010.0,
                apparent_temperature: 31.0,
            },
            hourly: None,
        };

        let obs = client.normalize(data);
        assert!(obs.rain_probability.is_none());
    }
}

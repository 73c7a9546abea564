//! Weather observation operations

use chrono::{Duration, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::{fmt_timestamp, parse_timestamp, Database};
use crate::error::Result;
use crate::models::{
    NewObservation, ObservationFilter, StatsPeriod, TemperatureSample, WeatherObservation,
    WeatherStats,
};

/// Default page size for observation listings
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Hard cap on observation listings
pub const MAX_LIST_LIMIT: i64 = 1000;

fn row_to_observation(row: &Row) -> rusqlite::Result<WeatherObservation> {
    let timestamp: String = row.get("timestamp")?;
    Ok(WeatherObservation {
        id: row.get("id")?,
        location: row.get("location")?,
        temperature: row.get("temperature")?,
        humidity: row.get("humidity")?,
        wind_speed: row.get("wind_speed")?,
        condition: row.get("condition")?,
        rain_probability: row.get("rain_probability")?,
        pressure: row.get("pressure")?,
        feels_like: row.get("feels_like")?,
        uv_index: row.get("uv_index")?,
        timestamp: parse_timestamp(&timestamp),
    })
}

impl Database {
    /// Insert an observation, returning its id
    ///
    /// A missing timestamp defaults to the insertion time.
    pub fn insert_observation(&self, obs: &NewObservation) -> Result<i64> {
        let conn = self.conn()?;
        let timestamp = obs.timestamp.unwrap_or_else(Utc::now);

        conn.execute(
            r#"
            INSERT INTO weather_logs (location, temperature, humidity, wind_speed, condition, rain_probability, pressure, feels_like, uv_index, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                obs.location,
                obs.temperature,
                obs.humidity,
                obs.wind_speed,
                obs.condition,
                obs.rain_probability,
                obs.pressure,
                obs.feels_like,
                obs.uv_index,
                fmt_timestamp(&timestamp),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List observations with optional filters, newest first
    pub fn list_observations(&self, filter: &ObservationFilter) -> Result<Vec<WeatherObservation>> {
        let conn = self.conn()?;

        // Build dynamic WHERE clause
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref location) = filter.location {
            if !location.trim().is_empty() {
                conditions.push("location LIKE ? COLLATE NOCASE".to_string());
                params.push(Box::new(format!("%{}%", location.trim())));
            }
        }

        if let Some(ref start) = filter.start {
            conditions.push("timestamp >= ?".to_string());
            params.push(Box::new(fmt_timestamp(start)));
        }

        if let Some(ref end) = filter.end {
            conditions.push("timestamp <= ?".to_string());
            params.push(Box::new(fmt_timestamp(end)));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter
            .limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);
        let skip = filter.skip.unwrap_or(0).max(0);
        params.push(Box::new(limit));
        params.push(Box::new(skip));

        let sql = format!(
            "SELECT * FROM weather_logs {} ORDER BY timestamp DESC LIMIT ? OFFSET ?",
            where_clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let observations = stmt
            .query_map(params_refs.as_slice(), row_to_observation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(observations)
    }

    /// Get a single observation by id
    pub fn get_observation(&self, id: i64) -> Result<Option<WeatherObservation>> {
        let conn = self.conn()?;
        let obs = conn
            .query_row(
                "SELECT * FROM weather_logs WHERE id = ?",
                params![id],
                row_to_observation,
            )
            .optional()?;
        Ok(obs)
    }

    /// Get the most recent observation, if any exist
    pub fn latest_observation(&self) -> Result<Option<WeatherObservation>> {
        let conn = self.conn()?;
        let obs = conn
            .query_row(
                "SELECT * FROM weather_logs ORDER BY timestamp DESC LIMIT 1",
                [],
                row_to_observation,
            )
            .optional()?;
        Ok(obs)
    }

    /// Total number of recorded observations
    pub fn count_observations(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM weather_logs", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Aggregate statistics over the trailing `days` window
    ///
    /// Invariant: an empty window yields all-zero statistics with no period
    /// attached.
    pub fn stats(&self, days: u32) -> Result<WeatherStats> {
        let conn = self.conn()?;
        let now = Utc::now();
        let start = now - Duration::days(days as i64);

        let mut stmt = conn.prepare(
            "SELECT temperature, humidity, wind_speed FROM weather_logs WHERE timestamp >= ?",
        )?;
        let rows = stmt.query_map(params![fmt_timestamp(&start)], |row| {
            Ok((
                row.get::<_, f64>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;
        let readings = rows.collect::<rusqlite::Result<Vec<_>>>()?;

        if readings.is_empty() {
            return Ok(WeatherStats::empty());
        }

        let count = readings.len() as i64;
        let n = readings.len() as f64;
        let avg_temperature = readings.iter().map(|r| r.0).sum::<f64>() / n;
        let avg_humidity = readings.iter().map(|r| r.1).sum::<f64>() / n;
        let avg_wind_speed = readings.iter().map(|r| r.2).sum::<f64>() / n;
        let max_temperature = readings.iter().map(|r| r.0).fold(f64::MIN, f64::max);
        let min_temperature = readings.iter().map(|r| r.0).fold(f64::MAX, f64::min);

        Ok(WeatherStats {
            count,
            avg_temperature,
            avg_humidity,
            avg_wind_speed,
            max_temperature,
            min_temperature,
            period: Some(StatsPeriod { start, end: now }),
        })
    }

    /// Temperature time series over the trailing `days` window, oldest first
    ///
    /// Feeds the trend rule, which splits the series into halves.
    pub fn temperature_series(&self, days: u32) -> Result<Vec<TemperatureSample>> {
        let conn = self.conn()?;
        let start = Utc::now() - Duration::days(days as i64);

        let mut stmt = conn.prepare(
            "SELECT temperature, timestamp FROM weather_logs WHERE timestamp >= ? ORDER BY timestamp ASC",
        )?;
        let rows = stmt.query_map(params![fmt_timestamp(&start)], |row| {
            let timestamp: String = row.get(1)?;
            Ok(TemperatureSample {
                temperature: row.get(0)?,
                timestamp: parse_timestamp(&timestamp),
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

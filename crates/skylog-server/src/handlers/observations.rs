//! Observation handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::{AppError, AppState};
use skylog_core::models::{NewObservation, ObservationFilter, WeatherObservation, WeatherStats};

/// Query parameters for listing observations
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationQuery {
    /// Case-insensitive substring match on location
    pub location: Option<String>,
    /// Inclusive lower bound: RFC 3339 timestamp or YYYY-MM-DD
    pub start_date: Option<String>,
    /// Inclusive upper bound: RFC 3339 timestamp or YYYY-MM-DD
    pub end_date: Option<String>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

/// Query parameters for statistics
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    skylog_core::DEFAULT_WINDOW_DAYS
}

/// Parse a date query parameter: full RFC 3339, or a bare date taken as
/// midnight UTC
pub(crate) fn parse_date_param(value: &str, param: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    Err(AppError::bad_request(&format!(
        "Invalid {} (use YYYY-MM-DD or RFC 3339)",
        param
    )))
}

/// Validate the recorded ranges before insertion
fn validate_observation(obs: &NewObservation) -> Result<(), AppError> {
    if obs.location.trim().is_empty() {
        return Err(AppError::bad_request("Location is required"));
    }
    if obs.condition.trim().is_empty() {
        return Err(AppError::bad_request("Condition is required"));
    }
    if !(0.0..=100.0).contains(&obs.humidity) {
        return Err(AppError::bad_request("Humidity must be between 0 and 100"));
    }
    if obs.wind_speed < 0.0 {
        return Err(AppError::bad_request("Wind speed cannot be negative"));
    }
    if let Some(rain) = obs.rain_probability {
        if !(0.0..=100.0).contains(&rain) {
            return Err(AppError::bad_request(
                "Rain probability must be between 0 and 100",
            ));
        }
    }
    if let Some(uv) = obs.uv_index {
        if uv < 0.0 {
            return Err(AppError::bad_request("UV index cannot be negative"));
        }
    }
    Ok(())
}

/// POST /api/logs - Record a new observation
pub async fn create_observation(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewObservation>,
) -> Result<Json<WeatherObservation>, AppError> {
    validate_observation(&body)?;

    let id = state.db.insert_observation(&body)?;
    let observation = state
        .db
        .get_observation(id)?
        .ok_or_else(|| AppError::internal("Observation vanished after insert"))?;

    Ok(Json(observation))
}

/// GET /api/logs - List observations with optional filters
pub async fn list_observations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ObservationQuery>,
) -> Result<Json<Vec<WeatherObservation>>, AppError> {
    let start = params
        .start_date
        .as_deref()
        .map(|s| parse_date_param(s, "startDate"))
        .transpose()?;
    let end = params
        .end_date
        .as_deref()
        .map(|s| parse_date_param(s, "endDate"))
        .transpose()?;

    let filter = ObservationFilter {
        location: params.location,
        start,
        end,
        limit: params.limit,
        skip: params.skip,
    };

    Ok(Json(state.db.list_observations(&filter)?))
}

/// GET /api/logs/latest - Most recent observation
pub async fn get_latest_observation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WeatherObservation>, AppError> {
    let observation = state
        .db
        .latest_observation()?
        .ok_or_else(|| AppError::not_found("No observations recorded yet"))?;

    Ok(Json(observation))
}

/// GET /api/logs/:id - Observation by id
pub async fn get_observation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<WeatherObservation>, AppError> {
    let observation = state
        .db
        .get_observation(id)?
        .ok_or_else(|| AppError::not_found("Weather log not found"))?;

    Ok(Json(observation))
}

/// GET /api/stats - Windowed statistics
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<WeatherStats>, AppError> {
    if params.days == 0 || params.days > 365 {
        return Err(AppError::bad_request("Days must be between 1 and 365"));
    }

    Ok(Json(state.db.stats(params.days)?))
}

//! Skylog Core Library
//!
//! Shared functionality for the Skylog weather monitoring dashboard:
//! - SQLite observation store with windowed statistics
//! - Insight engine: AI-generated reports with a deterministic rule-based
//!   fallback
//! - Pluggable AI backends (Groq, mock)
//! - Open-Meteo collector client
//! - CSV export

pub mod ai;
pub mod collector;
pub mod db;
pub mod error;
pub mod export;
pub mod insights;
pub mod models;

pub use ai::{AiBackend, AiClient, GroqBackend, MockBackend, WeatherSnapshot};
pub use collector::OpenMeteoClient;
pub use db::Database;
pub use error::{Error, Result};
pub use export::{export_observations_csv, ObservationExportOptions};
pub use insights::{
    Insight, InsightEngine, InsightReport, InsightSource, InsightType, DEFAULT_WINDOW_DAYS,
};
pub use models::{
    NewObservation, ObservationFilter, StatsPeriod, TemperatureSample, WeatherObservation,
    WeatherStats,
};

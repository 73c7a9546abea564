//! HTTP request handlers, organized by domain

mod export;
mod health;
mod insights;
mod observations;

pub use export::export_csv;
pub use health::get_health;
pub use insights::get_insight_report;
pub use observations::{
    create_observation, get_latest_observation, get_observation, get_stats, list_observations,
};

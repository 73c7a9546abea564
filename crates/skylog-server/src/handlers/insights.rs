//! Insight report handler

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use skylog_core::insights::{InsightEngine, InsightReport};

/// Query parameters for the insight report
#[derive(Debug, Deserialize)]
pub struct InsightQuery {
    /// Statistics window in days (default 7)
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    skylog_core::DEFAULT_WINDOW_DAYS
}

/// GET /api/insights - Generate an insight report
///
/// The engine prefers the AI backend and falls back to the rule-based
/// generator; either way the caller receives a well-formed report.
pub async fn get_insight_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InsightQuery>,
) -> Result<Json<InsightReport>, AppError> {
    if params.days == 0 || params.days > 365 {
        return Err(AppError::bad_request("Days must be between 1 and 365"));
    }

    let engine = InsightEngine::new(state.db.clone(), state.ai.clone());
    let report = engine.generate(params.days).await?;

    Ok(Json(report))
}

//! Health handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};
use skylog_core::ai::AiBackend;

/// Health response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub observations: i64,
    pub ai: AiHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiHealth {
    pub configured: bool,
    /// Only probed when a backend is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reachable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// GET /api/health - Liveness probe with AI backend status
pub async fn get_health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, AppError> {
    let observations = state.db.count_observations()?;

    let ai = match state.ai {
        Some(ref client) => AiHealth {
            configured: true,
            reachable: Some(client.health_check().await),
            model: Some(client.model().to_string()),
        },
        None => AiHealth {
            configured: false,
            reachable: None,
            model: None,
        },
    };

    Ok(Json(HealthResponse {
        status: "ok",
        observations,
        ai,
    }))
}

//! CSV export handler

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{AppError, AppState};
use skylog_core::export::{export_observations_csv, ObservationExportOptions};

/// Query parameters for CSV export
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
}

/// GET /api/export/csv - Download observations as CSV
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let from = params
        .start_date
        .as_deref()
        .map(|s| super::observations::parse_date_param(s, "startDate"))
        .transpose()?;
    let to = params
        .end_date
        .as_deref()
        .map(|s| super::observations::parse_date_param(s, "endDate"))
        .transpose()?;

    let options = ObservationExportOptions {
        from,
        to,
        location: params.location,
    };

    let csv = export_observations_csv(&state.db, &options)?;
    let filename = format!("weather-logs-{}.csv", Utc::now().timestamp_millis());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        csv,
    ))
}

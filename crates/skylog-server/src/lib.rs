//! Skylog Web Server
//!
//! Axum-based REST API for the Skylog weather monitoring dashboard.
//!
//! Surface:
//! - Observation CRUD (`/api/logs`)
//! - Windowed statistics (`/api/stats`)
//! - Insight reports (`/api/insights`)
//! - CSV export (`/api/export/csv`)
//! - Health/liveness (`/api/health`)
//!
//! The AI client is resolved once at router construction and injected into
//! handlers as an immutable capability; insight requests never mutate shared
//! state.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use skylog_core::ai::{AiBackend, AiClient};
use skylog_core::db::Database;

mod handlers;
mod scheduler;

pub use scheduler::{start_collector_scheduler, CollectorScheduleConfig};

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub ai: Option<AiClient>,
}

/// Create the application router
///
/// Resolves the AI client from the environment, matching the production
/// startup path.
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    let ai = AiClient::from_env();
    match ai {
        Some(ref client) => {
            info!(
                "✅ AI backend configured: {} (model: {})",
                client.host(),
                client.model()
            );
        }
        None => {
            info!("ℹ️  AI backend not configured - insight reports will be rule-based");
        }
    }
    create_router_with_ai(db, config, ai)
}

/// Create the application router with an explicit AI client (for testing)
pub fn create_router_with_ai(
    db: Database,
    config: ServerConfig,
    ai: Option<AiClient>,
) -> Router {
    let state = Arc::new(AppState { db, ai });

    let api_routes = Router::new()
        // Observations
        .route(
            "/logs",
            get(handlers::list_observations).post(handlers::create_observation),
        )
        .route("/logs/latest", get(handlers::get_latest_observation))
        .route("/logs/:id", get(handlers::get_observation))
        // Statistics
        .route("/stats", get(handlers::get_stats))
        // Insights
        .route("/insights", get(handlers::get_insight_report))
        // Export
        .route("/export/csv", get(handlers::export_csv))
        // Health
        .route("/health", get(handlers::get_health));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    // Log AI backend reachability up front so a bad key is visible at startup
    check_ai_connection().await;

    // Start the collection scheduler if configured
    if let Some(collector_config) = CollectorScheduleConfig::from_env() {
        start_collector_scheduler(db.clone(), collector_config);
    }

    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log AI backend connection status
async fn check_ai_connection() {
    match AiClient::from_env() {
        Some(client) => {
            if client.health_check().await {
                info!(
                    "✅ AI backend connected: {} (model: {})",
                    client.host(),
                    client.model()
                );
            } else {
                warn!(
                    "⚠️  AI backend configured but not responding: {} (model: {})",
                    client.host(),
                    client.model()
                );
            }
        }
        None => {
            info!("ℹ️  AI backend not configured (set GROQ_API_KEY to enable AI insights)");
        }
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

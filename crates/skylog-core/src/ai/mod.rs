//! Pluggable AI backend abstraction for insight generation
//!
//! The insight engine prefers an LLM-generated report and falls back to the
//! rule engine on any failure, so the backend interface is deliberately
//! narrow: one generation call plus a health probe.
//!
//! # Architecture
//!
//! - `AiBackend` trait: defines the interface for AI insight generation
//! - `AiClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `GroqBackend`, `MockBackend`
//!
//! # Usage
//!
//! ```rust,ignore
//! // Create from environment
//! let ai = AiClient::from_env();
//!
//! if let Some(ref client) = ai {
//!     let insights = client.generate_insights(&snapshot).await?;
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (groq, mock). Default: groq
//! - `GROQ_API_KEY`: Groq API key (required for the groq backend; the
//!   placeholder value `your_key_here` counts as unconfigured)
//! - `GROQ_MODEL`: Model name (default: llama-3.1-8b-instant)
//! - `GROQ_TIMEOUT_SECS`: Request timeout in seconds (default: 10)

mod groq;
mod mock;
pub mod parsing;

pub use groq::GroqBackend;
pub use mock::MockBackend;

use async_trait::async_trait;

use crate::error::Result;
use crate::insights::Insight;

/// Numeric summary handed to the AI backend for insight generation
#[derive(Debug, Clone)]
pub struct WeatherSnapshot {
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_wind_speed: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub latest_condition: String,
    pub data_points: i64,
}

/// Trait defining the interface for AI backends
///
/// Backends should be Send + Sync to allow use across async tasks. Errors
/// from any method are a fallback trigger for the caller, never fatal.
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Generate 4-6 structured insights from the weather summary
    async fn generate_insights(&self, snapshot: &WeatherSnapshot) -> Result<Vec<Insight>>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AiClient {
    /// Groq cloud backend (OpenAI-compatible chat completions API)
    Groq(GroqBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AiClient {
    /// Create an AI client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use:
    /// - `groq` (default): Uses GROQ_API_KEY and GROQ_MODEL
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Returns None if the required environment variables are not set, which
    /// leaves the insight engine rule-based only.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "groq".to_string());

        match backend.to_lowercase().as_str() {
            "groq" => GroqBackend::from_env().map(AiClient::Groq),
            "mock" => Some(AiClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to groq");
                GroqBackend::from_env().map(AiClient::Groq)
            }
        }
    }

    /// Create a Groq backend directly
    pub fn groq(api_key: &str, model: &str) -> Self {
        AiClient::Groq(GroqBackend::new(api_key, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AiClient::Mock(MockBackend::new())
    }
}

// Implement AiBackend for AiClient by delegating to the inner backend
#[async_trait]
impl AiBackend for AiClient {
    async fn generate_insights(&self, snapshot: &WeatherSnapshot) -> Result<Vec<Insight>> {
        match self {
            AiClient::Groq(b) => b.generate_insights(snapshot).await,
            AiClient::Mock(b) => b.generate_insights(snapshot).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AiClient::Groq(b) => b.health_check().await,
            AiClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AiClient::Groq(b) => b.model(),
            AiClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AiClient::Groq(b) => b.host(),
            AiClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_client_mock() {
        let client = AiClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = AiClient::mock();
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_generates_insights() {
        let client = AiClient::mock();
        let snapshot = WeatherSnapshot {
            avg_temperature: 25.0,
            avg_humidity: 60.0,
            avg_wind_speed: 10.0,
            max_temperature: 30.0,
            min_temperature: 20.0,
            latest_condition: "Sunny".to_string(),
            data_points: 12,
        };

        let insights = client.generate_insights(&snapshot).await.unwrap();
        assert!(!insights.is_empty());
    }
}

//! Mock backend for testing
//!
//! Provides configurable responses for insight generation so engine tests can
//! exercise the AI-preferred path, the empty-result fallback, and the
//! error fallback without a network.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::insights::{Insight, InsightType};

use super::{AiBackend, WeatherSnapshot};

/// How the mock should respond to generation requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum MockResponse {
    /// Return a fixed set of insights
    #[default]
    Canned,
    /// Return an empty list (triggers fallback in the engine)
    Empty,
    /// Return an error (triggers fallback in the engine)
    Error,
}

/// Mock AI backend for testing
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    response: MockResponse,
}

impl MockBackend {
    /// Create a new mock backend (healthy, canned insights)
    pub fn new() -> Self {
        Self {
            healthy: true,
            response: MockResponse::Canned,
        }
    }

    /// Create a mock that returns an empty insight list
    pub fn empty() -> Self {
        Self {
            healthy: true,
            response: MockResponse::Empty,
        }
    }

    /// Create a mock whose generation call always fails
    pub fn failing() -> Self {
        Self {
            healthy: true,
            response: MockResponse::Error,
        }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            response: MockResponse::Error,
        }
    }
}

#[async_trait]
impl AiBackend for MockBackend {
    async fn generate_insights(&self, snapshot: &WeatherSnapshot) -> Result<Vec<Insight>> {
        match self.response {
            MockResponse::Canned => Ok(vec![
                Insight::new(
                    InsightType::Info,
                    "temperatura",
                    "Temperatura agradável",
                    format!("{:.1}°C", snapshot.avg_temperature),
                    "Bom dia para atividades ao ar livre",
                ),
                Insight::new(
                    InsightType::Success,
                    "geral",
                    "Condições estáveis",
                    "",
                    "Nenhuma precaução necessária",
                ),
            ]),
            MockResponse::Empty => Ok(vec![]),
            MockResponse::Error => Err(Error::InvalidData("mock AI backend failure".into())),
        }
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            avg_temperature: 25.0,
            avg_humidity: 60.0,
            avg_wind_speed: 10.0,
            max_temperature: 30.0,
            min_temperature: 20.0,
            latest_condition: "Sunny".to_string(),
            data_points: 7,
        }
    }

    #[tokio::test]
    async fn test_canned_insights() {
        let mock = MockBackend::new();
        let insights = mock.generate_insights(&snapshot()).await.unwrap();
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].insight_type, InsightType::Info);
    }

    #[tokio::test]
    async fn test_empty_mock() {
        let mock = MockBackend::empty();
        let insights = mock.generate_insights(&snapshot()).await.unwrap();
        assert!(insights.is_empty());
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let mock = MockBackend::failing();
        assert!(mock.generate_insights(&snapshot()).await.is_err());
    }

    #[tokio::test]
    async fn test_health_check() {
        assert!(MockBackend::new().health_check().await);
        assert!(!MockBackend::unhealthy().health_check().await);
    }
}

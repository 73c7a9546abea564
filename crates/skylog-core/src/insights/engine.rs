//! Insight Engine - coordinates the AI and rule-based generation paths

use chrono::Utc;
use tracing::{debug, warn};

use crate::ai::{AiBackend, AiClient, WeatherSnapshot};
use crate::db::Database;
use crate::models::{WeatherObservation, WeatherStats};
use crate::Result;

use super::rules;
use super::types::{Insight, InsightReport, InsightSource, ReportSummary};

/// Default statistics window for reports, in days
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Window for the temperature trend series, in days
///
/// The trend always describes the trailing week, independent of the report's
/// `window_days` parameter.
const TREND_WINDOW_DAYS: u32 = 7;

/// The main insight engine
///
/// Owns no persistent state: every call recomputes statistics and the trend
/// series fresh, so concurrent report requests are independent. The AI client
/// is an immutable capability decided once at startup - absent means the
/// engine is rule-based only.
pub struct InsightEngine {
    db: Database,
    ai: Option<AiClient>,
}

impl InsightEngine {
    /// Create a new insight engine
    pub fn new(db: Database, ai: Option<AiClient>) -> Self {
        Self { db, ai }
    }

    /// Whether an AI backend is configured
    pub fn ai_configured(&self) -> bool {
        self.ai.is_some()
    }

    /// Generate an insight report over the trailing `window_days`
    ///
    /// Prefers the AI path and falls back to the rule engine on any AI
    /// failure or empty result; AI errors never reach the caller. Statistics
    /// or observation lookup errors propagate unchanged.
    pub async fn generate(&self, window_days: u32) -> Result<InsightReport> {
        let stats = self.db.stats(window_days)?;
        let latest = self.db.latest_observation()?;

        let Some(latest) = latest else {
            debug!("No observations recorded, returning empty report");
            return Ok(InsightReport::no_data());
        };

        let (insights, source) = match self.try_ai(&stats, &latest).await {
            Some(insights) => (insights, InsightSource::Ai),
            None => {
                let series = self.db.temperature_series(TREND_WINDOW_DAYS)?;
                (
                    rules::rule_based_insights(&stats, &series),
                    InsightSource::RuleBased,
                )
            }
        };

        debug!(source = %source, count = insights.len(), "Insight report generated");

        Ok(InsightReport::Generated {
            summary: ReportSummary {
                period: format!("{} days", window_days),
                data_points: stats.count,
                avg_temperature: format!("{:.1}°C", stats.avg_temperature),
                avg_humidity: format!("{:.1}%", stats.avg_humidity),
                temperature_range: format!(
                    "{:.1}°C - {:.1}°C",
                    stats.min_temperature, stats.max_temperature
                ),
                source,
            },
            insights,
            generated_at: Utc::now(),
        })
    }

    /// Attempt the AI path; None means fall back to the rule engine
    ///
    /// One attempt per request, no retries. Unconfigured, erroring, and
    /// empty-result backends are treated identically.
    async fn try_ai(
        &self,
        stats: &WeatherStats,
        latest: &WeatherObservation,
    ) -> Option<Vec<Insight>> {
        let ai = self.ai.as_ref()?;

        let snapshot = WeatherSnapshot {
            avg_temperature: stats.avg_temperature,
            avg_humidity: stats.avg_humidity,
            avg_wind_speed: stats.avg_wind_speed,
            max_temperature: stats.max_temperature,
            min_temperature: stats.min_temperature,
            latest_condition: latest.condition.clone(),
            data_points: stats.count,
        };

        match ai.generate_insights(&snapshot).await {
            Ok(insights) if !insights.is_empty() => Some(insights),
            Ok(_) => {
                warn!(
                    model = ai.model(),
                    "AI returned no insights, falling back to rule-based generation"
                );
                None
            }
            Err(e) => {
                warn!(
                    model = ai.model(),
                    error = %e,
                    "AI insight generation failed, falling back to rule-based generation"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockBackend;
    use crate::insights::InsightType;
    use crate::models::NewObservation;
    use chrono::Duration;

    fn seeded_db() -> Database {
        let db = Database::in_memory().unwrap();
        for (hours_ago, temp) in [(72, 22.0), (48, 23.0), (24, 24.0), (2, 25.0)] {
            db.insert_observation(&NewObservation {
                location: "Pindamonhangaba, SP".to_string(),
                temperature: temp,
                humidity: 65.0,
                wind_speed: 12.0,
                condition: "Partly Cloudy".to_string(),
                rain_probability: Some(30.0),
                pressure: Some(1013.0),
                feels_like: Some(temp + 1.0),
                uv_index: Some(5.0),
                timestamp: Some(Utc::now() - Duration::hours(hours_ago)),
            })
            .unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_no_data_report() {
        let db = Database::in_memory().unwrap();
        let engine = InsightEngine::new(db, Some(AiClient::mock()));

        let report = engine.generate(7).await.unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["message"], "No weather data available yet");
        assert!(report.insights().is_empty());
        assert!(report.source().is_none());
    }

    #[tokio::test]
    async fn test_ai_path_preferred() {
        let engine = InsightEngine::new(seeded_db(), Some(AiClient::mock()));

        let report = engine.generate(7).await.unwrap();
        assert_eq!(report.source(), Some(InsightSource::Ai));
        // The mock's insights are used verbatim
        assert_eq!(report.insights().len(), 2);
        assert_eq!(report.insights()[0].message, "Temperatura agradável");
    }

    #[tokio::test]
    async fn test_fallback_on_ai_error() {
        let engine = InsightEngine::new(seeded_db(), Some(AiClient::Mock(MockBackend::failing())));

        let report = engine.generate(7).await.unwrap();
        assert_eq!(report.source(), Some(InsightSource::RuleBased));
        // Pleasant temps, normal humidity, calm wind -> temperature + trend + comfort
        let categories: Vec<&str> = report
            .insights()
            .iter()
            .map(|i| i.category.as_str())
            .collect();
        assert_eq!(categories, vec!["temperature", "trend", "comfort"]);
    }

    #[tokio::test]
    async fn test_fallback_on_empty_ai_result() {
        let engine = InsightEngine::new(seeded_db(), Some(AiClient::Mock(MockBackend::empty())));

        let report = engine.generate(7).await.unwrap();
        assert_eq!(report.source(), Some(InsightSource::RuleBased));
        assert!(!report.insights().is_empty());
    }

    #[tokio::test]
    async fn test_rule_based_without_ai() {
        let engine = InsightEngine::new(seeded_db(), None);

        let report = engine.generate(7).await.unwrap();
        assert_eq!(report.source(), Some(InsightSource::RuleBased));

        let temp = &report.insights()[0];
        assert_eq!(temp.category, "temperature");
        // avg of 22/23/24/25 = 23.5 -> pleasant
        assert_eq!(temp.insight_type, InsightType::Success);
        assert_eq!(temp.value, "23.5°C");
    }

    #[tokio::test]
    async fn test_summary_formatting() {
        let engine = InsightEngine::new(seeded_db(), None);

        let report = engine.generate(7).await.unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["period"], "7 days");
        assert_eq!(json["summary"]["dataPoints"], 4);
        assert_eq!(json["summary"]["avgTemperature"], "23.5°C");
        assert_eq!(json["summary"]["temperatureRange"], "22.0°C - 25.0°C");
        assert_eq!(json["summary"]["source"], "Rule-based system");
        assert!(json.get("generatedAt").is_some());
    }

    #[tokio::test]
    async fn test_rule_path_idempotent() {
        let engine = InsightEngine::new(seeded_db(), None);

        let first = engine.generate(7).await.unwrap();
        let second = engine.generate(7).await.unwrap();
        assert_eq!(first.insights(), second.insights());
    }
}

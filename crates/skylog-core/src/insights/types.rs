//! Core types for the Insight Engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity/kind of an insight, as rendered by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    /// Favorable conditions
    Success,
    /// Needs attention
    Warning,
    /// Neutral observation
    Info,
    /// Something went wrong
    Error,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Success => "success",
            InsightType::Warning => "warning",
            InsightType::Info => "info",
            InsightType::Error => "error",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(InsightType::Success),
            "warning" => Ok(InsightType::Warning),
            "info" => Ok(InsightType::Info),
            "error" => Ok(InsightType::Error),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// One structured finding plus a recommendation
///
/// Produced fresh on every report request; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    /// e.g. "temperature", "humidity", "wind", "trend", "comfort"
    pub category: String,
    pub message: String,
    /// Formatted value with unit; may be empty
    #[serde(default)]
    pub value: String,
    pub recommendation: String,
}

impl Insight {
    pub fn new(
        insight_type: InsightType,
        category: impl Into<String>,
        message: impl Into<String>,
        value: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            insight_type,
            category: category.into(),
            message: message.into(),
            value: value.into(),
            recommendation: recommendation.into(),
        }
    }
}

/// Which generation path produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightSource {
    /// Insights came from the Groq LLM backend
    Ai,
    /// Insights came from the deterministic rule engine
    RuleBased,
}

impl InsightSource {
    /// Wire label shown in the dashboard summary
    pub fn label(&self) -> &'static str {
        match self {
            InsightSource::Ai => "AI (LLaMA 3 via Groq)",
            InsightSource::RuleBased => "Rule-based system",
        }
    }
}

impl Serialize for InsightSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl fmt::Display for InsightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Formatted summary block of an insight report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Human-readable window, e.g. "7 days"
    pub period: String,
    pub data_points: i64,
    /// Formatted, e.g. "24.5°C"
    pub avg_temperature: String,
    /// Formatted, e.g. "61.3%"
    pub avg_humidity: String,
    /// Formatted, e.g. "18.2°C - 31.0°C"
    pub temperature_range: String,
    pub source: InsightSource,
}

/// The report returned to the dashboard
///
/// Either a full report or the degenerate no-data shape. `untagged` keeps the
/// wire format identical to what the frontend expects: the no-data variant is
/// just `{"message": ..., "insights": []}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum InsightReport {
    NoData {
        message: String,
        insights: Vec<Insight>,
    },
    Generated {
        summary: ReportSummary,
        insights: Vec<Insight>,
        #[serde(rename = "generatedAt")]
        generated_at: DateTime<Utc>,
    },
}

impl InsightReport {
    /// The report produced when no observation has ever been recorded
    pub fn no_data() -> Self {
        InsightReport::NoData {
            message: "No weather data available yet".to_string(),
            insights: vec![],
        }
    }

    pub fn insights(&self) -> &[Insight] {
        match self {
            InsightReport::NoData { insights, .. } => insights,
            InsightReport::Generated { insights, .. } => insights,
        }
    }

    pub fn source(&self) -> Option<InsightSource> {
        match self {
            InsightReport::NoData { .. } => None,
            InsightReport::Generated { summary, .. } => Some(summary.source),
        }
    }
}

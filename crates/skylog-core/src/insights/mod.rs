//! Insight Engine - Weather Insights for the Dashboard
//!
//! Turns windowed weather statistics into a prioritized list of structured
//! insights. The engine prefers an LLM-generated report (Groq) and falls back
//! deterministically to a rule-based generator whenever the AI path is
//! unavailable, errors, or returns nothing - the caller always receives a
//! well-formed report.
//!
//! ## Rule-based sequence
//!
//! The fallback appends insights in a fixed order: temperature, humidity
//! (conditional), wind (conditional), temperature trend, comfort index.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use skylog_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new(db, AiClient::from_env());
//! let report = engine.generate(7).await?;
//! ```

pub mod engine;
pub mod rules;
pub mod types;

pub use engine::{InsightEngine, DEFAULT_WINDOW_DAYS};
pub use rules::{classify_trend, comfort_index, rule_based_insights, ComfortIndex, Trend};
pub use types::{Insight, InsightReport, InsightSource, InsightType, ReportSummary};

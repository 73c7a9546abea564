//! JSON parsing helpers for AI backend responses
//!
//! Extracts JSON from model responses, which can include extra text
//! before/after the JSON payload even when a JSON response format was
//! requested.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::insights::Insight;

/// Expected response payload: `{"insights": [...]}`
#[derive(Debug, Deserialize)]
struct InsightsResponse {
    /// A response without the key parses as an empty list, which the engine
    /// treats as a fallback trigger rather than an error.
    #[serde(default)]
    insights: Vec<Insight>,
}

/// Parse an insight list from an AI response
pub fn parse_insights(response: &str) -> Result<Vec<Insight>> {
    let response = response.trim();

    // Look for the outermost JSON object
    let start = response.find('{');
    let end = response.rfind('}');

    match (start, end) {
        (Some(s), Some(e)) if s < e => {
            let json_str = &response[s..=e];
            let parsed: InsightsResponse = serde_json::from_str(json_str).map_err(|e| {
                // Truncate long responses for the error message
                let truncated = if json_str.len() > 200 {
                    format!("{}...", &json_str[..200])
                } else {
                    json_str.to_string()
                };
                Error::InvalidData(format!("Invalid JSON from AI: {} | Raw: {}", e, truncated))
            })?;
            Ok(parsed.insights)
        }
        _ => Err(Error::InvalidData(format!(
            "No JSON found in AI response | Raw: {}",
            if response.len() > 200 {
                format!("{}...", &response[..200])
            } else {
                response.to_string()
            }
        ))),
    }
}

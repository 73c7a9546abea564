//! Groq backend implementation
//!
//! HTTP client for the Groq cloud API, which implements the OpenAI chat
//! completions protocol. Requests JSON-object responses so the insight list
//! can be parsed without prose stripping (the parser still tolerates it).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::insights::Insight;

use super::parsing::parse_insights;
use super::{AiBackend, WeatherSnapshot};

/// Default Groq API host
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai";

/// Default model. Fast and on Groq's free tier.
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Default per-request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Placeholder key value shipped in .env templates; treated as unconfigured
const PLACEHOLDER_API_KEY: &str = "your_key_here";

/// Groq backend
///
/// One generation attempt per request, bounded by a request timeout; the
/// caller treats any error as a fallback trigger.
#[derive(Clone)]
pub struct GroqBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl GroqBackend {
    /// Create a new Groq backend
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create with a custom base URL (for testing against a local server)
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::new(api_key, model)
        }
    }

    /// Create from environment variables
    ///
    /// Required: `GROQ_API_KEY` (the `your_key_here` placeholder counts as
    /// unset). Optional: `GROQ_MODEL`, `GROQ_TIMEOUT_SECS`.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GROQ_API_KEY").ok()?;
        if api_key.is_empty() || api_key == PLACEHOLDER_API_KEY {
            tracing::warn!("⚠️  Groq API key not configured - AI insights disabled");
            return None;
        }

        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout = std::env::var("GROQ_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let mut backend = Self::new(&api_key, &model);
        backend.timeout = Duration::from_secs(timeout);
        Some(backend)
    }

    /// Make a chat completion request and return the raw response text
    async fn chat_completion(&self, system: &str, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: 0.7,
            max_tokens: 1024,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::InvalidData(format!(
                "Groq API error {}: {}",
                status, body
            )));
        }

        let chat_response: ChatCompletionResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::InvalidData("No response from Groq API".into()))
    }

    fn build_prompt(&self, data: &WeatherSnapshot) -> String {
        format!(
            r#"Analyze this weather data from the last 7 days and generate 4-6 insights:

**Statistics:**
- Average Temperature: {avg_temp:.1}°C
- Temperature Range: {min_temp:.1}°C to {max_temp:.1}°C
- Average Humidity: {avg_humidity:.1}%
- Average Wind Speed: {avg_wind:.1} km/h
- Latest Condition: {condition}
- Data Points: {data_points}

**Generate insights in this EXACT JSON format:**
{{
  "insights": [
    {{
      "type": "warning|success|info",
      "category": "temperatura|umidade|vento|geral",
      "message": "Short insight message (max 80 chars)",
      "value": "Relevant numeric value with unit",
      "recommendation": "Actionable recommendation (max 100 chars)"
    }}
  ]
}}

**Guidelines:**
1. Be concise and practical
2. Focus on health and comfort
3. Provide actionable recommendations
4. Use appropriate types: "warning" for alerts, "success" for good conditions, "info" for neutral
5. Consider Brazilian climate context
6. Generate 4-6 insights covering different aspects

Return ONLY valid JSON, no markdown, no explanations."#,
            avg_temp = data.avg_temperature,
            min_temp = data.min_temperature,
            max_temp = data.max_temperature,
            avg_humidity = data.avg_humidity,
            avg_wind = data.avg_wind_speed,
            condition = data.latest_condition,
            data_points = data.data_points,
        )
    }
}

/// System prompt fixing the output contract and target language
const SYSTEM_PROMPT: &str = "You are a weather analysis assistant. Analyze weather data and \
    provide insights in JSON format. Be concise and helpful. Always respond in valid JSON. \
    **All text must be written in Brazilian Portuguese (pt-BR).**";

/// Chat completion request (OpenAI protocol)
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// Chat completion response (OpenAI protocol)
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[async_trait]
impl AiBackend for GroqBackend {
    async fn generate_insights(&self, snapshot: &WeatherSnapshot) -> Result<Vec<Insight>> {
        let prompt = self.build_prompt(snapshot);

        debug!(model = %self.model, "Requesting AI insights from Groq");
        let response = self.chat_completion(SYSTEM_PROMPT, &prompt).await?;
        debug!("Groq response: {}", response);

        parse_insights(&response)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/v1/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

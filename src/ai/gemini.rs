use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{AiError, Collaborator, advice_prompt, breakdown_prompt, parse_breakdown};
use crate::model::config::AiConfig;

/// Checked when the configured key variable is unset
const FALLBACK_KEY_ENV: &str = "GEMINI_API_KEY";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateRequest {
    fn prompt(text: String, generation_config: Option<GenerationConfig>) -> Self {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text }],
            }],
            generation_config,
        }
    }
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| c.content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Blocking client for the `generateContent` REST endpoint
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    key_env: String,
}

impl GeminiClient {
    /// Build from config, reading the key from the environment
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .or_else(|| std::env::var(FALLBACK_KEY_ENV).ok())
            .filter(|k| !k.is_empty());
        Self::with_key(config, api_key)
    }

    pub fn with_key(config: &AiConfig, api_key: Option<String>) -> Result<Self, AiError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(GeminiClient {
            http: builder.build()?,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            key_env: config.api_key_env.clone(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn generate(&self, request: &GenerateRequest) -> Result<String, AiError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AiError::MissingKey(self.key_env.clone()))?;

        tracing::debug!(model = %self.model, "generateContent");
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", key)
            .json(request)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        Ok(parsed.text())
    }
}

impl Collaborator for GeminiClient {
    fn request_breakdown(&self, title: &str, description: &str) -> Result<Vec<String>, AiError> {
        let config = GenerationConfig {
            response_mime_type: Some("application/json".into()),
            response_schema: Some(serde_json::json!({
                "type": "ARRAY",
                "items": { "type": "STRING" }
            })),
            ..Default::default()
        };
        let reply = self.generate(&GenerateRequest::prompt(
            breakdown_prompt(title, description),
            Some(config),
        ))?;
        parse_breakdown(&reply)
    }

    fn request_advice(&self, summary: &str) -> Result<String, AiError> {
        let config = GenerationConfig {
            thinking_config: Some(ThinkingConfig { thinking_budget: 0 }),
            ..Default::default()
        };
        self.generate(&GenerateRequest::prompt(advice_prompt(summary), Some(config)))
    }
}

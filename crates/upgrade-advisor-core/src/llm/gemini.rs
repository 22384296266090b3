use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{LlmClient, LlmError, LlmSettings};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Client for the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            bail!(
                "Gemini API key must be provided via {}",
                LlmSettings::API_KEY_ENV
            );
        }
        let base = settings
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let model = settings
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            base.trim_end_matches('/'),
            model
        );
        let http = Client::builder()
            .user_agent("upgrade-advisor/0.3")
            .timeout(Duration::from_secs(settings.timeout_secs.unwrap_or(60)))
            .build()
            .context("failed to build Gemini HTTP client")?;
        Ok(Self {
            http,
            url,
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let payload = GeminiRequest {
            contents: vec![GeminiRequestContent {
                role: "user".into(),
                parts: vec![GeminiRequestPart {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .http
            .post(&self.url)
            .query(&[("key", &self.api_key)])
            .json(&payload)
            .send()
            .await
            .map_err(LlmError::Transport)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let message: GeminiResponse = response
            .json()
            .await
            .map_err(LlmError::MalformedResponse)?;
        message
            .candidates
            .into_iter()
            .flat_map(|candidate| candidate.content.parts)
            .filter_map(|part| part.text)
            .next()
            .ok_or(LlmError::EmptyResponse)
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiRequestContent>,
}

#[derive(Serialize)]
struct GeminiRequestContent {
    role: String,
    parts: Vec<GeminiRequestPart>,
}

#[derive(Serialize)]
struct GeminiRequestPart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};

/// Environment-driven configuration for the generation client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    pub api_key: String,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub retry_delay_secs: Option<u64>,
}

impl LlmSettings {
    pub const API_KEY_ENV: &'static str = "UPGRADE_ADVISOR_API_KEY";
    const ENDPOINT_ENV: &'static str = "UPGRADE_ADVISOR_ENDPOINT";
    const MODEL_ENV: &'static str = "UPGRADE_ADVISOR_MODEL";
    const TIMEOUT_ENV: &'static str = "UPGRADE_ADVISOR_TIMEOUT_SECS";
    const RETRY_DELAY_ENV: &'static str = "UPGRADE_ADVISOR_RETRY_DELAY_SECS";

    /// Load settings from environment variables.
    ///
    /// * `UPGRADE_ADVISOR_API_KEY`  — API key for the generation service (required).
    /// * `UPGRADE_ADVISOR_ENDPOINT` — Optional custom base URL.
    /// * `UPGRADE_ADVISOR_MODEL`    — Optional model override.
    pub fn from_env() -> Result<Self> {
        Self::from_map(std::env::vars().collect())
    }

    fn from_map(vars: HashMap<String, String>) -> Result<Self> {
        let api_key = vars
            .get(Self::API_KEY_ENV)
            .cloned()
            .filter(|v| !v.trim().is_empty())
            .with_context(|| {
                format!(
                    "environment variable {} must be set (a .env file is also read)",
                    Self::API_KEY_ENV
                )
            })?;
        let endpoint = vars
            .get(Self::ENDPOINT_ENV)
            .cloned()
            .filter(|v| !v.trim().is_empty());
        let model = vars
            .get(Self::MODEL_ENV)
            .cloned()
            .filter(|v| !v.trim().is_empty());
        let timeout_secs = vars
            .get(Self::TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok());
        let retry_delay_secs = vars
            .get(Self::RETRY_DELAY_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok());

        Ok(Self {
            api_key,
            endpoint,
            model,
            timeout_secs,
            retry_delay_secs,
        })
    }

    /// Pause before the single rate-limit retry (default 30 seconds).
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs.unwrap_or(30))
    }
}

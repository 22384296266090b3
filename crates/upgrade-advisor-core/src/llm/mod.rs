mod settings;

pub mod gemini;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::sleep;
use tracing::warn;

pub use settings::LlmSettings;

/// Failures from the text-generation endpoint.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("rate limited by the generation endpoint")]
    RateLimited,
    #[error("generation API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to reach the generation endpoint")]
    Transport(#[source] reqwest::Error),
    #[error("failed to parse generation response")]
    MalformedResponse(#[source] reqwest::Error),
    #[error("generation response contained no text")]
    EmptyResponse,
    #[error("prompt could not be created")]
    EmptyPrompt,
}

/// Client abstraction for invoking a text-generation model.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one prompt and return the generated Markdown text.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Knobs for the retry policy applied around a generation call.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Pause before the single retry taken after a rate-limit response.
    pub retry_delay: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_secs(30),
        }
    }
}

/// Query the model with a bounded retry: at most two remote calls, and the
/// second only after a rate-limit response to the first. Any other failure
/// is terminal. A blank prompt short-circuits without any remote call.
pub async fn query(
    client: &dyn LlmClient,
    prompt: &str,
    options: &QueryOptions,
) -> Result<String, LlmError> {
    if prompt.trim().is_empty() {
        return Err(LlmError::EmptyPrompt);
    }

    match client.generate(prompt).await {
        Ok(text) => Ok(text),
        Err(LlmError::RateLimited) => {
            warn!(
                delay_secs = options.retry_delay.as_secs(),
                "rate limit hit, waiting before the retry"
            );
            sleep(options.retry_delay).await;
            client.generate(prompt).await
        }
        Err(err) => Err(err),
    }
}

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::LlmClient;
use crate::presentation::config::LlmProvider;

use super::{GeminiClient, OpenAiClient};

pub struct LlmClientFactory;

#[derive(Debug, thiserror::Error)]
pub enum LlmClientFactoryError {
    #[error("LLM cue source is disabled")]
    Disabled,
    #[error("model name must not be empty")]
    MissingModel,
}

impl LlmClientFactory {
    /// Builds the configured client. A missing key is not an error here: the
    /// client reports it per call, and the cue source falls back.
    pub fn create(
        provider: LlmProvider,
        model: String,
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Arc<dyn LlmClient>, LlmClientFactoryError> {
        if provider == LlmProvider::None {
            return Err(LlmClientFactoryError::Disabled);
        }
        if model.trim().is_empty() {
            return Err(LlmClientFactoryError::MissingModel);
        }

        let key = api_key.filter(|k| !k.is_empty());
        if key.is_none() {
            tracing::warn!(provider = ?provider, "No LLM API key configured, cue decisions will use the fallback sources");
        }
        let key = key.unwrap_or_default();

        match provider {
            LlmProvider::OpenAi => {
                tracing::info!(model = %model, "Using OpenAI-compatible LLM for cue decisions");
                Ok(Arc::new(OpenAiClient::new(key, model, base_url, timeout)))
            }
            LlmProvider::Gemini => {
                tracing::info!(model = %model, "Using Gemini for cue decisions");
                Ok(Arc::new(GeminiClient::new(key, model, base_url, timeout)))
            }
            LlmProvider::None => Err(LlmClientFactoryError::Disabled),
        }
    }
}

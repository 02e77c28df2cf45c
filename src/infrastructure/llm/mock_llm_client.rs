use std::sync::Mutex;

use crate::application::ports::{LlmClient, LlmClientError};

/// Replays a fixed completion, or fails every call when built with `failing`.
pub struct MockLlmClient {
    response: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlmClient {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    fn model_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.response
            .clone()
            .ok_or_else(|| LlmClientError::ApiRequestFailed("mock failure".to_string()))
    }
}

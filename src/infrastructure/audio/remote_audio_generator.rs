use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{AudioGenerator, RenderError};
use crate::domain::Waveform;

use super::audio_decoder::decode_clip;

/// Text-to-audio model behind an HTTP inference server. The server answers
/// `POST {endpoint}/generate` with a WAV body.
///
/// One instance per server process; the pool keeps callers from sharing it.
pub struct RemoteAudioGenerator {
    client: Client,
    endpoint: String,
    steps: u32,
    sample_rate: u32,
}

impl RemoteAudioGenerator {
    pub const DEFAULT_STEPS: u32 = 48;

    pub fn new(endpoint: &str, steps: u32, sample_rate: u32, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            steps,
            sample_rate,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AudioGenerator for RemoteAudioGenerator {
    async fn generate(
        &mut self,
        description: &str,
        duration_seconds: u32,
    ) -> Result<Waveform, RenderError> {
        let body = serde_json::json!({
            "prompt": description,
            "duration_seconds": duration_seconds,
            "steps": self.steps,
            "sample_rate": self.sample_rate,
        });

        let url = format!("{}/generate", self.endpoint);
        tracing::debug!(endpoint = %self.endpoint, description, duration_seconds, "Requesting audio render");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RenderError::ApiRequestFailed(format!("audio render request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RenderError::GenerationFailed(format!(
                "audio renderer returned {status}: {text}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RenderError::ApiRequestFailed(format!("audio render read: {e}")))?;

        decode_clip(&bytes, self.sample_rate)
    }
}

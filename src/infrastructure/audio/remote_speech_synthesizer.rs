use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{RenderError, SpeechSynthesizer};
use crate::domain::Waveform;

use super::audio_decoder::decode_clip;

/// Description-conditioned TTS behind `POST {endpoint}/synthesize`.
pub struct RemoteSpeechSynthesizer {
    client: Client,
    endpoint: String,
    sample_rate: u32,
}

impl RemoteSpeechSynthesizer {
    pub fn new(endpoint: &str, sample_rate: u32, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            sample_rate,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for RemoteSpeechSynthesizer {
    async fn synthesize(
        &mut self,
        text: &str,
        voice_style_description: &str,
    ) -> Result<Waveform, RenderError> {
        if text.trim().is_empty() {
            return Err(RenderError::GenerationFailed(
                "nothing to narrate".to_string(),
            ));
        }

        let body = serde_json::json!({
            "text": text,
            "description": voice_style_description,
        });

        let url = format!("{}/synthesize", self.endpoint);
        tracing::debug!(endpoint = %self.endpoint, chars = text.len(), "Requesting narration");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RenderError::ApiRequestFailed(format!("speech request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RenderError::GenerationFailed(format!(
                "speech renderer returned {status}: {text}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RenderError::ApiRequestFailed(format!("speech read: {e}")))?;

        decode_clip(&bytes, self.sample_rate)
    }
}

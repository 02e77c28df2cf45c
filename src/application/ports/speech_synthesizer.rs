use async_trait::async_trait;

use crate::domain::Waveform;

use super::RenderError;

#[async_trait]
pub trait SpeechSynthesizer: Send {
    async fn synthesize(
        &mut self,
        text: &str,
        voice_style_description: &str,
    ) -> Result<Waveform, RenderError>;
}

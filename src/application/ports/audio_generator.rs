use async_trait::async_trait;

use crate::domain::Waveform;

use super::RenderError;

/// Text-to-audio diffusion model. Instances are not safe to share between
/// concurrent calls, hence `&mut self`; callers go through a model pool.
#[async_trait]
pub trait AudioGenerator: Send {
    async fn generate(
        &mut self,
        description: &str,
        duration_seconds: u32,
    ) -> Result<Waveform, RenderError>;
}

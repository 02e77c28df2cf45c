use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{AudioGenerator, SpeechSynthesizer};
use crate::application::services::{ModelPool, ModelPoolError};
use crate::presentation::config::{RenderProvider, RenderSettings};

use super::mock_generators::{MockAudioGenerator, MockSpeechSynthesizer};
use super::remote_audio_generator::RemoteAudioGenerator;
use super::remote_speech_synthesizer::RemoteSpeechSynthesizer;

pub struct RendererFactory;

#[derive(Debug, thiserror::Error)]
pub enum RendererFactoryError {
    #[error("no audio render endpoints configured")]
    NoAudioEndpoints,
    #[error("no speech render endpoint configured")]
    NoSpeechEndpoint,
    #[error(transparent)]
    Pool(#[from] ModelPoolError),
}

impl RendererFactory {
    /// One audio model per worker. Remote slots cycle through the configured
    /// endpoints, so slot `k` always talks to the same server.
    pub fn audio_pool(
        settings: &RenderSettings,
        provider: RenderProvider,
    ) -> Result<Arc<ModelPool<dyn AudioGenerator>>, RendererFactoryError> {
        let slots = settings.execution_mode().worker_count();
        let timeout = Duration::from_secs(settings.timeout_secs);

        let instances: Vec<Box<dyn AudioGenerator>> = match provider {
            RenderProvider::Mock => (0..slots)
                .map(|_| {
                    Box::new(MockAudioGenerator::new(
                        settings.sample_rate,
                        Duration::from_millis(settings.mock_delay_ms),
                    )) as Box<dyn AudioGenerator>
                })
                .collect(),
            RenderProvider::Remote => {
                if settings.audio_endpoints.is_empty() {
                    return Err(RendererFactoryError::NoAudioEndpoints);
                }
                (0..slots)
                    .map(|slot| {
                        let endpoint = &settings.audio_endpoints[slot % settings.audio_endpoints.len()];
                        Box::new(RemoteAudioGenerator::new(
                            endpoint,
                            settings.steps,
                            settings.sample_rate,
                            timeout,
                        )) as Box<dyn AudioGenerator>
                    })
                    .collect()
            }
        };

        tracing::info!(provider = ?provider, slots, "Audio render pool created");
        Ok(Arc::new(ModelPool::new("audio", instances)?))
    }

    /// Narration runs on a single synthesizer behind its own lock.
    pub fn speech_pool(
        settings: &RenderSettings,
        provider: RenderProvider,
    ) -> Result<Arc<ModelPool<dyn SpeechSynthesizer>>, RendererFactoryError> {
        let synthesizer: Box<dyn SpeechSynthesizer> = match provider {
            RenderProvider::Mock => Box::new(MockSpeechSynthesizer::new(
                settings.sample_rate,
                Duration::from_millis(settings.mock_delay_ms),
            )),
            RenderProvider::Remote => {
                if settings.speech_endpoint.trim().is_empty() {
                    return Err(RendererFactoryError::NoSpeechEndpoint);
                }
                Box::new(RemoteSpeechSynthesizer::new(
                    &settings.speech_endpoint,
                    settings.sample_rate,
                    Duration::from_secs(settings.timeout_secs),
                ))
            }
        };

        tracing::info!(provider = ?provider, "Speech render pool created");
        Ok(Arc::new(ModelPool::single("speech", synthesizer)))
    }
}

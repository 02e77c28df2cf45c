use std::sync::Arc;

use crate::application::ports::{CueSource, PosTagger};
use crate::application::services::{
    CuePlanner, Mixer, RenderDispatcher, SoundscapeService, TimelineNormalizer,
};
use crate::infrastructure::audio::{RendererFactory, RendererFactoryError};
use crate::infrastructure::cue_sources::{KeywordCueSource, LexicalCueSource, LlmCueSource};
use crate::infrastructure::llm::LlmClientFactory;
use crate::infrastructure::nlp::RuleBasedTagger;

use super::config::{LlmProvider, RenderProvider, ScaffoldConfig, Settings, SourceKind};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("renderer setup: {0}")]
    Renderer(#[from] RendererFactoryError),
}

/// Cue sources in configured order. The LLM source is skipped when no
/// provider is usable; it never stops the other strategies.
pub fn build_cue_sources(settings: &Settings, scaffold: &ScaffoldConfig) -> Vec<Arc<dyn CueSource>> {
    let modifiers = settings.gain_modifiers();
    let mut sources: Vec<Arc<dyn CueSource>> = Vec::new();

    for kind in &settings.sources.order {
        match kind {
            SourceKind::Llm => {
                let provider = if scaffold.enabled {
                    LlmProvider::None
                } else {
                    settings.llm.provider
                };
                match LlmClientFactory::create(
                    provider,
                    settings.llm.model.clone(),
                    settings.llm.resolved_api_key(),
                    settings.llm.base_url.clone(),
                    settings.llm.timeout(),
                ) {
                    Ok(client) => sources.push(Arc::new(LlmCueSource::new(
                        client,
                        settings.sources.narration,
                    ))),
                    Err(e) => tracing::info!(reason = %e, "LLM cue source not used"),
                }
            }
            SourceKind::Keyword => {
                sources.push(Arc::new(KeywordCueSource::with_defaults(modifiers.clone())));
            }
            SourceKind::Lexical => {
                let tagger: Option<Arc<dyn PosTagger>> = settings
                    .sources
                    .pos_tagging
                    .then(|| Arc::new(RuleBasedTagger::new()) as Arc<dyn PosTagger>);
                sources.push(Arc::new(LexicalCueSource::new(tagger, modifiers.clone())));
            }
        }
    }

    sources
}

pub fn build_soundscape_service(
    settings: &Settings,
    scaffold: &ScaffoldConfig,
) -> Result<SoundscapeService, BootstrapError> {
    let mut render = settings.render.clone();
    let provider = if scaffold.enabled {
        render.mock_delay_ms = scaffold.mock_render_delay_ms;
        RenderProvider::Mock
    } else {
        render.provider
    };

    let audio_models = RendererFactory::audio_pool(&render, provider)?;
    let speech_models = RendererFactory::speech_pool(&render, provider)?;

    let planner = CuePlanner::new(build_cue_sources(settings, scaffold));
    tracing::info!(
        sources = ?planner.source_names(),
        scaffold = scaffold.enabled,
        "Soundscape pipeline assembled"
    );

    Ok(SoundscapeService::new(
        planner,
        TimelineNormalizer::new(settings.timing_policy()),
        RenderDispatcher::new(audio_models, speech_models, settings.dispatch_policy()),
        Mixer::new(render.sample_rate),
    ))
}

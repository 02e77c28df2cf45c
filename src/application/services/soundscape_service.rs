use tracing::Instrument;
use uuid::Uuid;

use crate::domain::{ReadingSpeed, Timeline, Waveform, word_count};

use super::cue_planner::CuePlanner;
use super::mixer::{MixError, MixReport, Mixer};
use super::render_dispatcher::{RenderDispatcher, RenderFailure, RenderedCue};
use super::timeline_normalizer::TimelineNormalizer;

/// Cue decision for one story, before any rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CueDecision {
    pub timeline: Timeline,
    pub dropped: usize,
    pub source: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MixedTrack {
    pub waveform: Waveform,
    pub timeline: Timeline,
    /// Clips that rendered and made it into the mix.
    pub rendered_count: usize,
    pub failures: Vec<RenderFailure>,
    /// Rendered clips the mixer could not place.
    pub skipped: Vec<MixError>,
}

impl MixedTrack {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty() || !self.skipped.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no cues to render")]
    NoCues,
    #[error("none of the cues could be rendered ({failures} failures)")]
    NothingRendered { failures: usize },
}

/// Story text in, mixed soundscape out.
pub struct SoundscapeService {
    planner: CuePlanner,
    normalizer: TimelineNormalizer,
    dispatcher: RenderDispatcher,
    mixer: Mixer,
}

impl SoundscapeService {
    pub fn new(
        planner: CuePlanner,
        normalizer: TimelineNormalizer,
        dispatcher: RenderDispatcher,
        mixer: Mixer,
    ) -> Self {
        Self {
            planner,
            normalizer,
            dispatcher,
            mixer,
        }
    }

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }

    pub async fn decide_cues(&self, story_text: &str, speed: ReadingSpeed) -> CueDecision {
        let plan = self.planner.plan(story_text, speed).await;
        let report = self
            .normalizer
            .normalize(&plan.candidates, plan.total_duration_ms, speed);

        tracing::info!(
            source = plan.source.unwrap_or("none"),
            proposed = plan.candidates.len(),
            cues = report.timeline.len(),
            dropped = report.dropped,
            total_duration_ms = report.timeline.total_duration_ms,
            "Cue timeline decided"
        );

        CueDecision {
            timeline: report.timeline,
            dropped: report.dropped,
            source: plan.source,
        }
    }

    pub async fn render_timeline(&self, timeline: Timeline) -> Result<MixedTrack, PipelineError> {
        if timeline.is_empty() {
            return Err(PipelineError::NoCues);
        }

        let report = self.dispatcher.dispatch(timeline.cues.clone()).await;
        if report.rendered.is_empty() {
            tracing::error!(
                failures = report.failure_count(),
                "Every cue failed to render"
            );
            return Err(PipelineError::NothingRendered {
                failures: report.failure_count(),
            });
        }

        let mixed = self.mixer.mix(timeline.total_duration_ms, &report.rendered);
        let rendered_count = report.rendered.len() - mixed.skipped.len();
        if rendered_count == 0 {
            tracing::error!(
                failures = report.failure_count(),
                skipped = mixed.skipped.len(),
                "No rendered clip could be mixed"
            );
            return Err(PipelineError::NothingRendered {
                failures: report.failure_count() + mixed.skipped.len(),
            });
        }

        Ok(MixedTrack {
            waveform: mixed.waveform,
            rendered_count,
            failures: report.failures,
            skipped: mixed.skipped,
            timeline,
        })
    }

    pub async fn generate_from_story(
        &self,
        story_text: &str,
        speed: ReadingSpeed,
    ) -> Result<MixedTrack, PipelineError> {
        let span = tracing::info_span!(
            "soundscape_run",
            run_id = %Uuid::new_v4(),
            words = word_count(story_text),
            speed_wps = speed.words_per_second(),
        );

        async {
            let decision = self.decide_cues(story_text, speed).await;
            let track = self.render_timeline(decision.timeline).await?;
            tracing::info!(
                rendered = track.rendered_count,
                failed = track.failures.len(),
                duration_ms = track.waveform.duration_ms(),
                "Soundscape ready"
            );
            Ok(track)
        }
        .instrument(span)
        .await
    }

    /// Re-mixes clips rendered by an earlier run without touching any model.
    pub fn remix(&self, clips: &[RenderedCue]) -> Result<MixReport, PipelineError> {
        if clips.is_empty() {
            return Err(PipelineError::NoCues);
        }
        Ok(self.mixer.mix_prerendered(clips))
    }
}

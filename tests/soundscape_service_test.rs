mod helpers;

use std::sync::Arc;

use storyscore::application::ports::{AudioGenerator, CueSource, RenderError};
use storyscore::application::services::{
    CuePlanner, Mixer, PipelineError, RenderedCue, SoundscapeService, TimelineNormalizer,
};
use storyscore::domain::{Channel, CueId, RawCandidate, Waveform};

use helpers::{FixedSource, RATE, ScriptedGenerator, audio_cue, flat, sequential_dispatcher, speed};

const STORY: &str = "one two three four five six seven eight";

fn unfaded(channel: Channel, description: &str, word_index: usize) -> RawCandidate {
    RawCandidate {
        fade_ms: Some(0.0),
        ..RawCandidate::audio(channel, description, word_index)
    }
}

fn service_with(answer: Option<Vec<RawCandidate>>) -> SoundscapeService {
    let source: Arc<dyn CueSource> = Arc::new(FixedSource::new("fixed", answer));
    SoundscapeService::new(
        CuePlanner::new(vec![source]),
        TimelineNormalizer::default(),
        sequential_dispatcher(Box::new(ScriptedGenerator::new(0.5))),
        Mixer::new(RATE),
    )
}

/// Renders at twice the mix rate when asked for something "warped".
struct OffRateGenerator;

#[async_trait::async_trait]
impl AudioGenerator for OffRateGenerator {
    async fn generate(&mut self, description: &str, duration_seconds: u32) -> Result<Waveform, RenderError> {
        let rate = if description.contains("warped") { RATE * 2 } else { RATE };
        let len = (u64::from(duration_seconds) * u64::from(rate)) as usize;
        Ok(Waveform::new(vec![0.5; len], rate))
    }
}

#[tokio::test]
async fn given_story_when_deciding_cues_then_timeline_is_normalized() {
    let service = service_with(Some(vec![
        unfaded(Channel::Ambience, "rain", 4),
        unfaded(Channel::Sfx, "door", 0),
    ]));

    let decision = service.decide_cues(STORY, speed(2.0)).await;

    assert_eq!(decision.source, Some("fixed"));
    assert_eq!(decision.dropped, 0);
    assert_eq!(decision.timeline.total_duration_ms, 4000);
    assert!(decision.timeline.is_well_formed());
    assert_eq!(decision.timeline.cues[0].label(), "door");
    assert_eq!(decision.timeline.cues[1].start_time_ms, 2000);
    assert_eq!(decision.timeline.cues[1].duration_ms, 2000);
}

#[tokio::test]
async fn given_one_failing_cue_when_generating_then_the_rest_is_mixed_in_place() {
    let service = service_with(Some(vec![
        unfaded(Channel::Sfx, "door", 0),
        unfaded(Channel::Sfx, "fail knock", 2),
        unfaded(Channel::Ambience, "rain", 4),
    ]));

    let track = service.generate_from_story(STORY, speed(2.0)).await.unwrap();

    assert!(track.is_partial());
    assert!(track.skipped.is_empty());
    assert_eq!(track.rendered_count, 2);
    assert_eq!(track.failures[0].cue_id, CueId::new(1));
    assert_eq!(track.waveform.len(), 4000);
    assert_eq!(track.waveform.samples[500], 0.5);
    assert_eq!(track.waveform.samples[1500], 0.5);
    assert_eq!(track.waveform.samples[2500], 0.5);
}

#[tokio::test]
async fn given_every_cue_failing_when_generating_then_nothing_rendered() {
    let service = service_with(Some(vec![
        unfaded(Channel::Sfx, "fail one", 0),
        unfaded(Channel::Sfx, "fail two", 4),
    ]));

    let result = service.generate_from_story(STORY, speed(2.0)).await;

    assert!(matches!(result, Err(PipelineError::NothingRendered { failures: 2 })));
}

#[tokio::test]
async fn given_no_cue_proposals_when_generating_then_no_cues_error() {
    let service = service_with(None);

    let result = service.generate_from_story(STORY, speed(2.0)).await;

    assert!(matches!(result, Err(PipelineError::NoCues)));
}

#[tokio::test]
async fn given_cues_past_the_end_when_generating_then_no_cues_error() {
    let service = service_with(Some(vec![unfaded(Channel::Sfx, "late bang", 20)]));

    let result = service.generate_from_story(STORY, speed(2.0)).await;

    assert!(matches!(result, Err(PipelineError::NoCues)));
}

#[test]
fn given_earlier_clips_when_remixing_then_no_renderer_is_needed() {
    let service = service_with(None);
    let clips = vec![
        RenderedCue {
            cue: audio_cue(0, Channel::Sfx, "door", 0, 1000),
            waveform: flat(1000, 0.25),
        },
        RenderedCue {
            cue: audio_cue(1, Channel::Sfx, "door", 500, 1000),
            waveform: flat(1000, 0.25),
        },
    ];

    let mix = service.remix(&clips).unwrap().waveform;

    assert_eq!(mix.len(), 1500);
    assert_eq!(mix.samples[750], 0.5);
    assert!(matches!(service.remix(&[]), Err(PipelineError::NoCues)));
}

#[tokio::test]
async fn given_clip_at_wrong_rate_when_generating_then_it_is_skipped_and_the_rest_mixed() {
    let source: Arc<dyn CueSource> = Arc::new(FixedSource::new(
        "fixed",
        Some(vec![
            unfaded(Channel::Sfx, "door", 0),
            unfaded(Channel::Ambience, "warped rain", 4),
        ]),
    ));
    let service = SoundscapeService::new(
        CuePlanner::new(vec![source]),
        TimelineNormalizer::default(),
        sequential_dispatcher(Box::new(OffRateGenerator)),
        Mixer::new(RATE),
    );

    let track = service.generate_from_story(STORY, speed(2.0)).await.unwrap();

    assert!(track.is_partial());
    assert_eq!(track.rendered_count, 1);
    assert_eq!(track.skipped.len(), 1);
    assert_eq!(track.waveform.samples[500], 0.5);
    assert_eq!(track.waveform.samples[2500], 0.0);
}

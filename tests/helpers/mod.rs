#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use storyscore::application::ports::{
    AudioGenerator, CueSource, RenderError, SpeechSynthesizer,
};
use storyscore::application::services::{
    ChannelGains, DispatchPolicy, ExecutionMode, ModelPool, RenderDispatcher,
};
use storyscore::domain::{
    AudioCue, Channel, Cue, CueContent, CueId, NarratorCue, RawCandidate, ReadingSpeed, Waveform,
    samples_for_ms,
};

pub const RATE: u32 = 1_000;

/// Constant-level clip, easy to find in a mix.
pub fn flat(duration_ms: u64, level: f32) -> Waveform {
    Waveform::new(vec![level; samples_for_ms(duration_ms, RATE)], RATE)
}

pub fn audio_cue(id: u32, channel: Channel, description: &str, start: u64, duration: u64) -> Cue {
    Cue {
        id: CueId::new(id),
        channel,
        start_time_ms: start,
        duration_ms: duration,
        content: CueContent::Audio(AudioCue::new(description).with_fade_ms(0)),
    }
}

pub fn narrator_cue(id: u32, text: &str, start: u64, duration: u64) -> Cue {
    Cue {
        id: CueId::new(id),
        channel: Channel::Narrator,
        start_time_ms: start,
        duration_ms: duration,
        content: CueContent::Narration(NarratorCue::new(text, "calm voice")),
    }
}

pub fn speed(wps: f64) -> ReadingSpeed {
    ReadingSpeed::new(wps).unwrap()
}

/// Renders a flat clip of the requested length; descriptions containing
/// "fail" raise and "silent" return nothing.
pub struct ScriptedGenerator {
    pub level: f32,
    pub calls: Arc<AtomicUsize>,
}

impl ScriptedGenerator {
    pub fn new(level: f32) -> Self {
        Self {
            level,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl AudioGenerator for ScriptedGenerator {
    async fn generate(
        &mut self,
        description: &str,
        duration_seconds: u32,
    ) -> Result<Waveform, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if description.contains("fail") {
            return Err(RenderError::GenerationFailed("model exploded".to_string()));
        }
        if description.contains("silent") {
            return Ok(Waveform::new(Vec::new(), RATE));
        }
        Ok(flat(u64::from(duration_seconds) * 1000, self.level))
    }
}

/// Never answers within any sane timeout.
pub struct StalledGenerator;

#[async_trait]
impl AudioGenerator for StalledGenerator {
    async fn generate(&mut self, _: &str, _: u32) -> Result<Waveform, RenderError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(flat(1000, 1.0))
    }
}

/// Tracks how many calls run at the same time across all instances.
pub struct ConcurrencyProbe {
    pub active: Arc<AtomicUsize>,
    pub peak: Arc<AtomicUsize>,
}

#[async_trait]
impl AudioGenerator for ConcurrencyProbe {
    async fn generate(&mut self, _: &str, duration_seconds: u32) -> Result<Waveform, RenderError> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(flat(u64::from(duration_seconds) * 1000, 0.1))
    }
}

pub struct FlatSpeech {
    pub level: f32,
}

#[async_trait]
impl SpeechSynthesizer for FlatSpeech {
    async fn synthesize(&mut self, text: &str, _style: &str) -> Result<Waveform, RenderError> {
        if text.is_empty() {
            return Err(RenderError::GenerationFailed("nothing to say".to_string()));
        }
        Ok(flat(1000, self.level))
    }
}

pub fn audio_pool(
    instances: Vec<Box<dyn AudioGenerator>>,
) -> Arc<ModelPool<dyn AudioGenerator>> {
    Arc::new(ModelPool::new("audio", instances).unwrap())
}

pub fn speech_pool(level: f32) -> Arc<ModelPool<dyn SpeechSynthesizer>> {
    Arc::new(ModelPool::single(
        "speech",
        Box::new(FlatSpeech { level }) as Box<dyn SpeechSynthesizer>,
    ))
}

pub fn unity_policy(mode: ExecutionMode, timeout: Duration) -> DispatchPolicy {
    DispatchPolicy {
        mode,
        render_timeout: timeout,
        channel_gains: ChannelGains::unity(),
    }
}

pub fn sequential_dispatcher(generator: Box<dyn AudioGenerator>) -> RenderDispatcher {
    RenderDispatcher::new(
        audio_pool(vec![generator]),
        speech_pool(0.25),
        unity_policy(ExecutionMode::Sequential, Duration::from_secs(5)),
    )
}

/// Cue source with a canned answer.
pub struct FixedSource {
    pub name: &'static str,
    pub answer: Option<Vec<RawCandidate>>,
    pub calls: Arc<AtomicUsize>,
}

impl FixedSource {
    pub fn new(name: &'static str, answer: Option<Vec<RawCandidate>>) -> Self {
        Self {
            name,
            answer,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl CueSource for FixedSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn propose(&self, _story: &str, _speed: ReadingSpeed) -> Option<Vec<RawCandidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::join_all;
use tracing::Instrument;

use crate::application::ports::{AudioGenerator, RenderError, SpeechSynthesizer};
use crate::domain::{Channel, Cue, CueContent, CueId, Waveform};

use super::model_pool::{ModelPool, WorkerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One worker, one model instance.
    Sequential,
    /// `workers` concurrent workers, worker `k` bound to pool slot `k`.
    Parallel { workers: usize },
}

impl ExecutionMode {
    pub fn worker_count(&self) -> usize {
        match self {
            ExecutionMode::Sequential => 1,
            ExecutionMode::Parallel { workers } => (*workers).max(1),
        }
    }
}

/// Linear gain each specialist applies to its raw output before cue gain.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelGains {
    pub sfx: f32,
    pub ambience: f32,
    pub music: f32,
    pub narrator: f32,
}

impl ChannelGains {
    pub fn for_channel(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Sfx => self.sfx,
            Channel::Ambience => self.ambience,
            Channel::Music => self.music,
            Channel::Narrator => self.narrator,
        }
    }

    pub fn unity() -> Self {
        Self {
            sfx: 1.0,
            ambience: 1.0,
            music: 1.0,
            narrator: 1.0,
        }
    }
}

impl Default for ChannelGains {
    fn default() -> Self {
        Self {
            sfx: 0.5,
            ambience: 0.7,
            music: 0.8,
            narrator: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DispatchPolicy {
    pub mode: ExecutionMode,
    pub render_timeout: Duration,
    pub channel_gains: ChannelGains,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Sequential,
            render_timeout: Duration::from_secs(300),
            channel_gains: ChannelGains::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCue {
    pub cue: Cue,
    pub waveform: Waveform,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderFailure {
    pub cue_id: CueId,
    pub channel: Channel,
    pub error: RenderError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    /// Successful renders ordered by start time, then id.
    pub rendered: Vec<RenderedCue>,
    pub failures: Vec<RenderFailure>,
}

impl RenderReport {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

type Outcome = Result<RenderedCue, RenderFailure>;

/// Sends each cue to the renderer for its channel, tolerating per-cue failure.
///
/// Diffusion audio and speech come from separate pools so narration never
/// waits on an effects slot or the other way round.
pub struct RenderDispatcher {
    audio_models: Arc<ModelPool<dyn AudioGenerator>>,
    speech_models: Arc<ModelPool<dyn SpeechSynthesizer>>,
    policy: DispatchPolicy,
}

impl RenderDispatcher {
    pub fn new(
        audio_models: Arc<ModelPool<dyn AudioGenerator>>,
        speech_models: Arc<ModelPool<dyn SpeechSynthesizer>>,
        policy: DispatchPolicy,
    ) -> Self {
        Self {
            audio_models,
            speech_models,
            policy,
        }
    }

    pub fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    pub async fn dispatch(&self, cues: Vec<Cue>) -> RenderReport {
        if cues.is_empty() {
            return RenderReport::default();
        }

        let total = cues.len();
        let workers = self.policy.mode.worker_count().min(total);
        let mut queues: Vec<Vec<Cue>> = (0..workers).map(|_| Vec::new()).collect();
        for (index, cue) in cues.into_iter().enumerate() {
            queues[index % workers].push(cue);
        }

        tracing::info!(
            cues = total,
            workers,
            audio_slots = self.audio_models.size(),
            speech_slots = self.speech_models.size(),
            "Dispatching cue renders"
        );

        let mut assignments = Vec::with_capacity(workers);
        let mut handles = Vec::with_capacity(workers);
        for (index, queue) in queues.into_iter().enumerate() {
            let worker = WorkerId::new(index);
            let assigned: Vec<(CueId, Channel)> =
                queue.iter().map(|cue| (cue.id, cue.channel)).collect();
            let audio_models = Arc::clone(&self.audio_models);
            let speech_models = Arc::clone(&self.speech_models);
            let policy = self.policy.clone();
            handles.push(tokio::spawn(async move {
                run_worker(worker, queue, audio_models, speech_models, policy).await
            }));
            assignments.push((worker, assigned));
        }

        let joined = join_all(handles).await;

        let mut report = RenderReport::default();
        for ((worker, assigned), joined) in assignments.into_iter().zip(joined) {
            match joined {
                Ok(outcomes) => {
                    for outcome in outcomes {
                        match outcome {
                            Ok(rendered) => report.rendered.push(rendered),
                            Err(failure) => report.failures.push(failure),
                        }
                    }
                }
                Err(join_error) => {
                    tracing::error!(worker = %worker, error = %join_error, "Render worker crashed");
                    report
                        .failures
                        .extend(assigned.into_iter().map(|(cue_id, channel)| RenderFailure {
                            cue_id,
                            channel,
                            error: RenderError::WorkerCrashed(join_error.to_string()),
                        }));
                }
            }
        }

        report
            .rendered
            .sort_by_key(|r| (r.cue.start_time_ms, r.cue.id));
        report.failures.sort_by_key(|f| f.cue_id);

        if !report.failures.is_empty() {
            tracing::warn!(
                failed = report.failures.len(),
                failed_ids = ?report.failures.iter().map(|f| f.cue_id.as_u32()).collect::<Vec<_>>(),
                "Some cues could not be rendered"
            );
        }
        tracing::info!(
            rendered = report.rendered.len(),
            total,
            "Cue rendering finished"
        );

        report
    }
}

async fn run_worker(
    worker: WorkerId,
    queue: Vec<Cue>,
    audio_models: Arc<ModelPool<dyn AudioGenerator>>,
    speech_models: Arc<ModelPool<dyn SpeechSynthesizer>>,
    policy: DispatchPolicy,
) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(queue.len());

    for cue in queue {
        let span = tracing::debug_span!(
            "render_cue",
            worker = %worker,
            cue_id = %cue.id,
            channel = %cue.channel,
        );

        // A panicking model only costs its own cue; the worker keeps going.
        let result = AssertUnwindSafe(render_cue(
            &cue,
            worker,
            &audio_models,
            &speech_models,
            &policy,
        ))
        .catch_unwind()
        .instrument(span.clone())
        .await
        .unwrap_or_else(|payload| Err(RenderError::WorkerCrashed(panic_message(&*payload))));

        match result {
            Ok(mut waveform) => {
                let _entered = span.enter();
                waveform.apply_linear_gain(policy.channel_gains.for_channel(cue.channel));
                tracing::debug!(
                    samples = waveform.len(),
                    duration_ms = waveform.duration_ms(),
                    "Cue rendered"
                );
                outcomes.push(Ok(RenderedCue { cue, waveform }));
            }
            Err(error) => {
                let _entered = span.enter();
                tracing::warn!(error = %error, label = cue.label(), "Cue render failed, excluding it from the mix");
                outcomes.push(Err(RenderFailure {
                    cue_id: cue.id,
                    channel: cue.channel,
                    error,
                }));
            }
        }
    }

    outcomes
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "renderer panicked".to_string())
}

async fn render_cue(
    cue: &Cue,
    worker: WorkerId,
    audio_models: &ModelPool<dyn AudioGenerator>,
    speech_models: &ModelPool<dyn SpeechSynthesizer>,
    policy: &DispatchPolicy,
) -> Result<Waveform, RenderError> {
    let waveform = match &cue.content {
        CueContent::Audio(audio) => {
            let mut model = audio_models.acquire(worker).await;
            let seconds = render_seconds(cue.duration_ms);
            with_timeout(
                policy.render_timeout,
                model.generate(&audio.description, seconds),
            )
            .await?
        }
        CueContent::Narration(narration) => {
            let mut model = speech_models.acquire(worker).await;
            with_timeout(
                policy.render_timeout,
                model.synthesize(&narration.text_segment, &narration.voice_style_description),
            )
            .await?
        }
    };

    if waveform.is_empty() {
        return Err(RenderError::EmptyOutput);
    }
    Ok(waveform)
}

async fn with_timeout<F>(limit: Duration, render: F) -> Result<Waveform, RenderError>
where
    F: Future<Output = Result<Waveform, RenderError>>,
{
    tokio::time::timeout(limit, render)
        .await
        .map_err(|_| RenderError::TimedOut(limit.as_millis() as u64))?
}

/// Diffusion models take whole seconds; round up so the clip covers the cue.
pub fn render_seconds(duration_ms: u64) -> u32 {
    duration_ms.div_ceil(1000).max(1) as u32
}

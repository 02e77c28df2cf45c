mod cue_planner;
mod mixer;
mod model_pool;
mod render_dispatcher;
mod soundscape_service;
mod timeline_normalizer;

pub use cue_planner::{CuePlan, CuePlanner};
pub use mixer::{MixError, MixReport, Mixer};
pub use model_pool::{ModelPool, ModelPoolError, PooledModel, WorkerId};
pub use render_dispatcher::{
    ChannelGains, DispatchPolicy, ExecutionMode, RenderDispatcher, RenderFailure, RenderReport,
    RenderedCue, render_seconds,
};
pub use soundscape_service::{CueDecision, MixedTrack, PipelineError, SoundscapeService};
pub use timeline_normalizer::{NormalizationReport, TimelineNormalizer, TimingPolicy};

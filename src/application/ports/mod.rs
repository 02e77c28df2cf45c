mod audio_generator;
mod cue_source;
mod llm_client;
mod pos_tagger;
mod render_error;
mod speech_synthesizer;

pub use audio_generator::AudioGenerator;
pub use cue_source::CueSource;
pub use llm_client::{LlmClient, LlmClientError};
pub use pos_tagger::{PosTag, PosTagger, TaggedToken, TaggerError};
pub use render_error::RenderError;
pub use speech_synthesizer::SpeechSynthesizer;

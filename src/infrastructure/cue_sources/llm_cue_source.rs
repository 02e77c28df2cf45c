use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{CueSource, LlmClient};
use crate::domain::{RawCandidate, ReadingSpeed};
use crate::infrastructure::observability::sanitize_prompt;

use super::prompt::build_cue_prompt;
use super::response_parser::parse_cue_response;

/// Asks a hosted model to design the cues. Any failure, including an empty
/// answer, yields `None` so the planner moves on.
pub struct LlmCueSource {
    client: Arc<dyn LlmClient>,
    with_narration: bool,
}

impl LlmCueSource {
    pub fn new(client: Arc<dyn LlmClient>, with_narration: bool) -> Self {
        Self {
            client,
            with_narration,
        }
    }
}

#[async_trait]
impl CueSource for LlmCueSource {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn propose(&self, story_text: &str, speed: ReadingSpeed) -> Option<Vec<RawCandidate>> {
        let prompt = build_cue_prompt(story_text, speed, self.with_narration);

        let answer = match self.client.complete(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(model = self.client.model_name(), error = %e, "LLM cue request failed");
                return None;
            }
        };
        tracing::debug!(answer = %sanitize_prompt(&answer), "LLM cue answer received");

        match parse_cue_response(&answer) {
            Ok(candidates) if candidates.is_empty() => {
                tracing::warn!("LLM returned an empty cue list");
                None
            }
            Ok(candidates) => Some(candidates),
            Err(e) => {
                tracing::warn!(error = %e, answer = %sanitize_prompt(&answer), "Unparseable LLM cue answer");
                None
            }
        }
    }
}

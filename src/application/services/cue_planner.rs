use std::sync::Arc;

use crate::application::ports::CueSource;
use crate::domain::{RawCandidate, ReadingSpeed, word_count};

/// Raw proposals for one story, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct CuePlan {
    pub candidates: Vec<RawCandidate>,
    pub total_duration_ms: u64,
    /// Strategy that produced the candidates, `None` when every strategy came up empty.
    pub source: Option<&'static str>,
}

/// Tries cue sources in order until one returns a non-empty proposal.
pub struct CuePlanner {
    sources: Vec<Arc<dyn CueSource>>,
}

impl CuePlanner {
    pub fn new(sources: Vec<Arc<dyn CueSource>>) -> Self {
        Self { sources }
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub async fn plan(&self, story_text: &str, speed: ReadingSpeed) -> CuePlan {
        let total_duration_ms = speed.duration_ms(word_count(story_text));

        for source in &self.sources {
            match source.propose(story_text, speed).await {
                Some(candidates) if !candidates.is_empty() => {
                    tracing::info!(
                        source = source.name(),
                        candidates = candidates.len(),
                        total_duration_ms,
                        "Cue source produced candidates"
                    );
                    return CuePlan {
                        candidates,
                        total_duration_ms,
                        source: Some(source.name()),
                    };
                }
                Some(_) => {
                    tracing::info!(source = source.name(), "Cue source found no cues, falling back");
                }
                None => {
                    tracing::warn!(source = source.name(), "Cue source failed, falling back");
                }
            }
        }

        tracing::warn!(
            sources = ?self.source_names(),
            "No cue source produced candidates"
        );
        CuePlan {
            candidates: Vec::new(),
            total_duration_ms,
            source: None,
        }
    }
}

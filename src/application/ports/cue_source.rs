use async_trait::async_trait;

use crate::domain::{RawCandidate, ReadingSpeed};

/// One strategy for proposing cues from story text.
///
/// `None` means the strategy could not produce an answer at all; an empty
/// vector means it ran and found nothing. Planners treat both as "try the next
/// strategy".
#[async_trait]
pub trait CueSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn propose(&self, story_text: &str, speed: ReadingSpeed) -> Option<Vec<RawCandidate>>;
}

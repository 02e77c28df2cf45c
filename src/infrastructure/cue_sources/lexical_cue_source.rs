use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{CueSource, PosTag, PosTagger};
use crate::domain::{GainModifiers, RawCandidate, ReadingSpeed, normalize_word};

use super::vocabulary::classify_word;

/// Word-by-word classifier, the last fallback.
///
/// A part-of-speech tagger, when present, lets unknown verbs, nouns and
/// adjectives become cues too. A tagger error only disables that refinement.
/// A modifier word sets the gain of the next detected cue within the modifier
/// window and is then spent. Further away it expires.
pub struct LexicalCueSource {
    tagger: Option<Arc<dyn PosTagger>>,
    modifiers: GainModifiers,
}

impl LexicalCueSource {
    pub fn new(tagger: Option<Arc<dyn PosTagger>>, modifiers: GainModifiers) -> Self {
        Self { tagger, modifiers }
    }

    fn tags(&self, story_text: &str) -> HashMap<usize, PosTag> {
        let Some(tagger) = &self.tagger else {
            return HashMap::new();
        };
        match tagger.tag(story_text) {
            Ok(tokens) => tokens.into_iter().map(|t| (t.word_index, t.tag)).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "POS tagging failed, using plain word matching");
                HashMap::new()
            }
        }
    }

    pub fn extract(&self, story_text: &str) -> Vec<RawCandidate> {
        let tags = self.tags(story_text);
        let mut candidates = Vec::new();
        let mut pending_gain: Option<(usize, f32)> = None;

        for (index, raw) in story_text.split_whitespace().enumerate() {
            let word = normalize_word(raw);
            if word.is_empty() {
                continue;
            }
            if let Some(db) = self.modifiers.offset_for(&word) {
                pending_gain = Some((index, db));
                continue;
            }
            if let Some((channel, description)) = classify_word(&word, tags.get(&index).copied()) {
                let gain_db = pending_gain
                    .take()
                    .filter(|(at, _)| index - at <= self.modifiers.window())
                    .map(|(_, db)| db)
                    .unwrap_or(0.0);
                tracing::debug!(word = %word, word_index = index, channel = %channel, description = %description, "Word classified");
                candidates.push(
                    RawCandidate::audio(channel, description, index).with_gain_db(f64::from(gain_db)),
                );
            }
        }

        candidates
    }
}

#[async_trait]
impl CueSource for LexicalCueSource {
    fn name(&self) -> &'static str {
        "lexical"
    }

    async fn propose(&self, story_text: &str, _speed: ReadingSpeed) -> Option<Vec<RawCandidate>> {
        Some(self.extract(story_text))
    }
}

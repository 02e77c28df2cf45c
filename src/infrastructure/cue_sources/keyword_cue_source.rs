use async_trait::async_trait;

use crate::application::ports::CueSource;
use crate::domain::{GainModifiers, RawCandidate, ReadingSpeed, normalize_word};

use super::vocabulary::{KeywordEntry, default_keyword_table};

/// Deterministic fallback: each table entry fires at most once, at the first
/// story word matching one of its variants or a regular inflection of it.
/// A gain modifier within the modifier window of that word adjusts the
/// cue's gain.
pub struct KeywordCueSource {
    table: Vec<KeywordEntry>,
    modifiers: GainModifiers,
}

impl KeywordCueSource {
    pub fn new(table: Vec<KeywordEntry>, modifiers: GainModifiers) -> Self {
        Self { table, modifiers }
    }

    pub fn with_defaults(modifiers: GainModifiers) -> Self {
        Self::new(default_keyword_table(), modifiers)
    }

    pub fn extract(&self, story_text: &str) -> Vec<RawCandidate> {
        let words: Vec<String> = story_text.split_whitespace().map(normalize_word).collect();
        let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();

        let mut candidates: Vec<RawCandidate> = self
            .table
            .iter()
            .filter_map(|entry| {
                let index = first_occurrence(&word_refs, entry)?;
                let gain_db = self.modifiers.offset_near(&word_refs, index).unwrap_or(0.0);
                tracing::debug!(
                    key = %entry.key,
                    word_index = index,
                    channel = %entry.channel,
                    gain_db,
                    "Keyword matched"
                );
                Some(
                    RawCandidate::audio(entry.channel, entry.description.clone(), index)
                        .with_gain_db(f64::from(gain_db)),
                )
            })
            .collect();

        candidates.sort_by(|a, b| {
            a.word_index
                .unwrap_or(0.0)
                .total_cmp(&b.word_index.unwrap_or(0.0))
        });
        candidates
    }
}

fn first_occurrence(words: &[&str], entry: &KeywordEntry) -> Option<usize> {
    entry
        .variants
        .iter()
        .filter_map(|variant| {
            let phrase: Vec<&str> = variant.split_whitespace().collect();
            if phrase.is_empty() || phrase.len() > words.len() {
                return None;
            }
            words.windows(phrase.len()).position(|window| {
                window
                    .iter()
                    .zip(&phrase)
                    .all(|(word, variant)| inflection_of(word, variant))
            })
        })
        .min()
}

const INFLECTIONS: &[&str] = &["s", "es", "ed", "d", "ing", "er", "ers"];

/// `word` is `variant` itself or `variant` plus a regular inflection, so
/// "rained", "dogs" and "barks" all count.
fn inflection_of(word: &str, variant: &str) -> bool {
    match word.strip_prefix(variant) {
        Some("") => true,
        Some(rest) => INFLECTIONS.contains(&rest),
        None => false,
    }
}

#[async_trait]
impl CueSource for KeywordCueSource {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn propose(&self, story_text: &str, _speed: ReadingSpeed) -> Option<Vec<RawCandidate>> {
        Some(self.extract(story_text))
    }
}

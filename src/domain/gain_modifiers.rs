use std::collections::HashMap;

/// Intensity words ("loud", "faint", ...) and the dB offset they imply for a
/// nearby cue.
#[derive(Debug, Clone, PartialEq)]
pub struct GainModifiers {
    offsets: HashMap<String, f32>,
    window: usize,
}

impl GainModifiers {
    pub const LOUD_DB: f32 = 6.0;
    pub const FAINT_DB: f32 = -6.0;
    pub const DEFAULT_WINDOW: usize = 2;

    pub fn new(offsets: HashMap<String, f32>, window: usize) -> Self {
        let offsets = offsets
            .into_iter()
            .map(|(word, db)| (word.to_lowercase(), db))
            .collect();
        Self { offsets, window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn offsets(&self) -> &HashMap<String, f32> {
        &self.offsets
    }

    pub fn offset_for(&self, word: &str) -> Option<f32> {
        self.offsets.get(&normalize_word(word)).copied()
    }

    pub fn is_modifier(&self, word: &str) -> bool {
        self.offset_for(word).is_some()
    }

    /// Offset of the closest modifier within `window` words of `index`, if any.
    ///
    /// Ties go to the earlier word, so "loud dog barking loud" reads left to right.
    pub fn offset_near(&self, words: &[&str], index: usize) -> Option<f32> {
        let lo = index.saturating_sub(self.window);
        let hi = index.saturating_add(self.window).min(words.len().saturating_sub(1));
        if words.is_empty() || lo > hi {
            return None;
        }
        (lo..=hi)
            .filter_map(|i| self.offset_for(words[i]).map(|db| (i.abs_diff(index), i, db)))
            .min_by_key(|(distance, i, _)| (*distance, *i))
            .map(|(_, _, db)| db)
    }
}

impl Default for GainModifiers {
    fn default() -> Self {
        let offsets = [
            ("loud", Self::LOUD_DB),
            ("roaring", Self::LOUD_DB),
            ("blaring", Self::LOUD_DB),
            ("faint", Self::FAINT_DB),
            ("soft", Self::FAINT_DB),
            ("quiet", Self::FAINT_DB),
            ("little", Self::FAINT_DB),
        ]
        .into_iter()
        .map(|(word, db)| (word.to_string(), db))
        .collect();
        Self::new(offsets, Self::DEFAULT_WINDOW)
    }
}

/// Lowercases a story token and strips surrounding punctuation.
pub fn normalize_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
        .to_lowercase()
}

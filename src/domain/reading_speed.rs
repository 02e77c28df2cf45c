use std::fmt;

/// Reading pace in words per second. Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingSpeed(f64);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("reading speed must be a finite number of words per second greater than zero, got {0}")]
pub struct InvalidReadingSpeed(pub f64);

impl ReadingSpeed {
    pub const DEFAULT_WPS: f64 = 2.0;

    pub fn new(words_per_second: f64) -> Result<Self, InvalidReadingSpeed> {
        if words_per_second.is_finite() && words_per_second > 0.0 {
            Ok(Self(words_per_second))
        } else {
            Err(InvalidReadingSpeed(words_per_second))
        }
    }

    pub fn words_per_second(&self) -> f64 {
        self.0
    }

    /// Timestamp at which the word at `word_index` is reached: `ceil(index / wps * 1000)`.
    pub fn ms_at_word(&self, word_index: u64) -> u64 {
        ((word_index as f64 / self.0) * 1000.0).ceil() as u64
    }

    /// Nominal narration length of `word_count` words.
    pub fn duration_ms(&self, word_count: usize) -> u64 {
        self.ms_at_word(word_count as u64)
    }
}

impl Default for ReadingSpeed {
    fn default() -> Self {
        Self(Self::DEFAULT_WPS)
    }
}

impl fmt::Display for ReadingSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wps", self.0)
    }
}

/// Words are whitespace-separated tokens, matching how cue sources index them.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

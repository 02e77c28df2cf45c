use std::fmt;

use serde::Serialize;

use super::channel::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CueId(u32);

impl CueId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A synthesized sound: effect, ambience bed or score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioCue {
    pub description: String,
    pub gain_db: f32,
    pub fade_ms: u64,
}

impl AudioCue {
    pub const DEFAULT_FADE_MS: u64 = 500;

    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            gain_db: 0.0,
            fade_ms: Self::DEFAULT_FADE_MS,
        }
    }

    pub fn with_gain_db(mut self, gain_db: f32) -> Self {
        self.gain_db = gain_db;
        self
    }

    pub fn with_fade_ms(mut self, fade_ms: u64) -> Self {
        self.fade_ms = fade_ms;
        self
    }
}

/// A slice of the story read aloud with a given performance direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarratorCue {
    pub text_segment: String,
    pub voice_style_description: String,
}

impl NarratorCue {
    pub const DEFAULT_VOICE_STYLE: &'static str = "A narrator speaks at a moderate pace with a clear, \
         warm tone, captured in a close-sounding recording with excellent quality.";

    pub fn new(text_segment: impl Into<String>, voice_style_description: impl Into<String>) -> Self {
        Self {
            text_segment: text_segment.into(),
            voice_style_description: voice_style_description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CueContent {
    Audio(AudioCue),
    Narration(NarratorCue),
}

/// A finalized, timed audio event. Only the timeline normalizer builds these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cue {
    pub id: CueId,
    pub channel: Channel,
    pub start_time_ms: u64,
    pub duration_ms: u64,
    pub content: CueContent,
}

impl Cue {
    pub fn end_time_ms(&self) -> u64 {
        self.start_time_ms + self.duration_ms
    }

    pub fn overlaps(&self, other: &Cue) -> bool {
        self.start_time_ms < other.end_time_ms() && other.start_time_ms < self.end_time_ms()
    }

    /// Post-synthesis gain; narration is never attenuated.
    pub fn gain_db(&self) -> f32 {
        match &self.content {
            CueContent::Audio(audio) => audio.gain_db,
            CueContent::Narration(_) => 0.0,
        }
    }

    /// Symmetric fade length, clamped to half the cue so fades never cross.
    pub fn effective_fade_ms(&self) -> u64 {
        match &self.content {
            CueContent::Audio(audio) => audio.fade_ms.min(self.duration_ms / 2),
            CueContent::Narration(_) => 0,
        }
    }

    pub fn audio(&self) -> Option<&AudioCue> {
        match &self.content {
            CueContent::Audio(audio) => Some(audio),
            CueContent::Narration(_) => None,
        }
    }

    pub fn narration(&self) -> Option<&NarratorCue> {
        match &self.content {
            CueContent::Narration(narration) => Some(narration),
            CueContent::Audio(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match &self.content {
            CueContent::Audio(audio) => &audio.description,
            CueContent::Narration(narration) => &narration.text_segment,
        }
    }
}

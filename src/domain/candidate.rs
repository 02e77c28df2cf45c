use serde_json::{Map, Value};

use super::channel::Channel;
use super::cue::{AudioCue, CueContent, NarratorCue};

const DEFAULT_AUDIO_DESCRIPTION: &str = "ambient texture";

/// An untrusted cue proposal as produced by a cue source.
///
/// Every field is optional: sources may omit, mistype or invent anything.
/// Numeric fields stay `f64` so negative and fractional values survive until
/// the normalizer clamps them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCandidate {
    pub channel: Option<String>,
    pub description: Option<String>,
    pub text_segment: Option<String>,
    pub voice_style: Option<String>,
    pub word_index: Option<f64>,
    pub start_time_ms: Option<f64>,
    pub duration_ms: Option<f64>,
    pub gain_db: Option<f64>,
    pub fade_ms: Option<f64>,
}

impl RawCandidate {
    pub fn audio(channel: Channel, description: impl Into<String>, word_index: usize) -> Self {
        Self {
            channel: Some(channel.as_str().to_string()),
            description: Some(description.into()),
            word_index: Some(word_index as f64),
            ..Self::default()
        }
    }

    pub fn narration(text_segment: impl Into<String>, voice_style: impl Into<String>) -> Self {
        Self {
            channel: Some(Channel::Narrator.as_str().to_string()),
            text_segment: Some(text_segment.into()),
            voice_style: Some(voice_style.into()),
            ..Self::default()
        }
    }

    pub fn with_gain_db(mut self, gain_db: f64) -> Self {
        self.gain_db = Some(gain_db);
        self
    }

    pub fn with_start_ms(mut self, start_time_ms: f64) -> Self {
        self.start_time_ms = Some(start_time_ms);
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Reads a candidate from one element of a model's JSON answer.
    ///
    /// Accepts the field spellings the prompts ask for as well as the older
    /// `audio_type`/`audio_class`/`weight_db`/`story` names. Numbers may arrive
    /// as JSON numbers or numeric strings. Returns `None` only when the value
    /// is not an object at all.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            channel: text_field(object, &["channel", "audio_type", "type"]),
            description: text_field(object, &["description", "audio_class", "prompt"]),
            text_segment: text_field(object, &["text_segment", "story"]),
            voice_style: text_field(
                object,
                &["voice_style_description", "narrator_description", "voice_style"],
            ),
            word_index: number_field(object, &["trigger_word_index", "word_index"]),
            start_time_ms: number_field(object, &["start_time_ms", "start_ms"]),
            duration_ms: number_field(object, &["duration_ms"]),
            gain_db: number_field(object, &["gain_db", "weight_db"]),
            fade_ms: number_field(object, &["fade_ms"]),
        })
    }
}

fn text_field(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        })
}

fn number_field(object: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(|value| match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|n| n.is_finite())
}

/// A candidate promoted to a typed variant, still lacking id and final timing.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCue {
    pub channel: Channel,
    pub content: CueContent,
    pub explicit_start_ms: Option<f64>,
    pub word_index: Option<f64>,
    pub explicit_duration_ms: Option<f64>,
}

/// Trust boundary for cue proposals. Never fails: anything missing or
/// unrecognized falls back to a default.
///
/// Narration is detected by content as well as by tag, since sources often
/// drop the tag but keep the text to be read.
pub fn parse_candidate(raw: &RawCandidate, default_fade_ms: u64) -> PendingCue {
    let tagged_narrator = raw
        .channel
        .as_deref()
        .map(|tag| Channel::from_tag(tag) == Channel::Narrator)
        .unwrap_or(false);
    let carries_narration = raw
        .text_segment
        .as_deref()
        .is_some_and(|text| !text.trim().is_empty());

    let (channel, content) = if tagged_narrator || carries_narration {
        let text_segment = raw
            .text_segment
            .clone()
            .or_else(|| raw.description.clone())
            .unwrap_or_default();
        let voice_style = raw
            .voice_style
            .clone()
            .unwrap_or_else(|| NarratorCue::DEFAULT_VOICE_STYLE.to_string());
        (
            Channel::Narrator,
            CueContent::Narration(NarratorCue::new(text_segment, voice_style)),
        )
    } else {
        let channel = raw
            .channel
            .as_deref()
            .map(Channel::from_tag)
            .unwrap_or(Channel::Sfx);
        let description = raw
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_AUDIO_DESCRIPTION.to_string());
        let fade_ms = raw
            .fade_ms
            .filter(|f| *f >= 0.0)
            .map(|f| f.round() as u64)
            .unwrap_or(default_fade_ms);
        let audio = AudioCue::new(description)
            .with_gain_db(raw.gain_db.unwrap_or(0.0) as f32)
            .with_fade_ms(fade_ms);
        (channel, CueContent::Audio(audio))
    };

    PendingCue {
        channel,
        content,
        explicit_start_ms: raw.start_time_ms,
        word_index: raw.word_index,
        explicit_duration_ms: raw.duration_ms,
    }
}

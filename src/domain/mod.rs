mod candidate;
mod channel;
mod cue;
mod gain_modifiers;
mod reading_speed;
mod timeline;
mod waveform;

pub use candidate::{PendingCue, RawCandidate, parse_candidate};
pub use channel::Channel;
pub use cue::{AudioCue, Cue, CueContent, CueId, NarratorCue};
pub use gain_modifiers::{GainModifiers, normalize_word};
pub use reading_speed::{InvalidReadingSpeed, ReadingSpeed, word_count};
pub use timeline::Timeline;
pub use waveform::{Waveform, db_to_linear, samples_for_ms};

use crate::domain::{CueId, Waveform, samples_for_ms};

use super::render_dispatcher::RenderedCue;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MixError {
    #[error("clip for cue {cue_id} is {actual} Hz but the mix runs at {expected} Hz")]
    SampleRateMismatch {
        cue_id: CueId,
        expected: u32,
        actual: u32,
    },
}

/// Mixed canvas plus the clips that could not be placed on it.
#[derive(Debug, Clone, PartialEq)]
pub struct MixReport {
    pub waveform: Waveform,
    pub skipped: Vec<MixError>,
}

/// Overlays rendered clips onto a silent canvas by pure superposition.
///
/// Each clip is trimmed to its cue duration, faded and gained, then summed
/// into the canvas at its start offset. Anything past the canvas end is cut.
/// A clip at the wrong sample rate is left out and reported; the rest still mix.
/// No limiting or normalization happens here, so loud overlaps can exceed
/// full scale.
#[derive(Debug, Clone)]
pub struct Mixer {
    sample_rate: u32,
}

impl Mixer {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn mix(&self, total_duration_ms: u64, clips: &[RenderedCue]) -> MixReport {
        let mut canvas = Waveform::silent(total_duration_ms, self.sample_rate);
        let mut skipped = Vec::new();

        for clip in clips {
            if let Err(e) = self.overlay(&mut canvas, clip) {
                tracing::warn!(cue_id = %clip.cue.id, error = %e, "Leaving clip out of the mix");
                skipped.push(e);
            }
        }

        tracing::debug!(
            clips = clips.len(),
            skipped = skipped.len(),
            total_duration_ms,
            peak = canvas.peak(),
            "Mixed soundscape"
        );
        MixReport {
            waveform: canvas,
            skipped,
        }
    }

    /// Mixes clips that were rendered elsewhere. The canvas spans up to the
    /// latest cue end.
    pub fn mix_prerendered(&self, clips: &[RenderedCue]) -> MixReport {
        let total_duration_ms = clips
            .iter()
            .map(|clip| clip.cue.end_time_ms())
            .max()
            .unwrap_or(0);
        self.mix(total_duration_ms, clips)
    }

    fn overlay(&self, canvas: &mut Waveform, rendered: &RenderedCue) -> Result<(), MixError> {
        let cue = &rendered.cue;
        if rendered.waveform.sample_rate != self.sample_rate {
            return Err(MixError::SampleRateMismatch {
                cue_id: cue.id,
                expected: self.sample_rate,
                actual: rendered.waveform.sample_rate,
            });
        }

        let mut clip = rendered.waveform.clone();
        clip.truncate_to_ms(cue.duration_ms);
        clip.apply_fades(cue.effective_fade_ms());
        clip.apply_gain_db(cue.gain_db());

        let offset = samples_for_ms(cue.start_time_ms, self.sample_rate);
        if offset >= canvas.len() {
            tracing::trace!(cue_id = %cue.id, "Clip starts past the canvas end");
            return Ok(());
        }

        for (target, source) in canvas.samples[offset..].iter_mut().zip(clip.samples.iter()) {
            *target += *source;
        }
        Ok(())
    }
}

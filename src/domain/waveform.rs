/// Mono PCM samples in `[-1, 1]` at a fixed sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn silent(duration_ms: u64, sample_rate: u32) -> Self {
        Self::new(
            vec![0.0; samples_for_ms(duration_ms, sample_rate)],
            sample_rate,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (self.samples.len() as u64 * 1000) / self.sample_rate as u64
    }

    pub fn truncate_to_ms(&mut self, duration_ms: u64) {
        let limit = samples_for_ms(duration_ms, self.sample_rate);
        self.samples.truncate(limit);
    }

    pub fn apply_linear_gain(&mut self, gain: f32) {
        if (gain - 1.0).abs() < f32::EPSILON {
            return;
        }
        for sample in self.samples.iter_mut() {
            *sample *= gain;
        }
    }

    pub fn apply_gain_db(&mut self, gain_db: f32) {
        self.apply_linear_gain(db_to_linear(gain_db));
    }

    /// Linear fade-in over the first `fade_ms` and fade-out over the last `fade_ms`.
    pub fn apply_fades(&mut self, fade_ms: u64) {
        let fade_len = samples_for_ms(fade_ms, self.sample_rate).min(self.samples.len() / 2);
        if fade_len == 0 {
            return;
        }
        let total = self.samples.len();
        for i in 0..fade_len {
            let factor = i as f32 / fade_len as f32;
            self.samples[i] *= factor;
            self.samples[total - 1 - i] *= factor;
        }
    }

    pub fn peak(&self) -> f32 {
        self.samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max)
    }
}

pub fn samples_for_ms(duration_ms: u64, sample_rate: u32) -> usize {
    ((duration_ms as u128 * sample_rate as u128) / 1000) as usize
}

pub fn db_to_linear(gain_db: f32) -> f32 {
    10f32.powf(gain_db / 20.0)
}

use std::f32::consts::TAU;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{AudioGenerator, RenderError, SpeechSynthesizer};
use crate::domain::{ReadingSpeed, Waveform, samples_for_ms, word_count};

const MOCK_AMPLITUDE: f32 = 0.5;

/// Pitch derived from the text so different cues stay distinguishable.
fn tone_frequency(text: &str) -> f32 {
    let sum: u32 = text.bytes().map(u32::from).sum();
    220.0 + (sum % 440) as f32
}

fn tone(duration_ms: u64, frequency: f32, sample_rate: u32) -> Waveform {
    let len = samples_for_ms(duration_ms, sample_rate);
    let samples = (0..len)
        .map(|i| MOCK_AMPLITUDE * (TAU * frequency * i as f32 / sample_rate as f32).sin())
        .collect();
    Waveform::new(samples, sample_rate)
}

/// Deterministic sine tones instead of diffusion output.
pub struct MockAudioGenerator {
    sample_rate: u32,
    delay: Duration,
}

impl MockAudioGenerator {
    pub fn new(sample_rate: u32, delay: Duration) -> Self {
        Self { sample_rate, delay }
    }
}

#[async_trait]
impl AudioGenerator for MockAudioGenerator {
    async fn generate(
        &mut self,
        description: &str,
        duration_seconds: u32,
    ) -> Result<Waveform, RenderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(tone(
            u64::from(duration_seconds) * 1000,
            tone_frequency(description),
            self.sample_rate,
        ))
    }
}

/// Tone lasting as long as the text takes to read at the default pace.
pub struct MockSpeechSynthesizer {
    sample_rate: u32,
    delay: Duration,
}

impl MockSpeechSynthesizer {
    pub fn new(sample_rate: u32, delay: Duration) -> Self {
        Self { sample_rate, delay }
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(
        &mut self,
        text: &str,
        voice_style_description: &str,
    ) -> Result<Waveform, RenderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let duration_ms = ReadingSpeed::default().duration_ms(word_count(text));
        Ok(tone(
            duration_ms,
            tone_frequency(voice_style_description),
            self.sample_rate,
        ))
    }
}

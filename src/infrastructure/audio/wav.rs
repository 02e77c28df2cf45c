//! 16-bit PCM mono WAV export.

use std::io::Cursor;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose};

use crate::domain::Waveform;

#[derive(Debug, thiserror::Error)]
pub enum WavError {
    #[error("wav encoding: {0}")]
    Encoding(#[from] hound::Error),
    #[error("cannot write audio with a sample rate of 0")]
    ZeroSampleRate,
}

fn spec_for(waveform: &Waveform) -> Result<hound::WavSpec, WavError> {
    if waveform.sample_rate == 0 {
        return Err(WavError::ZeroSampleRate);
    }
    Ok(hound::WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    })
}

/// Out-of-range samples are clipped here, not earlier in the mix.
fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

pub fn write_wav(path: impl AsRef<Path>, waveform: &Waveform) -> Result<(), WavError> {
    let spec = spec_for(waveform)?;
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &s in &waveform.samples {
        writer.write_sample(to_pcm16(s))?;
    }
    writer.finalize()?;
    Ok(())
}

pub fn encode_wav(waveform: &Waveform) -> Result<Vec<u8>, WavError> {
    let spec = spec_for(waveform)?;
    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec)?;
        for &s in &waveform.samples {
            writer.write_sample(to_pcm16(s))?;
        }
        writer.finalize()?;
    }
    Ok(bytes)
}

pub fn encode_wav_base64(waveform: &Waveform) -> Result<String, WavError> {
    Ok(general_purpose::STANDARD.encode(encode_wav(waveform)?))
}

/// Reads a WAV file as mono, averaging channels.
pub fn read_wav(path: impl AsRef<Path>) -> Result<Waveform, WavError> {
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_val = (1u32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let channels = usize::from(spec.channels.max(1));
    let samples = if channels > 1 {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        interleaved
    };

    Ok(Waveform::new(samples, spec.sample_rate))
}

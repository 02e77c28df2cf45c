use storyscore::domain::Waveform;
use storyscore::infrastructure::audio::{
    WavError, decode_clip, encode_wav, encode_wav_base64, read_wav, write_wav,
};

fn ramp(len: usize, sample_rate: u32) -> Waveform {
    let samples = (0..len).map(|i| (i as f32 / len as f32) - 0.5).collect();
    Waveform::new(samples, sample_rate)
}

#[test]
fn given_waveform_when_written_and_read_then_samples_survive_quantization() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mix.wav");
    let original = ramp(1000, 8000);

    write_wav(&path, &original).unwrap();
    let loaded = read_wav(&path).unwrap();

    assert_eq!(loaded.sample_rate, 8000);
    assert_eq!(loaded.len(), 1000);
    for (a, b) in original.samples.iter().zip(&loaded.samples) {
        assert!((a - b).abs() < 1e-3);
    }
}

#[test]
fn given_samples_beyond_full_scale_when_written_then_they_are_clipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loud.wav");

    write_wav(&path, &Waveform::new(vec![1.6, -2.0, 0.0], 8000)).unwrap();
    let loaded = read_wav(&path).unwrap();

    assert!(loaded.samples[0] <= 1.0 && loaded.samples[0] > 0.99);
    assert!(loaded.samples[1] >= -1.0 && loaded.samples[1] < -0.99);
}

#[test]
fn given_zero_sample_rate_when_encoding_then_error() {
    let result = encode_wav(&Waveform::new(vec![0.1], 0));

    assert!(matches!(result, Err(WavError::ZeroSampleRate)));
}

#[test]
fn given_encoded_clip_at_target_rate_when_decoding_then_length_is_unchanged() {
    let bytes = encode_wav(&ramp(4000, 16_000)).unwrap();

    let decoded = decode_clip(&bytes, 16_000).unwrap();

    assert_eq!(decoded.sample_rate, 16_000);
    assert_eq!(decoded.len(), 4000);
}

#[test]
fn given_encoded_clip_at_other_rate_when_decoding_then_it_is_resampled() {
    let bytes = encode_wav(&ramp(8000, 8000)).unwrap();

    let decoded = decode_clip(&bytes, 16_000).unwrap();

    assert_eq!(decoded.sample_rate, 16_000);
    assert!(decoded.len() <= 16_000);
    assert!(decoded.len() > 15_000);
}

#[test]
fn given_garbage_bytes_when_decoding_then_decoding_error() {
    let result = decode_clip(b"definitely not audio", 16_000);

    assert!(result.is_err());
}

#[test]
fn given_waveform_when_base64_encoding_then_riff_header_is_encoded() {
    let encoded = encode_wav_base64(&ramp(10, 8000)).unwrap();

    // "RIFF" in base64
    assert!(encoded.starts_with("UklGR"));
}

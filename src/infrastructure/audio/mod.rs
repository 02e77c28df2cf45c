mod audio_decoder;
mod mock_generators;
mod remote_audio_generator;
mod remote_speech_synthesizer;
mod renderer_factory;
mod wav;

pub use audio_decoder::decode_clip;
pub use mock_generators::{MockAudioGenerator, MockSpeechSynthesizer};
pub use remote_audio_generator::RemoteAudioGenerator;
pub use remote_speech_synthesizer::RemoteSpeechSynthesizer;
pub use renderer_factory::{RendererFactory, RendererFactoryError};
pub use wav::{WavError, encode_wav, encode_wav_base64, read_wav, write_wav};

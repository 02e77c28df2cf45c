use std::time::Duration;

use axum::routing::post;
use axum::{Json, Router};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use storyscore::application::ports::{AudioGenerator, RenderError, SpeechSynthesizer};
use storyscore::domain::Waveform;
use storyscore::infrastructure::audio::{
    RemoteAudioGenerator, RemoteSpeechSynthesizer, encode_wav,
};

const SERVER_RATE: u32 = 8_000;
const TIMEOUT: Duration = Duration::from_secs(10);

/// Answers with a WAV as long as requested, or an error for "broken" prompts.
async fn render(Json(body): Json<Value>) -> axum::response::Response {
    if body["prompt"].as_str().is_some_and(|p| p.contains("broken")) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "model crashed").into_response();
    }
    let seconds = body["duration_seconds"].as_u64().unwrap_or(1);
    let samples = vec![0.25; (seconds * u64::from(SERVER_RATE)) as usize];
    let wav = encode_wav(&Waveform::new(samples, SERVER_RATE)).unwrap();
    (StatusCode::OK, wav).into_response()
}

async fn synthesize(Json(body): Json<Value>) -> axum::response::Response {
    let has_style = body["description"].as_str().is_some_and(|d| !d.is_empty());
    if !has_style {
        return (StatusCode::BAD_REQUEST, "description required").into_response();
    }
    let wav = encode_wav(&Waveform::new(vec![0.1; 4_000], SERVER_RATE)).unwrap();
    (StatusCode::OK, wav).into_response()
}

async fn start_mock_render_server() -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let app = Router::new()
        .route("/generate", post(render))
        .route("/synthesize", post(synthesize));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

#[tokio::test]
async fn given_render_server_when_generating_then_wav_is_decoded_at_requested_length() {
    let (base_url, shutdown_tx) = start_mock_render_server().await;
    let mut generator = RemoteAudioGenerator::new(
        &format!("{base_url}/"),
        RemoteAudioGenerator::DEFAULT_STEPS,
        SERVER_RATE,
        TIMEOUT,
    );

    let waveform = generator.generate("rain on a tin roof", 2).await.unwrap();

    assert_eq!(generator.endpoint(), base_url);
    assert_eq!(waveform.sample_rate, SERVER_RATE);
    assert_eq!(waveform.len(), 16_000);
    assert!((waveform.samples[100] - 0.25).abs() < 1e-3);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_server_error_when_generating_then_generation_failed() {
    let (base_url, shutdown_tx) = start_mock_render_server().await;
    let mut generator = RemoteAudioGenerator::new(&base_url, 48, SERVER_RATE, TIMEOUT);

    let result = generator.generate("broken prompt", 1).await;

    assert!(matches!(result, Err(RenderError::GenerationFailed(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unreachable_server_when_generating_then_api_request_failed() {
    let mut generator = RemoteAudioGenerator::new("http://127.0.0.1:9", 48, SERVER_RATE, TIMEOUT);

    let result = generator.generate("rain", 1).await;

    assert!(matches!(result, Err(RenderError::ApiRequestFailed(_))));
}

#[tokio::test]
async fn given_speech_server_when_synthesizing_then_narration_is_decoded() {
    let (base_url, shutdown_tx) = start_mock_render_server().await;
    let mut synthesizer = RemoteSpeechSynthesizer::new(&base_url, SERVER_RATE, TIMEOUT);

    let waveform = synthesizer
        .synthesize("Once upon a time", "a calm, low voice")
        .await
        .unwrap();

    assert_eq!(waveform.len(), 4_000);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_blank_text_when_synthesizing_then_fails_without_request() {
    let mut synthesizer = RemoteSpeechSynthesizer::new("http://127.0.0.1:9", SERVER_RATE, TIMEOUT);

    let result = synthesizer.synthesize("   ", "calm").await;

    assert!(matches!(result, Err(RenderError::GenerationFailed(_))));
}

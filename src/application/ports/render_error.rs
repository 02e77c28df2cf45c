#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("generation failed: {0}")]
    GenerationFailed(String),
    #[error("renderer returned no audio")]
    EmptyOutput,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("render timed out after {0} ms")]
    TimedOut(u64),
    #[error("render worker crashed: {0}")]
    WorkerCrashed(String),
}

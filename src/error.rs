use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("sample rate must be greater than zero")]
    InvalidSampleRate,
    #[error("sample rate mismatch: expected {expected}, got {actual}")]
    SampleRateMismatch { expected: f64, actual: f64 },
    #[error("batch contains no samples")]
    EmptyBatch,
    #[error("buffer not initialized yet; feed at least one batch first")]
    BufferUninitialized,
    #[error("sample source failed: {0}")]
    Source(String),
}

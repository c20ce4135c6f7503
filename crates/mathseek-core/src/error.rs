use thiserror::Error;

/// Failures at the crate boundary.
///
/// The decode and render pipeline itself never fails; only reading raw
/// payloads and building prompts can.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid equation provided.")]
    InvalidEquation,

    #[error("Question must not be empty.")]
    InvalidQuestion,
}

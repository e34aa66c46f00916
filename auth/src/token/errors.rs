use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are never reported through this type to callers of
/// [`TokenCodec::verify`](super::TokenCodec::verify); they collapse into a
/// bare `false` so that a rejected token reveals nothing about why it was
/// rejected.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),
}

use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Signing produced an empty token")]
    EmptyToken,

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),
}

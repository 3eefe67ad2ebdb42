//! Error type for generation backends. Every failure a provider can hit collapses into
//! [`GenerationError`]; callers never retry.

use crate::types::{ProviderKind, Resolution};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The OpenAI-compatible API rejected the request (auth, quota, content policy, bad model...).
    #[error("API error: {0}")]
    Api(String),

    /// A local model server answered with a non-success status.
    #[error("server error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to decode: {0}")]
    Decode(String),

    #[error("empty response: {0}")]
    EmptyResponse(String),

    #[error("{provider} backend does not support resolution {resolution}")]
    UnsupportedResolution {
        provider: ProviderKind,
        resolution: Resolution,
    },
}

impl From<async_openai::error::OpenAIError> for GenerationError {
    fn from(e: async_openai::error::OpenAIError) -> Self {
        Self::Api(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GenerationError::Status {
            status: 503,
            message: "model loading".into(),
        };
        assert_eq!(err.to_string(), "server error: 503 - model loading");

        let err = GenerationError::UnsupportedResolution {
            provider: ProviderKind::Hosted,
            resolution: Resolution::new(640, 480),
        };
        assert_eq!(
            err.to_string(),
            "hosted backend does not support resolution 640x480"
        );
    }
}

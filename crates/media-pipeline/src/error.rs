use generation_provider::GenerationError;

use crate::state::FailureKind;

/// Everything that can end a media request early. Caught at the command handler, logged,
/// and turned into one generic reply.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

impl PipelineError {
    /// The terminal state a request lands in when this error ends it.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::Validation,
            Self::Generation(_) => FailureKind::Generation,
            Self::Io(_) => FailureKind::Io,
            Self::Encoding(_) => FailureKind::Encoding,
            Self::Delivery(_) => FailureKind::Delivery,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

use thiserror::Error;

/// Errors that can occur while building trust parameters
#[derive(Error, Debug)]
pub enum TrustError {
    #[error("Invalid tier parameters: {0}")]
    InvalidParameters(String),

    #[error("Missing fallback row: {0}")]
    MissingFallback(String),

    #[error(transparent)]
    Validation(#[from] agentfin_types::ValidationError),
}

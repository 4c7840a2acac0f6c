use thiserror::Error;

/// Errors that can occur during hashing and identifier operations
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Serialization failed: {0}")]
    SerializationError(String),

    #[error("Invalid hash format: {0}")]
    InvalidHashFormat(String),

    #[error("Random source failed: {0}")]
    RandomSourceError(String),
}

impl From<serde_json::Error> for CryptoError {
    fn from(err: serde_json::Error) -> Self {
        CryptoError::SerializationError(err.to_string())
    }
}

impl From<hex::FromHexError> for CryptoError {
    fn from(err: hex::FromHexError) -> Self {
        CryptoError::InvalidHashFormat(err.to_string())
    }
}

impl From<rand::Error> for CryptoError {
    fn from(err: rand::Error) -> Self {
        CryptoError::RandomSourceError(err.to_string())
    }
}

//! Cryptographic primitives for agentfin
//!
//! This crate provides the small set of primitives the agreement builder needs:
//! - Content hashing (SHA-256 over canonical JSON)
//! - Agreement identifier generation
//! - Content URI placeholders
//!
//! Randomness is always supplied by the caller, so a seeded generator makes
//! every output reproducible in tests.

mod error;
mod hash;
mod ids;

pub use error::CryptoError;
pub use hash::ContentHash;
pub use ids::{agreement_id, content_uri, CONTENT_URI_SCHEME};

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, CryptoError>;

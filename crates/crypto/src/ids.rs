use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::{CryptoRng, RngCore};
use uuid::Uuid;

/// URI scheme for agreement content placeholders
pub const CONTENT_URI_SCHEME: &str = "ar://";

/// Draw a 128-bit agreement identifier.
///
/// The bytes are used as-is, no version or variant bits are set, so the
/// result is UUID-shaped (8-4-4-4-12 hex) without being an RFC 4122 UUID.
pub fn agreement_id<R: RngCore + CryptoRng>(rng: &mut R) -> crate::Result<Uuid> {
    let mut bytes = [0u8; 16];
    rng.try_fill_bytes(&mut bytes)?;
    Ok(Uuid::from_bytes(bytes))
}

/// Draw a placeholder content URI: the scheme followed by 43 url-safe
/// base64 characters (32 random bytes).
pub fn content_uri<R: RngCore + CryptoRng>(rng: &mut R) -> crate::Result<String> {
    let mut bytes = [0u8; 32];
    rng.try_fill_bytes(&mut bytes)?;
    Ok(format!("{}{}", CONTENT_URI_SCHEME, URL_SAFE_NO_PAD.encode(bytes)))
}

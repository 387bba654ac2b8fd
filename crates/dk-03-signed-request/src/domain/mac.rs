//! HMAC-SHA256 tags over request bodies.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of a raw tag in bytes.
pub const TAG_LEN: usize = 32;

/// Compute the HMAC-SHA256 tag of `payload` under `secret`.
pub fn sign(payload: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(m) => m,
        Err(_) => return Vec::new(),
    };
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// [`sign`], base64 encoded for the `hmac` header.
pub fn sign_base64(payload: &[u8], secret: &[u8]) -> String {
    STANDARD.encode(sign(payload, secret))
}

/// Check `tag` against `payload` under `secret`.
///
/// Uses constant-time comparison to prevent timing attacks.
pub fn verify_tag(payload: &[u8], tag: &[u8], secret: &[u8]) -> bool {
    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(payload);
    mac.verify_slice(tag).is_ok()
}

//! RFC 4648 base32, the encoding authenticator apps use for TOTP secrets.
//!
//! Decoding is case-insensitive, ignores spaces and `=` padding. Encoding
//! produces upper case without padding.

use super::errors::SecretError;
use data_encoding::{DecodeKind, BASE32_NOPAD};

pub fn encode(bytes: &[u8]) -> String {
    BASE32_NOPAD.encode(bytes)
}

pub fn decode(text: &str) -> Result<Vec<u8>, SecretError> {
    let symbols: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '=')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    BASE32_NOPAD
        .decode(symbols.as_bytes())
        .map_err(|e| match e.kind {
            DecodeKind::Length => SecretError::InvalidLength(symbols.chars().count()),
            // Symbol, or a last symbol with bits that belong to no byte
            _ => SecretError::InvalidCharacter(
                symbols
                    .get(e.position..)
                    .and_then(|rest| rest.chars().next())
                    .unwrap_or('?'),
            ),
        })
}

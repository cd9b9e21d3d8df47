//! Reversible obfuscation for sensitive config values.
//!
//! URL-safe base64 over the UTF-8 bytes of the input. This keeps values out
//! of casual view when the config file is opened in an editor; it is not
//! encryption and must not be treated as a security boundary.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeItemError {
    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Decoded bytes are not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Encode `item` as URL-safe base64 text (padded).
#[must_use]
pub fn encode_item(item: &str) -> String {
    URL_SAFE.encode(item.as_bytes())
}

/// Decode a string produced by [`encode_item`].
///
/// Never called by the stores themselves; provided for callers that need the
/// original value back.
///
/// # Errors
///
/// Returns [`DecodeItemError`] when `item` is not valid base64 or the
/// decoded bytes are not valid UTF-8.
pub fn decode_item(item: &str) -> Result<String, DecodeItemError> {
    let bytes = URL_SAFE.decode(item.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

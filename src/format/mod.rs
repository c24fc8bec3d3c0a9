//! Text encoding of a derived (digest, salt) pair.
//!
//! Serialized form:
//! ```text
//! base64(digest) | base64(salt)
//! ```
//! The separator is a single character reserved outside the standard
//! base64 alphabet, so splitting is unambiguous. Decoding takes the
//! first two segments and ignores anything after a second separator.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::ParseError;

/// Default separator between the digest and salt segments.
pub const DEFAULT_SEPARATOR: char = '|';

/// True if `c` can occur in standard base64 output and is therefore
/// unusable as a separator.
pub(crate) fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=')
}

/// Serializes a digest/salt pair into a single delimited string.
pub fn encode(digest: &[u8], salt: &[u8], separator: char) -> String {
    let digest = STANDARD.encode(digest);
    let salt = STANDARD.encode(salt);

    let mut text = String::with_capacity(digest.len() + separator.len_utf8() + salt.len());
    text.push_str(&digest);
    text.push(separator);
    text.push_str(&salt);
    text
}

/// Parses a delimited string back into (digest, salt) bytes.
///
/// # Errors
///
/// Returns a [`ParseError`] if:
/// - The separator does not occur in the text
/// - The digest or salt segment is empty
/// - Either segment is not valid standard base64
pub fn decode(text: &str, separator: char) -> Result<(Vec<u8>, Vec<u8>), ParseError> {
    let mut segments = text.splitn(3, separator);

    let digest = segments.next().unwrap_or("");
    let salt = segments.next().ok_or(ParseError::MissingSeparator)?;

    if digest.is_empty() {
        return Err(ParseError::EmptyDigest);
    }
    if salt.is_empty() {
        return Err(ParseError::EmptySalt);
    }

    let digest = STANDARD.decode(digest).map_err(ParseError::InvalidBase64)?;
    let salt = STANDARD.decode(salt).map_err(ParseError::InvalidBase64)?;

    Ok((digest, salt))
}

//! Charset detection and transcoding for uploaded CSV bytes.
//!
//! Uploads come from regional tooling that frequently saves files in legacy
//! Chinese code pages. Detection is statistical; anything the detector is not
//! confident about decodes as GB18030.

use encoding_rs::{Encoding, GB18030};
use tracing::debug;

/// Detector confidence that must be exceeded before its guess is trusted.
pub const CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Encoding used when detection is inconclusive.
#[must_use]
pub fn fallback_encoding() -> &'static Encoding {
    GB18030
}

/// Guess the text encoding of `bytes`.
///
/// Returns the detector's encoding when its confidence exceeds
/// [`CONFIDENCE_THRESHOLD`] and the reported charset names an encoding we
/// can decode; otherwise [`fallback_encoding`].
///
/// # Examples
/// ```
/// use fieldtrack::domain::csv_import::{detect_encoding, fallback_encoding};
///
/// assert_eq!(detect_encoding(b""), fallback_encoding());
/// ```
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if bytes.is_empty() {
        return fallback_encoding();
    }
    let (charset, confidence, _language) = chardet::detect(bytes);
    let detected = (confidence > CONFIDENCE_THRESHOLD)
        .then(|| encoding_for_charset(&charset))
        .flatten();
    debug!(
        charset = %charset,
        confidence,
        chosen = detected.unwrap_or_else(fallback_encoding).name(),
        "detected upload encoding"
    );
    detected.unwrap_or_else(fallback_encoding)
}

/// Map a detector charset name onto an `encoding_rs` encoding.
fn encoding_for_charset(charset: &str) -> Option<&'static Encoding> {
    if charset.is_empty() {
        return None;
    }
    let label = chardet::charset2encoding(&charset.to_owned()).to_ascii_lowercase();
    let label = label.strip_suffix("-sig").unwrap_or(&label);
    Encoding::for_label(label.as_bytes())
}

/// Decode `bytes` to text, returning the encoding actually used.
///
/// A byte-order mark overrides the detected encoding. Malformed sequences
/// are replaced with U+FFFD rather than failing the upload.
#[must_use]
pub fn decode_upload(bytes: &[u8]) -> (String, &'static Encoding) {
    let encoding = detect_encoding(bytes);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        debug!(encoding = used.name(), "replaced malformed byte sequences");
    }
    (text.into_owned(), used)
}

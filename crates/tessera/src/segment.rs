//! Segment codec: URL-safe base64 without padding.
//!
//! The alphabet is `A-Z a-z 0-9 - _`, so [`DELIMITER`] can never appear
//! inside an encoded segment. Decoding is strict: padding, foreign
//! characters, impossible lengths and non-zero trailing bits are all
//! rejected, which gives every byte string exactly one accepted encoding.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

pub use base64::DecodeError;

/// Separator between token segments.
pub const DELIMITER: u8 = b'.';

/// Encode bytes into a delimiter-safe segment.
#[must_use]
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a segment back into bytes.
///
/// # Errors
///
/// Returns an error if the input is not canonical unpadded URL-safe base64.
pub fn decode(segment: impl AsRef<[u8]>) -> Result<Vec<u8>, DecodeError> {
    URL_SAFE_NO_PAD.decode(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_without_padding() {
        assert_eq!(encode(b"d"), "ZA");
        assert_eq!(encode(b"da"), "ZGE");
        assert_eq!(encode(b"dat"), "ZGF0");
        assert_eq!(encode(b""), "");
    }

    #[test]
    fn uses_url_safe_alphabet() {
        let encoded = encode([0xfb, 0xff, 0xbf]);
        assert_eq!(encoded, "-_-_");
        assert!(!encoded.contains(['+', '/', '=', '.']));
    }

    #[test]
    fn decodes_what_it_encodes() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        assert_eq!(decode(encode(&bytes)).unwrap(), bytes);
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn rejects_delimiter_and_foreign_characters() {
        assert!(decode("ab.c").is_err());
        assert!(decode("ab+c").is_err());
        assert!(decode("ab/c").is_err());
        assert!(decode("ab c").is_err());
    }

    #[test]
    fn rejects_padding() {
        assert!(decode("ZA==").is_err());
        assert!(decode("ZGE=").is_err());
    }

    #[test]
    fn rejects_impossible_length() {
        // A single trailing character cannot carry a whole byte.
        assert!(decode("ZGF0Z").is_err());
    }

    #[test]
    fn rejects_non_canonical_trailing_bits() {
        // "ZA" is canonical for "d"; "ZB" decodes to the same byte with
        // stray low bits set.
        assert!(decode("ZA").is_ok());
        assert!(decode("ZB").is_err());
    }
}

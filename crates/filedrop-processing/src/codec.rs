//! Base64 payload encoding.
//!
//! Decoding accepts standard-alphabet input with or without padding and
//! ignores embedded whitespace, so line-wrapped encoder output is accepted.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

pub fn decode_base64(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    LENIENT.decode(compact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_encoded_content() {
        let data = b"\x89PNG\r\n\x1a\n binary \x00\xff";
        assert_eq!(decode_base64(&encode_base64(data)).unwrap(), data);
    }

    #[test]
    fn test_decode_tolerates_whitespace_and_missing_padding() {
        assert_eq!(decode_base64("aGVs\nbG8=").unwrap(), b"hello");
        assert_eq!(decode_base64("aGVsbG8").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_base64("not base64 at all!").is_err());
    }
}

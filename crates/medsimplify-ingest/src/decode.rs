//! Byte-to-text decoding for plain-text uploads.

use crate::ExtractionError;

/// Decode as UTF-8, falling back to Latin-1.
///
/// Latin-1 maps every byte to the code point of the same value, so the
/// fallback always succeeds; [`ExtractionError::UnreadableFile`] is kept for
/// callers that match on the full taxonomy.
pub fn decode_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_owned()),
        Err(e) => {
            tracing::debug!(
                valid_up_to = e.valid_up_to(),
                "not valid UTF-8, decoding as Latin-1"
            );
            Ok(decode_latin1(bytes))
        }
    }
}

pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_is_preserved() {
        assert_eq!(decode_text("naïve ✓".as_bytes()).unwrap(), "naïve ✓");
    }

    #[test]
    fn bom_is_not_stripped() {
        assert_eq!(
            decode_text(b"\xEF\xBB\xBFdose").unwrap(),
            "\u{FEFF}dose"
        );
    }

    #[test]
    fn latin1_covers_every_byte() {
        let all: Vec<u8> = (0..=255).collect();
        let decoded = decode_latin1(&all);
        assert_eq!(decoded.chars().count(), 256);
        assert_eq!(decoded.chars().last(), Some('ÿ'));
    }

    #[test]
    fn truncated_utf8_sequence_uses_fallback() {
        // 0xC3 starts a two-byte sequence that never completes.
        assert_eq!(decode_text(b"50 mg\xC3").unwrap(), "50 mgÃ");
    }
}

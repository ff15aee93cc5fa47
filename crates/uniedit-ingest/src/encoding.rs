//! Text-encoding detection for loaded dataset files.
//!
//! The detector inspects a byte prefix only and the returned encoding is
//! trusted for the whole file. Survey exports are either UTF-8 (with or
//! without BOM) or a legacy Chinese codepage, so the fallback is GBK.

use encoding_rs::{Encoding, GBK, UTF_8};

/// How many leading bytes the detector inspects.
pub const DETECTION_PREFIX_LEN: usize = 1000;

/// Best-guess encoding for the given byte prefix.
///
/// Order: BOM sniffing, then UTF-8 validity, then GBK fallback.
#[must_use]
pub fn detect_encoding(prefix: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(prefix) {
        return encoding;
    }
    if is_utf8_prefix(prefix) {
        return UTF_8;
    }
    GBK
}

/// True when the bytes are valid UTF-8, allowing one multi-byte character
/// truncated at the end of the prefix.
fn is_utf8_prefix(bytes: &[u8]) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(_) => true,
        Err(error) => error.error_len().is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_utf8_bom() {
        let bytes = [0xEF, 0xBB, 0xBF, b'a', b'b'];
        assert_eq!(detect_encoding(&bytes), encoding_rs::UTF_8);
    }

    #[test]
    fn test_detects_plain_utf8() {
        assert_eq!(detect_encoding("答题序号,Q5".as_bytes()), encoding_rs::UTF_8);
    }

    #[test]
    fn test_truncated_utf8_character_still_utf8() {
        let text = "答题序号".as_bytes();
        // Cut the prefix inside the last multi-byte character.
        assert_eq!(detect_encoding(&text[..text.len() - 1]), encoding_rs::UTF_8);
    }

    #[test]
    fn test_falls_back_to_gbk() {
        let (bytes, _, _) = encoding_rs::GBK.encode("答题序号,学校名称");
        assert_eq!(detect_encoding(&bytes), encoding_rs::GBK);
    }

    #[test]
    fn test_empty_prefix_is_utf8() {
        assert_eq!(detect_encoding(&[]), encoding_rs::UTF_8);
    }
}

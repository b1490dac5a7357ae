//! HTML Encoding Detection and Conversion
//!
//! Handles detection of UTF-16 input based on BOM or byte patterns and
//! decodes everything to a UTF-8 string for the HTML parser. Decoding is
//! lossy: the HTML parser recovers from anything, so invalid sequences
//! become U+FFFD instead of failing the whole document.

use std::borrow::Cow;

/// Detected encoding of fetched bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl HtmlEncoding {
    /// Detect encoding from byte order mark or initial bytes
    pub fn detect(input: &[u8]) -> Self {
        if input.len() < 2 {
            return HtmlEncoding::Utf8;
        }

        match (input[0], input[1]) {
            // UTF-16 LE BOM: 0xFF 0xFE
            (0xFF, 0xFE) => HtmlEncoding::Utf16Le,
            // UTF-16 BE BOM: 0xFE 0xFF
            (0xFE, 0xFF) => HtmlEncoding::Utf16Be,
            // No BOM - '<' next to a null byte
            (0x00, b'<') => HtmlEncoding::Utf16Be,
            (b'<', 0x00) => HtmlEncoding::Utf16Le,
            _ => HtmlEncoding::Utf8,
        }
    }
}

/// Decode raw document bytes to UTF-8 text
///
/// Borrows the input when it is already valid UTF-8 (after dropping a
/// UTF-8 BOM).
pub fn decode_html(input: &[u8]) -> Cow<'_, str> {
    match HtmlEncoding::detect(input) {
        HtmlEncoding::Utf8 => {
            let bytes = input.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(input);
            String::from_utf8_lossy(bytes)
        }
        HtmlEncoding::Utf16Le => {
            let bytes = input.strip_prefix(&[0xFF, 0xFE]).unwrap_or(input);
            Cow::Owned(decode_utf16(bytes, u16::from_le_bytes))
        }
        HtmlEncoding::Utf16Be => {
            let bytes = input.strip_prefix(&[0xFE, 0xFF]).unwrap_or(input);
            Cow::Owned(decode_utf16(bytes, u16::from_be_bytes))
        }
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    // A trailing odd byte cannot form a code unit and is dropped
    let code_units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| to_unit([chunk[0], chunk[1]]))
        .collect();
    String::from_utf16_lossy(&code_units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_utf8() {
        assert_eq!(HtmlEncoding::detect(b"<html>"), HtmlEncoding::Utf8);
        assert_eq!(HtmlEncoding::detect(b"x"), HtmlEncoding::Utf8);
    }

    #[test]
    fn test_detect_utf16() {
        assert_eq!(HtmlEncoding::detect(&[0xFF, 0xFE, b'<', 0x00]), HtmlEncoding::Utf16Le);
        assert_eq!(HtmlEncoding::detect(&[0xFE, 0xFF, 0x00, b'<']), HtmlEncoding::Utf16Be);
        assert_eq!(HtmlEncoding::detect(&[b'<', 0x00]), HtmlEncoding::Utf16Le);
    }

    #[test]
    fn test_utf8_borrowed() {
        let decoded = decode_html(b"<p>ok</p>");
        assert!(matches!(decoded, Cow::Borrowed(_)));
        assert_eq!(decoded, "<p>ok</p>");
    }

    #[test]
    fn test_utf8_bom_stripped() {
        assert_eq!(decode_html(&[0xEF, 0xBB, 0xBF, b'<', b'p', b'>']), "<p>");
    }

    #[test]
    fn test_convert_utf16_be() {
        let utf16_be = vec![0xFE, 0xFF, 0x00, b'<', 0x00, b'p', 0x00, b'>'];
        assert_eq!(decode_html(&utf16_be), "<p>");
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        assert_eq!(decode_html(&[b'a', 0xFF, b'b']), "a\u{FFFD}b");
    }
}

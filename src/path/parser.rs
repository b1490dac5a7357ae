//! Path Parser
//!
//! Purely syntactic: validates a path string and splits it into segments.
//! No document access happens here.

use memchr::memchr;

use super::{PathExpression, PathSegment};
use crate::error::PathError;

/// Separator between path levels
pub const PATH_DELIMITER: char = '/';

/// Characters that may not appear anywhere in a segment
const NOT_ALLOWED_SYMBOLS: &str = "!@#$%^&*_+-={}\"№;'<>/\\~`:?";

/// Parse a path string
///
/// `"/"` yields an empty expression. A trailing or doubled delimiter is an
/// empty segment and is rejected.
pub fn parse(path: &str) -> Result<PathExpression, PathError> {
    let rest = path
        .strip_prefix(PATH_DELIMITER)
        .ok_or(PathError::MissingPathPrefix)?;

    let mut segments = Vec::new();
    if !rest.is_empty() {
        for (i, raw) in rest.split(PATH_DELIMITER).enumerate() {
            segments.push(segment_at(raw, i + 1)?);
        }
    }

    Ok(PathExpression::new(path, segments))
}

/// Parse a path from raw bytes, rejecting invalid UTF-8
pub fn parse_bytes(path: &[u8]) -> Result<PathExpression, PathError> {
    let path = std::str::from_utf8(path).map_err(|_| PathError::InvalidEncoding)?;
    parse(path)
}

/// Parse a single `tag` or `tag[N]` segment
pub fn parse_segment(raw: &str) -> Result<PathSegment, PathError> {
    segment_at(raw, 1)
}

fn segment_at(raw: &str, position: usize) -> Result<PathSegment, PathError> {
    let segment = raw.trim();
    if segment.is_empty() {
        return Err(PathError::EmptySegment { position });
    }

    if let Some(character) = segment.chars().find(|&c| is_not_allowed(c)) {
        return Err(PathError::DisallowedCharacter {
            segment: segment.to_string(),
            character,
        });
    }

    let bytes = segment.as_bytes();
    let open = memchr(b'[', bytes);
    let close = memchr(b']', bytes);

    if let Some(c) = close {
        if bytes[c + 1..].iter().any(u8::is_ascii_digit) {
            return Err(PathError::DigitOutsideBrackets {
                segment: segment.to_string(),
            });
        }
    }

    match (open, close) {
        (None, None) => Ok(PathSegment::new(segment, 1)),
        (Some(o), Some(c)) if o > 0 && o < c && c == bytes.len() - 1 => {
            let index = &segment[o + 1..c];
            // sign characters are already rejected above
            let ordinal = index
                .parse::<u32>()
                .ok()
                .filter(|&n| n >= 1)
                .ok_or_else(|| PathError::NonNumericIndex {
                    segment: segment.to_string(),
                    index: index.to_string(),
                })?;
            Ok(PathSegment::new(&segment[..o], ordinal))
        }
        _ => Err(PathError::MisplacedBrackets {
            segment: segment.to_string(),
        }),
    }
}

#[inline]
fn is_not_allowed(c: char) -> bool {
    c.is_control() || c.is_whitespace() || NOT_ALLOWED_SYMBOLS.contains(c)
}

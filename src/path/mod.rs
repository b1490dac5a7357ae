//! Absolute tag/ordinal paths
//!
//! A path such as `/html/body/div[2]/span` names one tag per tree level and,
//! optionally, which same-named sibling to take at that level (1-based).
//! Segments whose tag starts with `text` select text nodes instead of
//! elements.
//!
//! - `parser`: path string → [`PathExpression`]
//! - `eval`: walk a document along a parsed path
//! - `collect`: flatten a resolved node's subtree and following siblings
//! - `cache`: bounded LRU of parsed paths

pub mod cache;
pub mod collect;
pub mod eval;
pub mod parser;

use std::fmt;
use std::str::FromStr;

pub use cache::PathCache;
pub use collect::{children_of, collect, following};
pub use eval::{find_node, resolve, value_of};
pub use parser::{parse, parse_bytes, parse_segment};

use crate::error::PathError;

/// Tag prefix that makes a segment match text nodes
pub const TEXT_PREFIX: &str = "text";

/// One level of a path: tag name plus ordinal among same-named siblings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub tag: String,
    /// 1-based occurrence, 1 when the segment has no brackets
    pub ordinal: u32,
    /// Set when `tag` starts with [`TEXT_PREFIX`]
    pub text_match: bool,
}

impl PathSegment {
    pub fn new(tag: impl Into<String>, ordinal: u32) -> Self {
        let tag = tag.into();
        let text_match = tag.starts_with(TEXT_PREFIX);
        PathSegment {
            tag,
            ordinal,
            text_match,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.tag, self.ordinal)
    }
}

/// Parsed path: the source string and its segments in root-to-leaf order
///
/// No segments means the path addresses the start node itself (`"/"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    source: String,
    segments: Vec<PathSegment>,
}

impl PathExpression {
    pub(crate) fn new(source: &str, segments: Vec<PathSegment>) -> Self {
        PathExpression {
            source: source.to_string(),
            segments,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for PathExpression {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

//! Error types
//!
//! Every fallible operation returns [`Error`]; the per-stage enums keep the
//! detail and [`Error::kind`] folds them into a coarse taxonomy.

use crate::dom::{NodeId, NodeKind};

/// Result alias used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Malformed path expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path is not valid UTF-8")]
    InvalidEncoding,

    #[error("path should have a prefix \"/\"")]
    MissingPathPrefix,

    #[error("segment {position} is empty")]
    EmptySegment { position: usize },

    #[error("segment {segment:?} contains a not allowed symbol {character:?}")]
    DisallowedCharacter { segment: String, character: char },

    #[error("brackets are arranged incorrectly in segment {segment:?}")]
    MisplacedBrackets { segment: String },

    #[error("the tag number is out of brackets in segment {segment:?}")]
    DigitOutsideBrackets { segment: String },

    #[error("index {index:?} in segment {segment:?} is not a positive integer")]
    NonNumericIndex { segment: String, index: String },
}

/// Failure while walking a document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("element {segment:?} not found at level {level}")]
    ElementNotFound { segment: String, level: usize },

    #[error("node {node} is an error node")]
    NodeProcessingError { node: NodeId },

    #[error("node {node} is {kind}, not text")]
    NotTextNode { node: NodeId, kind: NodeKind },
}

/// Failure of the document source
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid resource {resource:?}: {reason}")]
    InvalidResource { resource: String, reason: String },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("status code is not 200: {status}")]
    Status { url: String, status: u16 },

    #[error("fetch cancelled")]
    Cancelled,

    #[error("giving up after {attempts} attempts")]
    ExhaustedRetries {
        attempts: u32,
        #[source]
        source: Box<FetchError>,
    },
}

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("retry policy needs at least one attempt")]
    ZeroAttempts,

    #[error("backoff should not be negative: {0}")]
    NegativeBackoff(f64),
}

/// Crate-level error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("parse path: {0}")]
    Syntax(#[from] PathError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("fetch document: {0}")]
    Fetch(#[from] FetchError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Coarse classification of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed path string
    Syntax,
    /// No matching element or ordinal at some level
    NotFound,
    /// Resolved node has the wrong kind
    TypeMismatch,
    /// Error node met mid-walk
    Structural,
    /// Failure from the fetch or parse collaborators
    Collaborator,
    /// Rejected configuration value
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax(_) => ErrorKind::Syntax,
            Error::Resolve(ResolveError::ElementNotFound { .. }) => ErrorKind::NotFound,
            Error::Resolve(ResolveError::NotTextNode { .. }) => ErrorKind::TypeMismatch,
            Error::Resolve(ResolveError::NodeProcessingError { .. }) => ErrorKind::Structural,
            Error::Fetch(_) => ErrorKind::Collaborator,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err: Error = PathError::MissingPathPrefix.into();
        assert_eq!(err.kind(), ErrorKind::Syntax);

        let err: Error = ResolveError::ElementNotFound {
            segment: "div".to_string(),
            level: 2,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err: Error = ResolveError::NotTextNode {
            node: 1,
            kind: NodeKind::Element,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        let err: Error = ResolveError::NodeProcessingError { node: 4 }.into();
        assert_eq!(err.kind(), ErrorKind::Structural);

        let err: Error = FetchError::Cancelled.into();
        assert_eq!(err.kind(), ErrorKind::Collaborator);
    }

    #[test]
    fn test_exhausted_retries_keeps_source() {
        use std::error::Error as _;

        let err = FetchError::ExhaustedRetries {
            attempts: 3,
            source: Box::new(FetchError::Status {
                url: "https://example.com/".to_string(),
                status: 502,
            }),
        };
        assert_eq!(err.to_string(), "giving up after 3 attempts");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("status code is not 200: 502"));
    }

    #[test]
    fn test_messages() {
        let err = ResolveError::NotTextNode {
            node: 2,
            kind: NodeKind::Element,
        };
        assert_eq!(err.to_string(), "node 2 is element, not text");
    }
}

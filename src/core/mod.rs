//! Core byte-level helpers
//!
//! - Encoding: BOM detection and decoding of fetched bytes to UTF-8

pub mod encoding;

//! RustyScrape - Path-based extraction from HTML pages
//!
//! Pages are parsed once into an arena DOM; absolute paths such as
//! `/html/body/div[2]/span` are then resolved against it.
//!
//! Layers:
//! - `dom`: arena document built by html5ever
//! - `path`: path parser, resolver, descendant collector, parsed-path cache
//! - `strategy`: parallel evaluation of many paths
//! - `source`: document fetching with retries and cancellation
//!
//! ```no_run
//! use rustyscrape::{Scraper, ScraperConfig};
//!
//! let scraper = Scraper::parse_str("<p>hello</p>", &ScraperConfig::default());
//! assert_eq!(scraper.get_value("/html/body/p").unwrap(), "hello");
//! ```

pub mod config;
pub mod core;
pub mod dom;
pub mod error;
pub mod path;
pub mod source;
pub mod strategy;

pub use config::{FetchConfig, ScraperConfig};
pub use dom::{DocumentAccess, HtmlDocument, HtmlNode, NodeId, NodeKind};
pub use error::{ConfigError, Error, ErrorKind, FetchError, PathError, ResolveError, Result};
pub use path::{PathCache, PathExpression, PathSegment};
pub use source::{CancellationToken, DocumentSource, RetryPolicy, RetryingSource, Transport};

/// A parsed page plus a cache of parsed paths
#[derive(Debug)]
pub struct Scraper {
    doc: HtmlDocument,
    paths: PathCache,
}

impl Scraper {
    pub fn new(doc: HtmlDocument, config: &ScraperConfig) -> Self {
        Scraper {
            doc,
            paths: PathCache::new(config.path_cache_capacity),
        }
    }

    pub fn parse_str(html: &str, config: &ScraperConfig) -> Self {
        Self::new(HtmlDocument::parse(html), config)
    }

    /// Parse raw page bytes, detecting UTF-8/UTF-16 by BOM
    pub fn from_bytes(bytes: &[u8], config: &ScraperConfig) -> Self {
        Self::new(HtmlDocument::parse_bytes(bytes), config)
    }

    /// Fetch `resource` through `source` and parse the body
    pub fn fetch<S: DocumentSource + ?Sized>(
        resource: &str,
        source: &S,
        cancel: &CancellationToken,
        config: &ScraperConfig,
    ) -> Result<Self> {
        let body = source.fetch(resource, cancel)?;
        Ok(Self::from_bytes(&body, config))
    }

    pub fn document(&self) -> &HtmlDocument {
        &self.doc
    }

    pub fn path_cache(&self) -> &PathCache {
        &self.paths
    }

    /// Resolve `path` from the document node
    pub fn find_node(&self, path: &str) -> Result<NodeId> {
        let expr = self.paths.get_or_parse(path)?;
        Ok(crate::path::find_node(&self.doc, &expr)?)
    }

    /// Text of the node at `path`
    ///
    /// Text nodes yield their payload, elements their sole text child.
    pub fn get_value(&self, path: &str) -> Result<&str> {
        let id = self.find_node(path)?;
        Ok(crate::path::value_of(&self.doc, id)?)
    }

    /// The node at `path`, everything below it, and everything after it
    /// under the same parent, in document order
    pub fn next_after(&self, path: &str) -> Result<Vec<NodeId>> {
        let id = self.find_node(path)?;
        Ok(crate::path::following(&self.doc, id))
    }

    /// All descendants of the node at `path`, in document order
    pub fn children(&self, path: &str) -> Result<Vec<NodeId>> {
        let id = self.find_node(path)?;
        Ok(crate::path::children_of(&self.doc, id))
    }

    pub fn text_content(&self, path: &str) -> Result<String> {
        let id = self.find_node(path)?;
        Ok(self.doc.text_content(id))
    }

    /// Attribute `name` of the node at `path`, if present
    pub fn attribute(&self, path: &str, name: &str) -> Result<Option<&str>> {
        let id = self.find_node(path)?;
        Ok(self.doc.get_attribute(id, name))
    }

    pub fn find_nodes(&self, paths: &[&str]) -> Vec<Result<NodeId>> {
        strategy::find_nodes_parallel(&self.doc, &self.paths, paths)
    }

    pub fn get_values(&self, paths: &[&str]) -> Vec<Result<&str>> {
        strategy::values_parallel(&self.doc, &self.paths, paths)
    }

    /// Map `(key, path)` pairs to `(key, value)`; fails on the first bad path
    pub fn xmap(&self, queries: &[(&str, &str)]) -> Result<Vec<(String, String)>> {
        strategy::xmap(&self.doc, &self.paths, queries)
    }

    pub fn node(&self, id: NodeId) -> Option<&HtmlNode> {
        self.doc.get_node(id)
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.doc.node_kind(id)
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.doc.tag_name(id)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.doc.text(id)
    }
}

//! DOM Module - Arena-based HTML Document
//!
//! Implements an efficient DOM representation using:
//! - Arena allocation for nodes
//! - NodeId (u32) indices for cache-friendly traversal
//! - String interning for tag names, attributes and text

pub mod document;
pub mod node;
pub mod strings;

pub use document::{DocumentBuilder, HtmlDocument};
pub use node::{HtmlAttribute, HtmlNode, NodeId, NodeKind};
pub use strings::StringPool;

/// Trait for document access - lets the resolver and collector walk any
/// arena exposing the node shape below
pub trait DocumentAccess {
    /// ID of the document node every absolute path starts from
    fn document_node_id(&self) -> NodeId;

    /// Get a node by ID
    fn get_node(&self, id: NodeId) -> Option<&HtmlNode>;

    /// Tag name of an element node
    fn tag_name(&self, id: NodeId) -> Option<&str>;

    /// Payload of a text node
    fn text(&self, id: NodeId) -> Option<&str>;

    /// Get attribute value by name
    fn get_attribute(&self, node_id: NodeId, name: &str) -> Option<&str>;

    /// Get the kind of a node
    #[inline]
    fn node_kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get_node(id).map(|n| n.kind)
    }

    #[inline]
    fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id).and_then(|n| n.first_child)
    }

    #[inline]
    fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id).and_then(|n| n.next_sibling)
    }
}

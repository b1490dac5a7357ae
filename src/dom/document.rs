//! HTML Document - Arena-based DOM representation
//!
//! Efficient DOM storage with:
//! - Arena allocation for nodes
//! - NodeId indices for traversal
//! - String interning for names and text
//!
//! Trees come from html5ever (through `scraper`) or from a
//! [`DocumentBuilder`] driven by any other producer. Either way the arena is
//! immutable once built.

use super::node::{HtmlAttribute, HtmlNode, NodeId, NodeKind};
use super::strings::StringPool;
use super::DocumentAccess;

/// An HTML document stored in arena format
#[derive(Debug)]
pub struct HtmlDocument {
    /// Arena of nodes, node 0 is the document node
    nodes: Vec<HtmlNode>,
    /// Arena of attributes
    attributes: Vec<HtmlAttribute>,
    /// Interned strings
    pub strings: StringPool,
    /// Recoverable errors reported while building the tree
    errors: Vec<String>,
}

impl HtmlDocument {
    /// Parse an HTML document
    ///
    /// HTML parsing never fails: malformed markup is recovered the way a
    /// browser would, and the recovery notes are kept in [`parse_errors`].
    ///
    /// [`parse_errors`]: HtmlDocument::parse_errors
    pub fn parse(html: &str) -> Self {
        let parsed = scraper::Html::parse_document(html);
        let mut builder = DocumentBuilder::with_capacity(html.len() / 32);

        // (node, closing) pairs; a closing entry ends the element scope
        let mut stack = vec![(parsed.tree.root(), false)];
        while let Some((node, closing)) = stack.pop() {
            if closing {
                builder.end_element();
                continue;
            }

            let descend = match node.value() {
                scraper::Node::Document | scraper::Node::Fragment => true,
                scraper::Node::Element(element) => {
                    builder.start_element_with_attributes(element.name(), element.attrs());
                    stack.push((node, true));
                    true
                }
                scraper::Node::Text(text) => {
                    builder.text(text);
                    false
                }
                scraper::Node::Comment(comment) => {
                    builder.comment(comment);
                    false
                }
                scraper::Node::Doctype(doctype) => {
                    builder.doctype(doctype.name());
                    false
                }
                _ => {
                    builder.leaf(NodeKind::ProcessingInstruction, "");
                    false
                }
            };

            if descend {
                let children: Vec<_> = node.children().collect();
                for child in children.into_iter().rev() {
                    stack.push((child, false));
                }
            }
        }

        for error in &parsed.errors {
            builder.report_error(error);
        }

        let doc = builder.finish();
        log::debug!(
            "parsed HTML document: {} nodes, {} parse errors",
            doc.node_count(),
            doc.errors.len()
        );
        doc
    }

    /// Decode raw bytes (UTF-8, or UTF-16 with a BOM) and parse them
    pub fn parse_bytes(input: &[u8]) -> Self {
        let html = crate::core::encoding::decode_html(input);
        Self::parse(&html)
    }

    /// Start building a document by hand
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    /// ID of the document node
    #[inline]
    pub fn document_node_id(&self) -> NodeId {
        0
    }

    /// First element child of the document node (`<html>` for parsed input)
    pub fn root_element_id(&self) -> Option<NodeId> {
        self.children(0)
            .find(|&id| self.node_kind(id) == Some(NodeKind::Element))
    }

    /// Get a node by ID
    #[inline]
    pub fn get_node(&self, id: NodeId) -> Option<&HtmlNode> {
        self.nodes.get(id as usize)
    }

    /// Get the kind of a node
    #[inline]
    pub fn node_kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get_node(id).map(|n| n.kind)
    }

    /// Tag name of an element node
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        if node.is_element() {
            self.strings.get_str(node.name_id)
        } else {
            None
        }
    }

    /// Payload of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        if node.is_text() {
            self.strings.get_str(node.name_id)
        } else {
            None
        }
    }

    /// Raw data field: tag name, text or comment payload, doctype name
    pub fn data(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        self.strings.get_str(node.name_id)
    }

    /// Get attributes for an element
    pub fn attributes(&self, id: NodeId) -> &[HtmlAttribute] {
        if let Some(node) = self.get_node(id) {
            let start = node.attr_start as usize;
            let end = start + node.attr_count as usize;
            self.attributes.get(start..end).unwrap_or(&[])
        } else {
            &[]
        }
    }

    /// Get attribute value by name
    pub fn get_attribute(&self, node_id: NodeId, name: &str) -> Option<&str> {
        for attr in self.attributes(node_id) {
            if self.strings.get_str(attr.name_id) == Some(name) {
                return self.strings.get_str(attr.value_id);
            }
        }
        None
    }

    /// Get all attribute names and values for a node
    pub fn get_attribute_values(&self, node_id: NodeId) -> Vec<(&str, &str)> {
        self.attributes(node_id)
            .iter()
            .filter_map(|attr| {
                let name = self.strings.get_str(attr.name_id)?;
                let value = self.strings.get_str(attr.value_id)?;
                Some((name, value))
            })
            .collect()
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        let first = self.get_node(id).and_then(|n| n.first_child);
        ChildIter { doc: self, next: first }
    }

    /// Iterate over all descendants of a node in document order
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_> {
        let mut stack = Vec::new();
        if let Some(node) = self.get_node(id) {
            let mut child_id = node.last_child;
            while let Some(cid) = child_id {
                stack.push(cid);
                child_id = self.get_node(cid).and_then(|n| n.prev_sibling);
            }
        }
        DescendantIter { doc: self, stack }
    }

    /// Concatenated text of every text node below `id`, in document order
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.text(id) {
            return text.to_string();
        }
        let mut result = String::new();
        for node_id in self.descendants(id) {
            if let Some(text) = self.text(node_id) {
                result.push_str(text);
            }
        }
        result
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Recoverable errors the HTML parser reported
    pub fn parse_errors(&self) -> &[String] {
        &self.errors
    }
}

impl DocumentAccess for HtmlDocument {
    fn document_node_id(&self) -> NodeId {
        HtmlDocument::document_node_id(self)
    }

    fn get_node(&self, id: NodeId) -> Option<&HtmlNode> {
        HtmlDocument::get_node(self, id)
    }

    fn tag_name(&self, id: NodeId) -> Option<&str> {
        HtmlDocument::tag_name(self, id)
    }

    fn text(&self, id: NodeId) -> Option<&str> {
        HtmlDocument::text(self, id)
    }

    fn get_attribute(&self, node_id: NodeId, name: &str) -> Option<&str> {
        HtmlDocument::get_attribute(self, node_id, name)
    }
}

/// Iterator over child nodes
pub struct ChildIter<'a> {
    doc: &'a HtmlDocument,
    next: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get_node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over descendant nodes
pub struct DescendantIter<'a> {
    doc: &'a HtmlDocument,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DescendantIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        if let Some(node) = self.doc.get_node(current) {
            let mut child_id = node.last_child;
            while let Some(id) = child_id {
                self.stack.push(id);
                child_id = self.doc.get_node(id).and_then(|n| n.prev_sibling);
            }
        }
        Some(current)
    }
}

/// Incremental construction of an [`HtmlDocument`]
///
/// Nodes are appended under the innermost open element, so IDs come out in
/// document order. Unclosed elements are closed by [`finish`].
///
/// [`finish`]: DocumentBuilder::finish
#[derive(Debug)]
pub struct DocumentBuilder {
    nodes: Vec<HtmlNode>,
    attributes: Vec<HtmlAttribute>,
    strings: StringPool,
    errors: Vec<String>,
    stack: Vec<NodeId>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    fn with_capacity(nodes: usize) -> Self {
        let mut builder = DocumentBuilder {
            nodes: Vec::with_capacity(nodes.max(16)),
            attributes: Vec::with_capacity(nodes.max(16) / 2),
            strings: StringPool::new(),
            errors: Vec::new(),
            stack: vec![0],
        };
        builder.nodes.push(HtmlNode::document());
        builder
    }

    /// Open an element; following nodes become its children
    pub fn start_element(&mut self, name: &str) -> NodeId {
        self.start_element_with_attributes(name, std::iter::empty::<(&str, &str)>())
    }

    /// Open an element carrying attributes
    pub fn start_element_with_attributes<'s, I>(&mut self, name: &str, attrs: I) -> NodeId
    where
        I: IntoIterator<Item = (&'s str, &'s str)>,
    {
        let name_id = self.strings.intern(name);
        let id = self.append(NodeKind::Element, name_id);

        let attr_start = self.attributes.len() as u32;
        for (attr_name, attr_value) in attrs {
            let name_id = self.strings.intern(attr_name);
            let value_id = self.strings.intern(attr_value);
            self.attributes.push(HtmlAttribute::new(name_id, value_id));
        }
        let attr_count = (self.attributes.len() as u32 - attr_start).min(u16::MAX as u32) as u16;

        let node = &mut self.nodes[id as usize];
        node.attr_start = attr_start;
        node.attr_count = attr_count;

        self.stack.push(id);
        id
    }

    /// Close the innermost open element; the document node is never closed
    pub fn end_element(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Append a text node
    pub fn text(&mut self, content: &str) -> NodeId {
        self.leaf(NodeKind::Text, content)
    }

    /// Append a comment node
    pub fn comment(&mut self, content: &str) -> NodeId {
        self.leaf(NodeKind::Comment, content)
    }

    /// Append a doctype node
    pub fn doctype(&mut self, name: &str) -> NodeId {
        self.leaf(NodeKind::Doctype, name)
    }

    /// Append a node the producer failed to process
    pub fn error(&mut self, message: &str) -> NodeId {
        self.leaf(NodeKind::Error, message)
    }

    /// Append a childless node of any kind
    pub fn leaf(&mut self, kind: NodeKind, data: &str) -> NodeId {
        let data_id = self.strings.intern(data);
        self.append(kind, data_id)
    }

    /// Record a recoverable error without adding a node
    pub fn report_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    /// Freeze the arena
    pub fn finish(self) -> HtmlDocument {
        HtmlDocument {
            nodes: self.nodes,
            attributes: self.attributes,
            strings: self.strings,
            errors: self.errors,
        }
    }

    fn append(&mut self, kind: NodeKind, name_id: u32) -> NodeId {
        let parent_id = *self.stack.last().unwrap_or(&0);
        let depth = self.stack.len().min(u16::MAX as usize) as u16;

        let node_id = self.nodes.len() as NodeId;
        self.nodes
            .push(HtmlNode::new(kind, name_id, Some(parent_id), depth));
        self.link_child(parent_id, node_id);
        node_id
    }

    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        let last = self.nodes[parent_id as usize].last_child;
        if let Some(last_id) = last {
            self.nodes[last_id as usize].next_sibling = Some(child_id);
            self.nodes[child_id as usize].prev_sibling = Some(last_id);
        } else {
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }
        self.nodes[parent_id as usize].last_child = Some(child_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inserts_implied_elements() {
        let doc = HtmlDocument::parse("<p>hello</p>");
        let html = doc.root_element_id().unwrap();
        assert_eq!(doc.tag_name(html), Some("html"));

        let names: Vec<_> = doc.children(html).filter_map(|id| doc.tag_name(id)).collect();
        assert_eq!(names, vec!["head", "body"]);
    }

    #[test]
    fn test_parse_doctype_precedes_html() {
        let doc = HtmlDocument::parse("<!DOCTYPE html><html><body></body></html>");
        let first = doc.get_node(0).and_then(|n| n.first_child).unwrap();
        assert_eq!(doc.node_kind(first), Some(NodeKind::Doctype));
        assert_eq!(doc.data(first), Some("html"));
    }

    #[test]
    fn test_parse_text_and_attributes() {
        let doc = HtmlDocument::parse(r#"<body><a href="/item/1" class="x">Item</a></body>"#);
        let a = doc
            .descendants(0)
            .find(|&id| doc.tag_name(id) == Some("a"))
            .unwrap();
        assert_eq!(doc.get_attribute(a, "href"), Some("/item/1"));
        assert_eq!(doc.get_attribute(a, "missing"), None);
        assert_eq!(doc.get_attribute_values(a).len(), 2);
        assert_eq!(doc.text_content(a), "Item");
    }

    #[test]
    fn test_parse_comment_node() {
        let doc = HtmlDocument::parse("<body><!-- note --><p>x</p></body>");
        let comment = doc
            .descendants(0)
            .find(|&id| doc.node_kind(id) == Some(NodeKind::Comment))
            .unwrap();
        assert_eq!(doc.data(comment), Some(" note "));
        assert_eq!(doc.text(comment), None);
    }

    #[test]
    fn test_parse_bytes_utf16() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<p>hi</p>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let doc = HtmlDocument::parse_bytes(&bytes);
        assert_eq!(doc.text_content(0), "hi");
    }

    #[test]
    fn test_ids_follow_document_order() {
        let doc = HtmlDocument::parse("<div><p>a</p><p>b</p></div>");
        let ids: Vec<_> = doc.descendants(0).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_builder_links() {
        let mut b = HtmlDocument::builder();
        let ul = b.start_element("ul");
        let li1 = b.start_element("li");
        let t1 = b.text("one");
        b.end_element();
        let li2 = b.start_element("li");
        b.end_element();
        b.end_element();
        let doc = b.finish();

        let ul_node = doc.get_node(ul).unwrap();
        assert_eq!(ul_node.parent, Some(0));
        assert_eq!(ul_node.first_child, Some(li1));
        assert_eq!(ul_node.last_child, Some(li2));
        assert_eq!(doc.get_node(li1).unwrap().next_sibling, Some(li2));
        assert_eq!(doc.get_node(li2).unwrap().prev_sibling, Some(li1));
        assert_eq!(doc.get_node(t1).unwrap().depth, 3);
        assert_eq!(doc.text(t1), Some("one"));
        assert_eq!(doc.children(ul).collect::<Vec<_>>(), vec![li1, li2]);
    }

    #[test]
    fn test_builder_never_closes_document() {
        let mut b = DocumentBuilder::new();
        b.end_element();
        b.end_element();
        let p = b.start_element("p");
        let doc = b.finish();
        assert_eq!(doc.get_node(p).unwrap().parent, Some(0));
    }

    #[test]
    fn test_error_node_and_reported_errors() {
        let mut b = DocumentBuilder::new();
        let e = b.error("bad token");
        b.report_error("unexpected end tag");
        let doc = b.finish();
        assert_eq!(doc.node_kind(e), Some(NodeKind::Error));
        assert_eq!(doc.data(e), Some("bad token"));
        assert_eq!(doc.parse_errors(), &["unexpected end tag".to_string()]);
    }
}

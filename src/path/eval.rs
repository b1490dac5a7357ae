//! Path Evaluation
//!
//! Walks a document one segment per level. At each level the sibling chain
//! is scanned for the nth node matching the segment; the walk then continues
//! among that node's children. The walk is a loop, so path length is bounded
//! by the heap, not the call stack. There is no backtracking: the first failure
//! ends the resolution.

use super::{PathExpression, PathSegment};
use crate::dom::{DocumentAccess, NodeId, NodeKind};
use crate::error::ResolveError;

/// Resolve `segments` starting at `start`
///
/// `start` is the first node of the sibling chain scanned for the first
/// segment. Document and doctype nodes are stepped through without
/// consuming a segment, so the document node itself is a valid start.
/// An empty segment list returns `start`.
pub fn resolve<D: DocumentAccess + ?Sized>(
    doc: &D,
    segments: &[PathSegment],
    start: NodeId,
) -> Result<NodeId, ResolveError> {
    let mut node = start;
    let mut cursor = Some(start);

    for (i, segment) in segments.iter().enumerate() {
        node = match_level(doc, segment, cursor, i + 1)?;
        cursor = doc.first_child(node);
    }

    Ok(node)
}

/// Resolve a parsed path from the document node
pub fn find_node<D: DocumentAccess + ?Sized>(
    doc: &D,
    path: &PathExpression,
) -> Result<NodeId, ResolveError> {
    resolve(doc, path.segments(), doc.document_node_id())
}

/// Text value of a resolved node
///
/// A text node yields its payload. An element whose only child is a text
/// node yields that text. Anything else is a type mismatch.
pub fn value_of<D: DocumentAccess + ?Sized>(doc: &D, id: NodeId) -> Result<&str, ResolveError> {
    if let Some(text) = doc.text(id) {
        return Ok(text);
    }

    let kind = doc.node_kind(id).unwrap_or(NodeKind::Error);
    if kind == NodeKind::Element {
        let sole_child = doc
            .first_child(id)
            .filter(|&child| doc.next_sibling(child).is_none());
        if let Some(text) = sole_child.and_then(|child| doc.text(child)) {
            return Ok(text);
        }
    }

    Err(ResolveError::NotTextNode { node: id, kind })
}

/// Scan the sibling chain from `first` for the node selected by `segment`
fn match_level<D: DocumentAccess + ?Sized>(
    doc: &D,
    segment: &PathSegment,
    first: Option<NodeId>,
    level: usize,
) -> Result<NodeId, ResolveError> {
    let mut matched = 1u32;
    let mut cursor = first;

    while let Some(id) = cursor {
        let Some(kind) = doc.node_kind(id) else {
            break;
        };

        match kind {
            NodeKind::Document => {
                cursor = doc.first_child(id);
                continue;
            }
            NodeKind::Doctype => {
                cursor = doc.next_sibling(id);
                continue;
            }
            NodeKind::Error => return Err(ResolveError::NodeProcessingError { node: id }),
            _ => {}
        }

        if matches_segment(doc, id, kind, segment) {
            if matched == segment.ordinal {
                log::trace!("level {level}: {segment} -> node {id}");
                return Ok(id);
            }
            matched += 1;
        }

        cursor = doc.next_sibling(id);
    }

    log::trace!("level {level}: {segment} not found after {} matches", matched - 1);
    Err(ResolveError::ElementNotFound {
        segment: segment.to_string(),
        level,
    })
}

#[inline]
fn matches_segment<D: DocumentAccess + ?Sized>(
    doc: &D,
    id: NodeId,
    kind: NodeKind,
    segment: &PathSegment,
) -> bool {
    match kind {
        NodeKind::Element => doc.tag_name(id) == Some(segment.tag.as_str()),
        NodeKind::Text => segment.text_match,
        _ => false,
    }
}

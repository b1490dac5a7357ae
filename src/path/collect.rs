//! Descendant Collector
//!
//! Preorder flattening: a node, then everything below it, then its next
//! sibling and everything below that, and so on to the end of the chain.

use crate::dom::{DocumentAccess, NodeId};

/// Collect `start`, its descendants, and its following siblings with their
/// descendants, in document order
pub fn collect<D: DocumentAccess + ?Sized>(doc: &D, start: Option<NodeId>) -> Vec<NodeId> {
    let mut nodes = Vec::new();
    let mut stack: Vec<NodeId> = start.into_iter().collect();

    while let Some(id) = stack.pop() {
        nodes.push(id);
        // sibling goes under the child so the whole subtree comes out first
        if let Some(next) = doc.next_sibling(id) {
            stack.push(next);
        }
        if let Some(child) = doc.first_child(id) {
            stack.push(child);
        }
    }

    log::trace!("collected {} nodes from {:?}", nodes.len(), start);
    nodes
}

/// Everything below `id`, in document order
pub fn children_of<D: DocumentAccess + ?Sized>(doc: &D, id: NodeId) -> Vec<NodeId> {
    collect(doc, doc.first_child(id))
}

/// `id` and everything after it within its parent, in document order
pub fn following<D: DocumentAccess + ?Sized>(doc: &D, id: NodeId) -> Vec<NodeId> {
    collect(doc, Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DocumentBuilder, HtmlDocument};

    /// <a><b><c/></b><d/></a><e><f/></e>
    fn tree() -> (HtmlDocument, [NodeId; 6]) {
        let mut bld = DocumentBuilder::new();
        let a = bld.start_element("a");
        let b = bld.start_element("b");
        let c = bld.start_element("c");
        bld.end_element();
        bld.end_element();
        let d = bld.start_element("d");
        bld.end_element();
        bld.end_element();
        let e = bld.start_element("e");
        let f = bld.start_element("f");
        (bld.finish(), [a, b, c, d, e, f])
    }

    #[test]
    fn test_preorder_with_siblings() {
        let (doc, [a, b, c, d, e, f]) = tree();
        assert_eq!(collect(&doc, Some(a)), vec![a, b, c, d, e, f]);
        assert_eq!(following(&doc, b), vec![b, c, d]);
    }

    #[test]
    fn test_children_of() {
        let (doc, [a, b, c, d, _, _]) = tree();
        assert_eq!(children_of(&doc, a), vec![b, c, d]);
        assert!(children_of(&doc, c).is_empty());
    }

    #[test]
    fn test_empty_start() {
        let (doc, _) = tree();
        assert!(collect(&doc, None).is_empty());
    }

    #[test]
    fn test_matches_document_order() {
        let doc = HtmlDocument::parse("<ul><li>1</li><li>2<b>!</b></li></ul><p>end</p>");
        let all = collect(&doc, doc.first_child(0));
        let mut sorted = all.clone();
        sorted.sort_unstable();
        assert_eq!(all, sorted);
        assert_eq!(all.len(), doc.node_count() - 1);
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        let mut bld = DocumentBuilder::new();
        for _ in 0..100_000 {
            bld.start_element("div");
        }
        let doc = bld.finish();
        assert_eq!(children_of(&doc, 0).len(), 100_000);
    }
}

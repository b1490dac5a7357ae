//! Parallel Path Evaluation
//!
//! Uses Rayon to evaluate many paths against one immutable document.

use rayon::prelude::*;

use crate::dom::{DocumentAccess, NodeId};
use crate::error::Result;
use crate::path::{self, PathCache};

/// Resolve multiple paths in parallel; results keep the input order
pub fn find_nodes_parallel<D: DocumentAccess + Sync>(
    doc: &D,
    cache: &PathCache,
    paths: &[&str],
) -> Vec<Result<NodeId>> {
    paths
        .par_iter()
        .map(|query| -> Result<NodeId> {
            let expr = cache.get_or_parse(query)?;
            Ok(path::find_node(doc, &expr)?)
        })
        .collect()
}

/// Extract the text value of multiple paths in parallel
pub fn values_parallel<'d, D: DocumentAccess + Sync>(
    doc: &'d D,
    cache: &PathCache,
    paths: &[&str],
) -> Vec<Result<&'d str>> {
    paths
        .par_iter()
        .map(|query| -> Result<&'d str> {
            let expr = cache.get_or_parse(query)?;
            let id = path::find_node(doc, &expr)?;
            Ok(path::value_of(doc, id)?)
        })
        .collect()
}

/// Parallel xmap - extract `(key, path)` pairs into `(key, value)` pairs
///
/// Fails if any of the queries fails.
pub fn xmap<D: DocumentAccess + Sync>(
    doc: &D,
    cache: &PathCache,
    queries: &[(&str, &str)],
) -> Result<Vec<(String, String)>> {
    queries
        .par_iter()
        .map(|(key, query)| -> Result<(String, String)> {
            let expr = cache.get_or_parse(query)?;
            let id = path::find_node(doc, &expr)?;
            let value = path::value_of(doc, id)?;
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;
    use crate::error::ErrorKind;

    const PAGE: &str = "<ul><li>one</li><li>two</li><li>three</li></ul>";

    #[test]
    fn test_parallel_matches_sequential() {
        let doc = HtmlDocument::parse(PAGE);
        let cache = PathCache::new(8);
        let paths = [
            "/html/body/ul/li[1]",
            "/html/body/ul/li[2]",
            "/html/body/ul/li[3]",
            "/html/body/ul/li[4]",
        ];

        let results = find_nodes_parallel(&doc, &cache, &paths);
        assert_eq!(results.len(), 4);
        for (query, result) in paths.iter().zip(&results) {
            let expected = path::find_node(&doc, &path::parse(query).unwrap()).ok();
            assert_eq!(result.as_ref().ok().copied(), expected);
        }
        assert_eq!(results[3].as_ref().unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_values_parallel() {
        let doc = HtmlDocument::parse(PAGE);
        let cache = PathCache::new(8);
        let values = values_parallel(&doc, &cache, &["/html/body/ul/li[2]", "bad"]);
        assert_eq!(values[0].as_deref().ok(), Some("two"));
        assert_eq!(values[1].as_ref().unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_xmap() {
        let doc = HtmlDocument::parse(PAGE);
        let cache = PathCache::new(8);
        let queries = [("first", "/html/body/ul/li"), ("last", "/html/body/ul/li[3]/text")];

        let results = xmap(&doc, &cache, &queries).unwrap();
        assert_eq!(
            results,
            vec![
                ("first".to_string(), "one".to_string()),
                ("last".to_string(), "three".to_string()),
            ]
        );

        let failing = [("ok", "/html/body/ul/li"), ("missing", "/html/body/ol")];
        assert!(xmap(&doc, &cache, &failing).is_err());
    }
}

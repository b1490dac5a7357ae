//! Parsed path cache
//!
//! Scraping jobs evaluate the same handful of paths against many pages;
//! parsed expressions are kept in a bounded LRU keyed by the path string.
//! Only successful parses are cached.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

use lru::LruCache;

use super::{parse, PathExpression};
use crate::error::PathError;

/// Default number of parsed paths kept
pub const DEFAULT_CAPACITY: usize = 128;

/// Thread-safe LRU of parsed paths; capacity 0 disables caching
#[derive(Debug)]
pub struct PathCache {
    inner: Option<Mutex<LruCache<String, Arc<PathExpression>>>>,
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl PathCache {
    pub fn new(capacity: usize) -> Self {
        PathCache {
            inner: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    /// Return the cached expression for `path`, parsing it on a miss
    pub fn get_or_parse(&self, path: &str) -> Result<Arc<PathExpression>, PathError> {
        let Some(cache) = &self.inner else {
            return parse(path).map(Arc::new);
        };

        if let Some(expr) = cache.lock().unwrap_or_else(PoisonError::into_inner).get(path) {
            log::debug!("path cache hit: {path}");
            return Ok(Arc::clone(expr));
        }

        log::debug!("path cache miss: {path}");
        let expr = Arc::new(parse(path)?);
        cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(path.to_string(), Arc::clone(&expr));
        Ok(expr)
    }

    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |cache| {
            cache.lock().unwrap_or_else(PoisonError::into_inner).len()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.as_ref().map_or(0, |cache| {
            cache.lock().unwrap_or_else(PoisonError::into_inner).cap().get()
        })
    }

    pub fn clear(&self) {
        if let Some(cache) = &self.inner {
            cache.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }
    }
}

//! Post cache
//!
//! An injectable cache sitting in front of `PostStore::get`. The default
//! `NullCache` never hits, which keeps the pipeline's contract of
//! constructing every post fresh from the backing store; `LruCache` is a
//! count-bounded in-memory alternative. The renderer never sees which one is
//! active.

use std::collections::HashMap;
use std::collections::VecDeque;

use crate::content::Post;

/// Cache of parsed posts keyed by slug
pub trait PostCache: Send {
    /// Look up a post; an LRU implementation may reorder on hit
    fn get(&mut self, slug: &str) -> Option<Post>;

    /// Store a post under its slug
    fn put(&mut self, slug: &str, post: Post);

    /// Whether a slug is currently held, without touching recency
    fn contains(&self, slug: &str) -> bool;
}

/// The eviction-free "always miss" cache
#[derive(Debug, Default)]
pub struct NullCache;

impl PostCache for NullCache {
    fn get(&mut self, _slug: &str) -> Option<Post> {
        None
    }

    fn put(&mut self, _slug: &str, _post: Post) {}

    fn contains(&self, _slug: &str) -> bool {
        false
    }
}

/// Count-bounded in-memory cache with least-recently-used eviction
#[derive(Debug)]
pub struct LruCache {
    capacity: usize,
    entries: HashMap<String, Post>,
    /// Slugs from least to most recently used
    order: VecDeque<String>,
}

impl LruCache {
    /// Create a cache holding at most `capacity` posts; a capacity of zero
    /// never stores anything
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn touch(&mut self, slug: &str) {
        if let Some(pos) = self.order.iter().position(|s| s == slug) {
            self.order.remove(pos);
        }
        self.order.push_back(slug.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PostCache for LruCache {
    fn get(&mut self, slug: &str) -> Option<Post> {
        let post = self.entries.get(slug).cloned();
        if post.is_some() {
            tracing::debug!("cache hit: {}", slug);
            self.touch(slug);
        }
        post
    }

    fn put(&mut self, slug: &str, post: Post) {
        if self.capacity == 0 {
            return;
        }
        if !self.entries.contains_key(slug) && self.entries.len() >= self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                tracing::debug!("cache evict: {}", evicted);
                self.entries.remove(&evicted);
            }
        }
        self.entries.insert(slug.to_string(), post);
        self.touch(slug);
    }

    fn contains(&self, slug: &str) -> bool {
        self.entries.contains_key(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(slug: &str) -> Post {
        Post::new(
            slug.to_uppercase(),
            slug.to_string(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            vec![],
            String::new(),
        )
    }

    #[test]
    fn test_null_cache_always_misses() {
        let mut cache = NullCache;
        cache.put("a", post("a"));
        assert!(!cache.contains("a"));
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn test_lru_stores_and_returns() {
        let mut cache = LruCache::new(2);
        cache.put("a", post("a"));
        assert!(cache.contains("a"));
        assert_eq!(cache.get("a").unwrap().slug, "a");
    }

    #[test]
    fn test_lru_evicts_least_recently_used() {
        let mut cache = LruCache::new(2);
        cache.put("a", post("a"));
        cache.put("b", post("b"));
        // Touch "a" so "b" becomes the eviction candidate.
        cache.get("a");
        cache.put("c", post("c"));
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_overwrite_does_not_evict() {
        let mut cache = LruCache::new(2);
        cache.put("a", post("a"));
        cache.put("b", post("b"));
        cache.put("a", post("a"));
        assert!(cache.contains("a"));
        assert!(cache.contains("b"));
    }

    #[test]
    fn test_zero_capacity_never_stores() {
        let mut cache = LruCache::new(0);
        cache.put("a", post("a"));
        assert!(cache.is_empty());
    }
}

use crate::error::Result;
use crate::morph::Normalizer;
use async_trait::async_trait;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// LRU word -> lemma-set cache wrapped around another normalizer.
///
/// The matcher normalizes the same trigger words on every turn, so a small
/// cache removes almost all calls to a remote morphology service. Uses LRU
/// eviction to keep memory bounded. Errors from the inner normalizer are
/// never cached.
pub struct CachedNormalizer {
    inner: Arc<dyn Normalizer>,
    cache: Mutex<LruCache<String, HashSet<String>>>,
}

impl CachedNormalizer {
    /// Create a cache with the given capacity in front of `inner`.
    ///
    /// # Panics
    ///
    /// Panics if capacity is 0 (LRU cache requires non-zero capacity)
    pub fn new(inner: Arc<dyn Normalizer>, capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).expect("Cache capacity must be at least 1");
        Self {
            inner,
            cache: Mutex::new(LruCache::new(cap)),
        }
    }

    /// Number of cached words
    pub fn len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl Normalizer for CachedNormalizer {
    async fn normalize(&self, word: &str) -> Result<HashSet<String>> {
        let key = word.to_lowercase();

        if let Some(hit) = self.cache.lock().unwrap().get(&key).cloned() {
            return Ok(hit);
        }

        let lemmas = self.inner.normalize(&key).await?;
        self.cache.lock().unwrap().put(key, lemmas.clone());
        Ok(lemmas)
    }
}

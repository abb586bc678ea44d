//! Caching of compression results
//!
//! A [`MerkleTree`] calls [`Hasher::compress`] once per level on every update. Trees sharing a
//! process (or a tree rehashing paths through mostly-empty regions) repeat many of these calls
//! with identical inputs, so the tree is generic over a [`HashCache`] that may memoize them.
//!
//! [`MerkleTree`]: crate::MerkleTree
//! [`Hasher::compress`]: crate::Hasher::compress

use std::sync::Arc;

use dashmap::{mapref::entry::Entry, DashMap};

use crate::{Digest, Hasher};

pub use self::metrics::CacheMetrics;

mod metrics;

/// Types which can be used to speed up compression calls (perhaps by storing known results in a
/// table)
///
/// Take special care when implementing this trait: an implementation that returns anything other
/// than `hasher.compress(left, right)` will cause a [`MerkleTree`] to produce incorrect roots and
/// paths. This is not [Undefined Behaviour][ub] - it is more akin to having mismatched
/// [`PartialEq`] and [`Hash`] implementations.
///
/// [`MerkleTree`]: crate::MerkleTree
/// [`PartialEq`]: std::cmp::PartialEq
/// [`Hash`]: std::hash::Hash
///
/// [ub]: https://doc.rust-lang.org/reference/behavior-considered-undefined.html
pub trait HashCache: Sync + 'static {
    /// Calculate `hasher.compress(left, right)`, potentially using data in `self` to skip the
    /// calculation
    #[inline]
    fn compress<H: Hasher>(&self, hasher: &H, left: Digest, right: Digest) -> Digest {
        hasher.compress(left, right)
    }
}

/// A ZST that does no caching - the default cache for [`MerkleTree`]
///
/// [`MerkleTree`]: crate::MerkleTree
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHashCache;

impl HashCache for NoopHashCache {}

/// A simple cache (conceptually an [`Arc<Mutex<HashMap<(Digest, Digest), Digest>>>`])
///
/// It is cheap to clone, thread-safe, but has limited eviction capabilities
#[derive(Debug, Clone, Default)]
pub struct SimpleHashCache {
    inner: Arc<DashMap<(Digest, Digest), Digest>>,
    metrics: CacheMetrics,
}

impl HashCache for SimpleHashCache {
    #[inline]
    fn compress<H: Hasher>(&self, hasher: &H, left: Digest, right: Digest) -> Digest {
        self.metrics.incr_compressions();

        match self.inner.entry((left, right)) {
            Entry::Occupied(entry) => {
                self.metrics.incr_cache_hits();
                *entry.get()
            }
            Entry::Vacant(entry) => {
                self.metrics.incr_cache_misses();
                *entry.insert(hasher.compress(left, right))
            }
        }
    }
}

impl SimpleHashCache {
    /// Create a new, empty [`SimpleHashCache`]
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of known compression results in this cache
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether this cache contains no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Remove the result of a compression from memory
    #[inline]
    pub fn evict(&self, left: Digest, right: Digest) {
        self.inner.remove(&(left, right));
    }

    /// Remove all entries from the cache
    #[inline]
    pub fn evict_all(&self) {
        self.inner.clear();
    }

    /// Get metrics for this cache
    #[inline]
    #[must_use]
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use crate::Blake2bHasher;

    use super::*;

    #[test]
    fn simple_cache_memoizes_compressions() {
        let cache = SimpleHashCache::default();

        let a = Blake2bHasher.hash_leaf(b"a");
        let b = Blake2bHasher.hash_leaf(b"b");

        let first = cache.compress(&Blake2bHasher, a, b);
        cache.compress(&Blake2bHasher, b, a);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.metrics().compressions(), 2);
        assert_eq!(cache.metrics().cache_hits(), 0);
        assert_eq!(cache.metrics().cache_misses(), 2);

        let again = cache.compress(&Blake2bHasher, a, b);
        assert_eq!(again, first);
        assert_eq!(again, Blake2bHasher.compress(a, b));

        assert_eq!(cache.metrics().compressions(), 3);
        assert_eq!(cache.metrics().cache_hits(), 1);
        assert_eq!(cache.metrics().cache_misses(), 2);
    }

    #[test]
    fn eviction_empties_the_cache() {
        let cache = SimpleHashCache::new();
        assert!(cache.is_empty());

        let a = Blake2bHasher.hash_leaf(b"a");
        let b = Blake2bHasher.hash_leaf(b"b");
        cache.compress(&Blake2bHasher, a, b);
        assert!(!cache.is_empty());

        cache.evict(a, b);
        assert!(cache.is_empty());
    }
}

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// A container for metrics relating to compression caching, useful for debugging
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    counters: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    compressions: AtomicUsize,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
}

impl CacheMetrics {
    /// The number of times `compress` has been called on this cache
    #[inline]
    #[must_use]
    pub fn compressions(&self) -> usize {
        self.counters.compressions.load(Ordering::Relaxed)
    }

    /// The number of times the cache has returned a cached value
    #[inline]
    #[must_use]
    pub fn cache_hits(&self) -> usize {
        self.counters.cache_hits.load(Ordering::Relaxed)
    }

    /// The number of times the cache had to compute a new value
    #[inline]
    #[must_use]
    pub fn cache_misses(&self) -> usize {
        self.counters.cache_misses.load(Ordering::Relaxed)
    }

    pub(crate) fn incr_compressions(&self) {
        self.counters.compressions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn incr_cache_hits(&self) {
        self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn incr_cache_misses(&self) {
        self.counters.cache_misses.fetch_add(1, Ordering::Relaxed);
    }
}

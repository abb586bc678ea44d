use std::{collections::BTreeMap, sync::RwLock};

use super::{Error, Store};

/// An ordered in-memory [`Store`], useful for tests and ephemeral trees
///
/// All contents are lost when the store is dropped. Batched writes are applied under a single
/// write lock, so concurrent readers observe a batch atomically.
///
/// ```rust
/// # use timber::*;
/// # use timber::store::MemoryStore;
/// let store = MemoryStore::new();
/// let mut tree = MerkleTree::<_, _>::open(&store, Blake2bHasher, "scratch", 16).unwrap();
///
/// tree.update(3, b"some value").unwrap();
/// assert_eq!(tree.get(3).unwrap().as_deref(), Some(&b"some value"[..]));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    /// Create a new, empty [`MemoryStore`]
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of keys currently stored
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().expect("poisoned lock").len()
    }

    /// Whether the store holds no keys
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Error> {
        let map = self.inner.read().expect("poisoned lock");
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), Error> {
        let mut map = self.inner.write().expect("poisoned lock");
        map.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn put_batch(&self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<(), Error> {
        let mut map = self.inner.write().expect("poisoned lock");
        for (key, value) in entries {
            map.insert(key, value);
        }
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), Error> {
        let mut map = self.inner.write().expect("poisoned lock");
        map.remove(key);
        Ok(())
    }
}

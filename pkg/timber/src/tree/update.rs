use tracing::debug;

use crate::{
    hash_cache::HashCache,
    store::{format, format::RootRecord, Store},
    Digest, Hasher,
};

use super::{Error, MerkleTree};

impl<S: Store, H: Hasher, C: HashCache> MerkleTree<S, H, C> {
    /// Write `value` at leaf `index` and return the new root digest
    ///
    /// The leaf's hash and every internal node on the path up to the root are recomputed and
    /// persisted, along with the raw value and the updated root marker, as one atomic batch.
    /// Sibling digests off the path are read from the store, falling back to the empty-subtree
    /// digest for nodes that have never been written.
    ///
    /// Writing the same value to the same leaf is idempotent - the root is unchanged no matter
    /// how often it is repeated:
    ///
    /// ```rust
    /// # use timber::*;
    /// # use timber::store::MemoryStore;
    /// let mut tree = MerkleTree::<_, _>::open(MemoryStore::new(), Blake2bHasher, "t", 8).unwrap();
    ///
    /// let once = tree.update(3, b"value").unwrap();
    /// let twice = tree.update(3, b"value").unwrap();
    /// assert_eq!(once, twice);
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= 2^depth` (nothing is written), or
    /// [`Error::Store`] if the store fails - in that case the in-memory root is left at its
    /// previous value, and the instance should be reopened before further use.
    #[tracing::instrument(err, skip(self, value), fields(name = %self.name))]
    pub fn update(&mut self, index: u64, value: &[u8]) -> Result<Digest, Error> {
        self.check_index(index)?;

        // leaf value + one node per level + root marker
        let mut batch = Vec::with_capacity(self.depth + 2);
        batch.push((format::leaf_key(&self.name, index), value.to_vec()));

        let mut current = self.hasher.hash_leaf(value);
        let mut idx = index;

        for depth in (1..=self.depth).rev() {
            batch.push((
                format::node_key(&self.name, depth, idx),
                current.as_bytes().to_vec(),
            ));

            let sibling = self.node(depth, idx ^ 1)?;

            // left-before-right, by index parity
            current = match idx & 1 {
                0 => self.cache.compress(&self.hasher, current, sibling),
                _ => self.cache.compress(&self.hasher, sibling, current),
            };

            idx >>= 1;
        }

        // depth <= MAX_DEPTH, so the cast is lossless
        #[allow(clippy::cast_possible_truncation)]
        let record = RootRecord {
            depth: self.depth as u8,
            root: current,
        };
        batch.push((format::root_key(&self.name), borsh::to_vec(&record)?));

        self.store.put_batch(batch)?;

        // only advance the cached root once the batch has landed
        self.root = current;
        debug!(index, root = %current, "updated leaf");

        Ok(current)
    }
}

use crate::{hash_cache::HashCache, store::Store, Digest, Hasher};

use super::{Error, MerkleTree};

/// A hash path: the inclusion proof for one leaf of a [`MerkleTree`]
///
/// A path for leaf `i` of a depth-`D` tree holds exactly `D` sibling pairs, ordered from the leaf
/// level up to the pair of children just below the root. Entry `j` is the `[left, right]` pair of
/// children of the node containing `i` at that level, so the leaf's own hash appears in entry 0
/// and the running digest appears in every later pair.
///
/// Folding the path from the leaf upwards with [`Hasher::compress`] reproduces the root,
/// proving the leaf's inclusion:
///
/// ```rust
/// # use timber::*;
/// # use timber::store::MemoryStore;
/// let mut tree = MerkleTree::<_, _>::open(MemoryStore::new(), Blake2bHasher, "t", 8).unwrap();
/// tree.update(5, b"hello").unwrap();
///
/// let path = tree.path_for(5).unwrap();
/// let leaf_hash = Blake2bHasher.hash_leaf(b"hello");
///
/// assert!(path.proves(&Blake2bHasher, 5, leaf_hash));
/// assert_eq!(path.compute_root_hash(&Blake2bHasher, 5, leaf_hash), tree.root_hash());
/// ```
///
/// Paths exist for *every* index, written or not: nodes in never-written regions are filled in
/// with the empty-subtree digests, so a path can equally prove that a leaf is absent (its slot
/// holds the empty-leaf digest).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HashPath {
    /// Sibling pairs, leaf-adjacent level first
    pairs: Vec<[Digest; 2]>,
    root: Digest,
}

impl HashPath {
    /// The `[left, right]` child pairs, ordered from the leaf level up to just below the root
    #[inline]
    #[must_use]
    pub fn pairs(&self) -> &[[Digest; 2]] {
        &self.pairs
    }

    /// The number of levels in this path (the depth of the tree that produced it)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the path has no levels (never true for a path produced by a tree)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The root of the tree at the moment this path was created
    #[inline]
    #[must_use]
    pub fn actual_root_hash(&self) -> Digest {
        self.root
    }

    /// Fold the path from `leaf_hash` up to a root digest
    ///
    /// At each level the running digest is compressed with the recorded sibling, on the side
    /// determined by the corresponding bit of `index`. The result equals
    /// [`actual_root_hash`](Self::actual_root_hash) exactly when `leaf_hash` is the digest in
    /// leaf `index`'s slot.
    #[must_use]
    pub fn compute_root_hash<H: Hasher>(&self, hasher: &H, index: u64, leaf_hash: Digest) -> Digest {
        let mut current = leaf_hash;

        for (level, [left, right]) in self.pairs.iter().enumerate() {
            current = match (index >> level) & 1 {
                0 => hasher.compress(current, *right),
                _ => hasher.compress(*left, current),
            };
        }

        current
    }

    /// Check whether this path proves that leaf `index` holds `leaf_hash`
    ///
    /// This is a small helper that compares [`compute_root_hash`](Self::compute_root_hash)
    /// against [`actual_root_hash`](Self::actual_root_hash).
    #[inline]
    #[must_use]
    pub fn proves<H: Hasher>(&self, hasher: &H, index: u64, leaf_hash: Digest) -> bool {
        self.compute_root_hash(hasher, index, leaf_hash) == self.root
    }
}

impl<S: Store, H: Hasher, C: HashCache> MerkleTree<S, H, C> {
    /// The hash path for leaf `index`
    ///
    /// Purely a read operation - the tree and store are never mutated. Two leaves in the same
    /// subtree return identical entries for every shared ancestor pair.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= 2^depth`, or [`Error::Store`] if the store fails.
    pub fn path_for(&self, index: u64) -> Result<HashPath, Error> {
        self.check_index(index)?;

        let mut pairs = Vec::with_capacity(self.depth);

        for level in 0..self.depth {
            let depth = self.depth - level;
            let node_index = index >> level;

            let left = self.node(depth, node_index & !1)?;
            let right = self.node(depth, node_index | 1)?;
            pairs.push([left, right]);
        }

        Ok(HashPath {
            pairs,
            root: self.root,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{store::MemoryStore, Blake2bHasher, Hasher, MerkleTree};

    #[test]
    fn path_has_one_pair_per_level() {
        let tree =
            MerkleTree::<_, _>::open(MemoryStore::new(), Blake2bHasher, "lengths", 6).unwrap();

        let path = tree.path_for(0).unwrap();
        assert_eq!(path.len(), 6);
        assert!(!path.is_empty());
    }

    #[test]
    fn proves_written_leaf_and_rejects_others() {
        let mut tree =
            MerkleTree::<_, _>::open(MemoryStore::new(), Blake2bHasher, "proofs", 5).unwrap();

        tree.update(9, b"nine").unwrap();

        let path = tree.path_for(9).unwrap();
        assert_eq!(path.actual_root_hash(), tree.root_hash());

        assert!(path.proves(&Blake2bHasher, 9, Blake2bHasher.hash_leaf(b"nine")));
        assert!(!path.proves(&Blake2bHasher, 9, Blake2bHasher.hash_leaf(b"ten")));
        assert!(!path.proves(&Blake2bHasher, 9, Blake2bHasher.empty_leaf()));
    }

    #[test]
    fn absent_leaves_prove_the_empty_slot() {
        let mut tree =
            MerkleTree::<_, _>::open(MemoryStore::new(), Blake2bHasher, "absence", 5).unwrap();

        tree.update(9, b"nine").unwrap();

        // leaf 10 was never written, so its slot holds the empty-leaf digest
        let path = tree.path_for(10).unwrap();
        assert!(path.proves(&Blake2bHasher, 10, Blake2bHasher.empty_leaf()));
        assert!(!path.proves(&Blake2bHasher, 10, Blake2bHasher.hash_leaf(b"nine")));
    }

    #[test]
    fn stale_path_no_longer_proves() {
        let mut tree =
            MerkleTree::<_, _>::open(MemoryStore::new(), Blake2bHasher, "stale", 4).unwrap();

        tree.update(2, b"old").unwrap();
        let path = tree.path_for(2).unwrap();

        tree.update(2, b"new").unwrap();

        // the stale path still folds to its own recorded root, not the current one
        let folded = path.compute_root_hash(&Blake2bHasher, 2, Blake2bHasher.hash_leaf(b"old"));
        assert_eq!(folded, path.actual_root_hash());
        assert_ne!(folded, tree.root_hash());
    }
}

use std::sync::OnceLock;

use crate::{tree::MAX_DEPTH, Blake2bHasher, Digest, Hasher};

/// The table of empty-subtree digests for a tree of a particular depth
///
/// `digest(d)` is the digest of any node at depth `d` (from the root) whose subtree has never had
/// a leaf written. The table is defined recursively:
///  - `digest(depth) = hasher.empty_leaf()`
///  - `digest(d) = hasher.compress(digest(d + 1), digest(d + 1))`
///
/// A [`MerkleTree`] computes this table once when opened and consults it whenever a node is
/// absent from the store.
///
/// ```rust
/// # use timber::*;
/// let zero = ZeroHashes::compute(&Blake2bHasher, 8);
///
/// // the leaf level is the empty-leaf digest
/// assert_eq!(zero.digest(8), Blake2bHasher.empty_leaf());
///
/// // every other level is the self-compression of the level below
/// let child = zero.digest(5);
/// assert_eq!(zero.digest(4), Blake2bHasher.compress(child, child));
/// ```
///
/// [`MerkleTree`]: crate::MerkleTree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeroHashes {
    /// `digests[d]` is the empty-subtree digest at depth `d` from the root
    digests: Vec<Digest>,
}

impl ZeroHashes {
    /// Compute the empty-subtree digests for a tree of the given depth
    ///
    /// # Panics
    ///
    /// Panics if `depth` is 0, since there is no such thing as a tree with depth 0.
    #[must_use]
    pub fn compute<H: Hasher>(hasher: &H, depth: usize) -> Self {
        assert_ne!(depth, 0, "the smallest possible tree has depth 1");

        let mut digests = vec![hasher.empty_leaf(); depth + 1];

        for d in (0..depth).rev() {
            let child = digests[d + 1];
            digests[d] = hasher.compress(child, child);
        }

        Self { digests }
    }

    /// The empty-subtree digest at depth `d` from the root
    ///
    /// # Panics
    ///
    /// Panics if `d` is greater than the depth this table was computed for.
    #[inline]
    #[must_use]
    pub fn digest(&self, d: usize) -> Digest {
        self.digests[d]
    }

    /// The root digest of an entirely-empty tree (i.e. `digest(0)`)
    #[inline]
    #[must_use]
    pub fn root(&self) -> Digest {
        self.digests[0]
    }

    /// The depth this table was computed for
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.digests.len() - 1
    }
}

/// The root digest of an empty tree of the given depth, under [`Blake2bHasher`]
///
/// This function computes and caches the table for every supported depth on first use, so calls
/// are essentially free after the initial setup.
///
/// ```rust
/// # use timber::*;
/// let root = empty_tree_root(32);
/// assert_eq!(root, ZeroHashes::compute(&Blake2bHasher, 32).root());
/// ```
///
/// # Panics
///
/// Panics if `depth` is 0 or greater than [`MAX_DEPTH`].
///
/// [`MAX_DEPTH`]: crate::MAX_DEPTH
#[inline]
#[must_use]
pub fn empty_tree_root(depth: usize) -> Digest {
    assert!(
        (1..=MAX_DEPTH).contains(&depth),
        "depth must be in 1..={MAX_DEPTH}"
    );

    // heights[h] is the digest of an empty subtree of height h
    static HEIGHTS: OnceLock<Vec<Digest>> = OnceLock::new();

    let heights = HEIGHTS.get_or_init(|| {
        let mut vec = Vec::with_capacity(MAX_DEPTH + 1);
        vec.push(Blake2bHasher.empty_leaf());

        for h in 1..=MAX_DEPTH {
            let child = vec[h - 1];
            vec.push(Blake2bHasher.compress(child, child));
        }

        vec
    });

    heights[depth]
}

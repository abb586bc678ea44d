use tracing::debug;

use crate::{
    hash_cache::{HashCache, NoopHashCache},
    store::{format, format::RootRecord, Store},
    Digest, Hasher, ZeroHashes,
};

mod error;
mod path;
mod update;

pub use error::Error;
pub use path::HashPath;

/// The largest supported tree depth
///
/// Leaf indices are `u64`, so a tree can have at most `2^64` leaves.
pub const MAX_DEPTH: usize = 64;

/// A fixed-depth Merkle tree over a backing key-value [`Store`]
///
/// A tree of depth `D` maps leaf indices `0..2^D` to opaque byte values, and commits to all of
/// them with a single 32-byte [root digest](Self::root_hash). Only written paths are persisted:
/// a node that has never been written reads as the [empty-subtree digest](ZeroHashes) for its
/// depth, so opening a tree of depth 64 costs the same as depth 4.
///
/// The store is the source of truth. A tree reopened with the same name and depth against the
/// same store reproduces the identical root and hash paths:
///
/// ```rust
/// # use timber::*;
/// # use timber::store::MemoryStore;
/// let store = MemoryStore::new();
///
/// let mut tree = MerkleTree::<_, _>::open(&store, Blake2bHasher, "accounts", 32).unwrap();
/// let root = tree.update(7, b"some account data").unwrap();
/// drop(tree);
///
/// let tree = MerkleTree::<_, _>::open(&store, Blake2bHasher, "accounts", 32).unwrap();
/// assert_eq!(tree.root_hash(), root);
/// ```
///
/// ## Concurrency
///
/// Updates take `&mut self` and must be serialized per tree: one update reads siblings and
/// rewrites a whole root-to-leaf path, so interleaved updates against the same name could
/// recompute a shared ancestor from stale reads. Read operations take `&self` and never mutate
/// the store.
#[derive(Debug)]
pub struct MerkleTree<S, H, C = NoopHashCache> {
    store: S,
    hasher: H,
    cache: C,
    name: String,
    depth: usize,
    root: Digest,
    zero: ZeroHashes,
}

impl<S: Store, H: Hasher, C: HashCache> MerkleTree<S, H, C> {
    /// Open the tree called `name` in `store`, creating it if it does not exist
    ///
    /// A freshly-created tree is entirely empty: its root is the depth-`0` empty-subtree digest,
    /// and a marker recording the depth and root is persisted immediately. An existing tree has
    /// its root loaded from that marker.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDepth`] if `depth` is not in `1..=`[`MAX_DEPTH`]
    /// - [`Error::NameTooLong`] if `name` does not fit the key encoding
    /// - [`Error::DepthMismatch`] if the tree already exists with a different depth
    /// - [`Error::Store`] if the store fails
    pub fn open(store: S, hasher: H, name: impl Into<String>, depth: usize) -> Result<Self, Error>
    where
        C: Default,
    {
        Self::open_with_cache(store, hasher, C::default(), name, depth)
    }

    /// Like [`open`](Self::open), but with an explicit [`HashCache`]
    ///
    /// ```rust
    /// # use timber::*;
    /// # use timber::store::MemoryStore;
    /// # use timber::hash_cache::SimpleHashCache;
    /// let cache = SimpleHashCache::new();
    /// let mut tree = MerkleTree::open_with_cache(
    ///     MemoryStore::new(),
    ///     Blake2bHasher,
    ///     cache.clone(),
    ///     "cached",
    ///     32,
    /// )
    /// .unwrap();
    ///
    /// tree.update(0, b"value").unwrap();
    /// assert!(cache.metrics().compressions() > 0);
    /// ```
    pub fn open_with_cache(
        store: S,
        hasher: H,
        cache: C,
        name: impl Into<String>,
        depth: usize,
    ) -> Result<Self, Error> {
        let name = name.into();

        if !(1..=MAX_DEPTH).contains(&depth) {
            return Err(Error::InvalidDepth(depth));
        }

        if u16::try_from(name.len()).is_err() {
            return Err(Error::NameTooLong(name.len()));
        }

        let zero = ZeroHashes::compute(&hasher, depth);
        let root_key = format::root_key(&name);

        let root = match store.get(&root_key)? {
            Some(bytes) => {
                let record: RootRecord = borsh::from_slice(&bytes)?;
                let stored = usize::from(record.depth);

                if stored != depth {
                    return Err(Error::DepthMismatch {
                        stored,
                        requested: depth,
                    });
                }

                record.root
            }
            None => {
                // depth <= MAX_DEPTH, so the cast is lossless
                #[allow(clippy::cast_possible_truncation)]
                let record = RootRecord {
                    depth: depth as u8,
                    root: zero.root(),
                };

                store.put(&root_key, &borsh::to_vec(&record)?)?;
                record.root
            }
        };

        debug!(name = %name, depth, root = %root, "opened tree");

        Ok(Self {
            store,
            hasher,
            cache,
            name,
            depth,
            root,
            zero,
        })
    }

    /// The current root digest of the tree
    ///
    /// This value is cached in memory and kept in sync by [`update`](Self::update), so calls are
    /// free. It commits to every leaf: any change to any leaf changes the root.
    #[inline]
    #[must_use]
    pub fn root_hash(&self) -> Digest {
        self.root
    }

    /// Read the raw value of leaf `index`, exactly as it was written
    ///
    /// Returns `None` for a leaf that has never been written - callers that need a default value
    /// must supply it themselves. No hashing is performed.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= 2^depth`, or [`Error::Store`] if the store fails.
    pub fn get(&self, index: u64) -> Result<Option<Vec<u8>>, Error> {
        self.check_index(index)?;
        Ok(self.store.get(&format::leaf_key(&self.name, index))?)
    }

    /// The depth of the tree
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The name of the tree (its key namespace within the store)
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of leaf slots in the tree (`2^depth`)
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> u128 {
        1 << self.depth
    }

    /// The empty-subtree digests for this tree's depth
    #[inline]
    #[must_use]
    pub fn zero_hashes(&self) -> &ZeroHashes {
        &self.zero
    }

    /// Get access to the inner cache of this tree
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Get a reference to the backing store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn check_index(&self, index: u64) -> Result<(), Error> {
        // a depth-64 tree spans the whole u64 range
        if self.depth < MAX_DEPTH && index >> self.depth != 0 {
            return Err(Error::IndexOutOfRange {
                index,
                depth: self.depth,
            });
        }

        Ok(())
    }

    /// The digest of the node at `(depth, index)`: the stored digest if the node has ever been
    /// written, the empty-subtree digest otherwise
    fn node(&self, depth: usize, index: u64) -> Result<Digest, Error> {
        match self.store.get(&format::node_key(&self.name, depth, index))? {
            Some(bytes) => Ok(Digest::try_from(bytes.as_slice())?),
            None => Ok(self.zero.digest(depth)),
        }
    }
}

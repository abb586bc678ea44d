/// An error that can occur when interacting with a [`MerkleTree`]
///
/// [`MerkleTree`]: crate::MerkleTree
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An index outside `0..2^depth` was passed to a tree operation
    #[error("index {index} is out of range for a tree of depth {depth}")]
    IndexOutOfRange {
        /// The offending index
        index: u64,
        /// The depth of the tree
        depth: usize,
    },

    /// A depth outside `1..=MAX_DEPTH` was passed to [`MerkleTree::open`]
    ///
    /// [`MerkleTree::open`]: crate::MerkleTree::open
    #[error("depth {0} is out of range (expected 1..={max})", max = crate::MAX_DEPTH)]
    InvalidDepth(usize),

    /// The tree name is too long to encode into store keys
    #[error("tree name is too long ({0} bytes, at most {max} are supported)", max = u16::MAX)]
    NameTooLong(usize),

    /// The tree exists in the store with a different depth than it was opened with
    ///
    /// Reopening a tree with the wrong depth would silently reinterpret every node position, so
    /// it is rejected instead.
    #[error("tree was created with depth {stored}, but opened with depth {requested}")]
    DepthMismatch {
        /// The depth recorded in the store
        stored: usize,
        /// The depth passed to `open`
        requested: usize,
    },

    /// The backing store failed a read or write
    ///
    /// The tree's in-memory root is never advanced past a failed update, but the instance should
    /// be considered suspect: reopen it to resynchronize against durable state.
    #[error("store error: {0}")]
    Store(#[from] crate::store::Error),

    /// The store contained a digest with the wrong number of bytes
    #[error("corrupt digest in store: {0}")]
    CorruptDigest(#[from] core::array::TryFromSliceError),

    /// The root record could not be serialized or deserialized
    #[error("corrupt root record in store: {0}")]
    CorruptRootRecord(#[from] std::io::Error),
}

use core::fmt;

use borsh::{BorshDeserialize, BorshSerialize};

/// The output of a hash or compression function - a 32-byte value
///
/// [`Digest`]s are produced by a [`Hasher`] and are never interpreted by this crate beyond
/// equality and byte access, so any 32-byte hash function output can be represented.
///
/// ```rust
/// # use timber::*;
/// let digest = Blake2bHasher.hash_leaf(b"hello");
/// println!("{digest}");  // prints the digest as hex
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Digest([u8; 32]);

impl Digest {
    /// The all-zeroes digest
    pub const ZERO: Self = Self([0; 32]);

    /// Create a [`Digest`] from a byte array
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The bytes of this digest
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The bytes of this digest, by value
    #[inline]
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 32] {
        self.0
    }
}

impl From<[u8; 32]> for Digest {
    #[inline]
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = core::array::TryFromSliceError;

    #[inline]
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(<[u8; 32]>::try_from(bytes)?))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", hex::encode(self.0))
    }
}

/// The pair of cryptographic functions a [`MerkleTree`] is built from
///
/// [`hash_leaf`] maps an arbitrary-length leaf value to its digest, and [`compress`] combines two
/// child digests into their parent digest. Both must be deterministic and collision-resistant,
/// and [`compress`] must be order-sensitive (`compress(a, b) != compress(b, a)` in general).
///
/// The two functions must be domain-separated: it should not be possible to find a leaf value
/// whose [`hash_leaf`] digest equals the [`compress`] digest of a node, otherwise internal nodes
/// could be presented as leaves.
///
/// Implementations are infallible by signature - a hash function that can fail on valid input
/// indicates an environment defect, and should panic rather than return a wrong digest.
///
/// [`MerkleTree`]: crate::MerkleTree
/// [`hash_leaf`]: Hasher::hash_leaf
/// [`compress`]: Hasher::compress
pub trait Hasher {
    /// Hash a raw leaf value into a [`Digest`]
    fn hash_leaf(&self, value: &[u8]) -> Digest;

    /// Combine two child digests into their parent digest
    ///
    /// `left` is always the even-indexed child, `right` the odd-indexed child.
    fn compress(&self, left: Digest, right: Digest) -> Digest;

    /// The digest of a leaf that has never been written
    ///
    /// Defaults to hashing the empty byte string. Override this to stay byte-compatible with an
    /// existing tree that uses a different empty-leaf convention.
    #[inline]
    fn empty_leaf(&self) -> Digest {
        self.hash_leaf(&[])
    }
}

/// The hasher used by default: BLAKE2b-256 in both roles
///
/// The leaf-hash and compression roles use distinct personalization strings, so a leaf digest can
/// never collide with a node digest.
///
/// ```rust
/// # use timber::*;
/// let a = Blake2bHasher.hash_leaf(b"some value");
/// let b = Blake2bHasher.hash_leaf(b"some value");
/// assert_eq!(a, b);
///
/// // compression is order-sensitive
/// let ab = Blake2bHasher.compress(a, b);
/// let ba = Blake2bHasher.compress(b, a);
/// assert_ne!(ab, ba);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake2bHasher;

const LEAF_PERSONA: &[u8] = b"timber.leaf";
const NODE_PERSONA: &[u8] = b"timber.node";

impl Hasher for Blake2bHasher {
    fn hash_leaf(&self, value: &[u8]) -> Digest {
        let hash = blake2b_simd::Params::new()
            .hash_length(32)
            .personal(LEAF_PERSONA)
            .hash(value);

        let mut bytes = [0; 32];
        bytes.copy_from_slice(hash.as_bytes());
        Digest(bytes)
    }

    fn compress(&self, left: Digest, right: Digest) -> Digest {
        let mut state = blake2b_simd::Params::new()
            .hash_length(32)
            .personal(NODE_PERSONA)
            .to_state();

        state.update(left.as_bytes());
        state.update(right.as_bytes());

        let mut bytes = [0; 32];
        bytes.copy_from_slice(state.finalize().as_bytes());
        Digest(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_hex() {
        let digest = Digest::new([0xab; 32]);
        assert_eq!(digest.to_string(), "ab".repeat(32));

        assert_eq!(Digest::ZERO, Digest::new([0; 32]));
        assert_eq!(Digest::ZERO.to_string(), "00".repeat(32));
    }

    #[test]
    fn compress_is_order_sensitive() {
        let a = Blake2bHasher.hash_leaf(b"a");
        let b = Blake2bHasher.hash_leaf(b"b");

        assert_ne!(Blake2bHasher.compress(a, b), Blake2bHasher.compress(b, a));
    }

    #[test]
    fn leaf_and_node_roles_are_domain_separated() {
        let a = Digest::new([1; 32]);
        let b = Digest::new([2; 32]);

        // hashing the concatenated bytes as a leaf must not equal compressing them as a node
        let mut concat = Vec::with_capacity(64);
        concat.extend_from_slice(a.as_bytes());
        concat.extend_from_slice(b.as_bytes());

        assert_ne!(Blake2bHasher.hash_leaf(&concat), Blake2bHasher.compress(a, b));
    }

    #[test]
    fn digest_roundtrips_through_slices() {
        let digest = Blake2bHasher.hash_leaf(b"roundtrip");
        let bytes = digest.to_bytes();

        assert_eq!(Digest::try_from(&bytes[..]).unwrap(), digest);
        assert!(Digest::try_from(&bytes[..31]).is_err());
    }
}

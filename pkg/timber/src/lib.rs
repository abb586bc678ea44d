#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! # Timber
//!
//! A fixed-depth, store-backed Merkle tree that maps integer leaf positions to opaque byte
//! values and commits to all of them with a single 32-byte root digest.
//!
//! Conceptually, a [`MerkleTree`] of depth `D` is a map from indices `0..2^D` to byte values,
//! where the whole map is summarized by [`MerkleTree::root_hash`], and every leaf has a compact
//! inclusion proof ([`MerkleTree::path_for`]). Only written paths are ever stored - a node that
//! has never been written reads as the precomputed digest of an empty subtree ([`ZeroHashes`]) -
//! so sparse trees over enormous index spaces are cheap.
//!
//! ```rust
//! use timber::{Blake2bHasher, Hasher, MerkleTree};
//! use timber::store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let mut tree = MerkleTree::<_, _>::open(store, Blake2bHasher, "notes", 32).unwrap();
//!
//! let root = tree.update(5, b"hello").unwrap();
//! assert_eq!(tree.root_hash(), root);
//!
//! // the value itself comes back verbatim
//! assert_eq!(tree.get(5).unwrap().as_deref(), Some(&b"hello"[..]));
//!
//! // and the hash path proves it is committed to by the root
//! let path = tree.path_for(5).unwrap();
//! assert!(path.proves(&Blake2bHasher, 5, Blake2bHasher.hash_leaf(b"hello")));
//! ```
//!
//! ## Persistence
//!
//! All durable state lives in a [`store::Store`] - an ordered byte-string key-value store.
//! Keys are namespaced by tree name, so many trees can share one store instance. The crate
//! ships [`store::MemoryStore`] and, behind the `storage` feature, a rocksdb adapter
//! ([`store::RocksStore`]). A tree reopened with the same name and depth reproduces the same
//! root and paths; reopening with a *different* depth is rejected.
//!
//! ## Hash functions
//!
//! The tree consumes two cryptographic functions through the [`Hasher`] trait: a leaf hash for
//! values and an order-sensitive compression function for internal nodes. [`Blake2bHasher`]
//! (BLAKE2b-256 with domain-separating personalization) is provided as the default; any pair of
//! deterministic, collision-resistant functions can be substituted, at the cost of a different
//! (incompatible) set of digests.

mod digest;
mod hash;
/// Caching of compression results
pub mod hash_cache;
/// The store boundary and the shipped adapters
pub mod store;
mod tree;

pub use digest::{Blake2bHasher, Digest, Hasher};
pub use hash::{empty_tree_root, ZeroHashes};
pub use tree::{Error, HashPath, MerkleTree, MAX_DEPTH};

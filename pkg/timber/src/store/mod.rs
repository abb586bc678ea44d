//! The key-value store a [`MerkleTree`] persists into
//!
//! A tree reads and writes opaque byte-string keys and values through the [`Store`] trait.
//! Two adapters are provided: [`MemoryStore`] for tests and ephemeral trees, and (behind the
//! `storage` feature) [`RocksStore`] for durable trees.
//!
//! Keys are scoped by tree name, so any number of trees can share one store instance without
//! colliding.
//!
//! [`MerkleTree`]: crate::MerkleTree

use std::sync::Arc;

pub use error::Error;
pub use memory::MemoryStore;

#[cfg(feature = "storage")]
pub use rocks::RocksStore;

mod error;
pub(crate) mod format;
mod memory;

#[cfg(feature = "storage")]
mod rocks;

#[cfg(test)]
mod tests;

/// An ordered byte-string key-value store
///
/// The store is the source of truth for a [`MerkleTree`] across process restarts. The tree only
/// requires point reads and writes, plus [`put_batch`] for the multi-key write of a single
/// update, which must be applied atomically: after a failure, either every pair of the batch is
/// visible or none are.
///
/// No retry policy is applied by the tree - if an adapter wants retries, it implements them
/// itself.
///
/// [`MerkleTree`]: crate::MerkleTree
/// [`put_batch`]: Store::put_batch
pub trait Store {
    /// Read the value stored under `key`, or `None` if the key has never been written
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Error>;

    /// Write `value` under `key`, overwriting any previous value
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), Error>;

    /// Atomically write every `(key, value)` pair in `entries`
    fn put_batch(&self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<(), Error>;

    /// Remove `key` and its value, if present
    fn delete(&self, key: &[u8]) -> Result<(), Error>;
}

impl<S: Store + ?Sized> Store for &S {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Error> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), Error> {
        (**self).put(key, value)
    }

    fn put_batch(&self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<(), Error> {
        (**self).put_batch(entries)
    }

    fn delete(&self, key: &[u8]) -> Result<(), Error> {
        (**self).delete(key)
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Error> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), Error> {
        (**self).put(key, value)
    }

    fn put_batch(&self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<(), Error> {
        (**self).put_batch(entries)
    }

    fn delete(&self, key: &[u8]) -> Result<(), Error> {
        (**self).delete(key)
    }
}

use std::path::Path;

use rocksdb::{WriteBatch, DB};

use super::{Error, Store};

/// A durable [`Store`] backed by a rocksdb database
///
/// A single update's multi-key write goes through a rocksdb [`WriteBatch`], which rocksdb applies
/// atomically, so a crash mid-update never leaves a partially-written path on disk.
///
/// ```rust,no_run
/// # use timber::*;
/// # use timber::store::RocksStore;
/// let store = RocksStore::open("/var/lib/myapp/trees").unwrap();
/// let mut tree = MerkleTree::<_, _>::open(store, Blake2bHasher, "accounts", 32).unwrap();
///
/// tree.update(0, b"genesis").unwrap();
/// ```
pub struct RocksStore {
    db: DB,
}

impl RocksStore {
    /// Open (creating if necessary) a rocksdb database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let db = DB::open_default(path)?;
        Ok(Self { db })
    }

    /// Wrap an already-open rocksdb instance
    #[inline]
    #[must_use]
    pub fn from_db(db: DB) -> Self {
        Self { db }
    }

    /// Get a reference to the rocksdb instance
    #[inline]
    #[must_use]
    pub fn db(&self) -> &DB {
        &self.db
    }
}

impl Store for RocksStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Error> {
        Ok(self.db.get(key)?)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), Error> {
        Ok(self.db.put(key, value)?)
    }

    fn put_batch(&self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<(), Error> {
        let mut batch = WriteBatch::default();

        for (key, value) in entries {
            batch.put(key, value);
        }

        Ok(self.db.write(batch)?)
    }

    fn delete(&self, key: &[u8]) -> Result<(), Error> {
        Ok(self.db.delete(key)?)
    }
}

/// An error from a [`Store`] adapter
///
/// [`Store`]: crate::store::Store
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error from rocksdb
    #[cfg(feature = "storage")]
    #[error("rocksdb error: {0}")]
    Rocksdb(#[from] rocksdb::Error),

    /// An error from a store adapter defined outside this crate
    #[error("store backend error: {0}")]
    Backend(String),
}

impl Error {
    /// Create a [`Error::Backend`] from anything printable
    ///
    /// This is the intended way for external [`Store`] implementations to surface their failures.
    ///
    /// [`Store`]: crate::store::Store
    pub fn backend(message: impl std::fmt::Display) -> Self {
        Self::Backend(message.to_string())
    }
}

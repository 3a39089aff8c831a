//! RocksDB storage implementation.

use crate::errors::{Result, StorageError};
use rocksdb::{Direction, IteratorMode, Options, WriteBatch, DB};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    path::Path,
    sync::{Arc, RwLock},
};
use tracing::debug;

/// Embedded key-value store backed by a single RocksDB instance.
///
/// Keys are raw bytes produced by [`crate::keys::get_key`]; values are
/// bincode-serialized. The handle is safe for concurrent use and becomes
/// permanently unusable after [`KvStore::close`].
#[derive(Debug)]
pub struct KvStore {
    db: RwLock<Option<Arc<DB>>>,
}

impl KvStore {
    /// Open a store at the specified path, creating it if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DB::open(&opts, &path).map_err(|e| StorageError::Database(e.to_string()))?;

        debug!("Opened RocksDB at {:?}", path.as_ref());

        Ok(Self {
            db: RwLock::new(Some(Arc::new(db))),
        })
    }

    /// Open a store in a fresh temporary directory.
    ///
    /// This is public for use in other crates' test modules.
    pub fn open_test() -> Result<Self> {
        let temp_dir = tempfile::TempDir::new().map_err(StorageError::IoError)?;
        Self::open(temp_dir.into_path())
    }

    /// Get the live database handle, or fail if the store is closed.
    fn handle(&self) -> Result<Arc<DB>> {
        let guard = self.db.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().cloned().ok_or(StorageError::Closed)
    }

    /// Get a value by key
    ///
    /// Returns `Ok(Some(value))` if the key exists, `Ok(None)` if not found.
    pub async fn get<V>(&self, key: &[u8]) -> Result<Option<V>>
    where
        V: DeserializeOwned,
    {
        let db = self.handle()?;

        let result = db
            .get(key)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        match result {
            Some(bytes) => Ok(Some(deserialize_value(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Put a key-value pair
    pub async fn put<V>(&self, key: &[u8], value: &V) -> Result<()>
    where
        V: Serialize,
    {
        let db = self.handle()?;
        let value_bytes = serialize_value(value)?;

        db.put(key, &value_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    /// Delete a key
    pub async fn delete(&self, key: &[u8]) -> Result<()> {
        let db = self.handle()?;

        db.delete(key)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    /// Check if a key exists
    pub async fn exists(&self, key: &[u8]) -> Result<bool> {
        let db = self.handle()?;

        let result = db
            .get(key)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(result.is_some())
    }

    /// Get all key-value pairs whose keys start with the given prefix.
    pub async fn get_by_prefix<V>(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, V)>>
    where
        V: DeserializeOwned,
    {
        let db = self.handle()?;

        let mut results = Vec::new();

        // Seek to the prefix position; keys are sorted, so the scan can
        // stop at the first key past the prefix.
        let iter = db.iterator(IteratorMode::From(prefix, Direction::Forward));

        for item in iter {
            let (key, value) = item.map_err(|e| StorageError::Database(e.to_string()))?;

            if key.starts_with(prefix) {
                let deserialized_value = deserialize_value(&value)?;
                results.push((key.to_vec(), deserialized_value));
            } else {
                break;
            }
        }

        Ok(results)
    }

    /// Create a new batch for atomic multi-key writes
    pub fn batch(&self) -> Result<KvBatch> {
        Ok(KvBatch {
            db: self.handle()?,
            write_batch: WriteBatch::default(),
        })
    }

    /// Close the store.
    ///
    /// Outstanding data is flushed and the handle released. Any operation
    /// after close, including a second close, fails with
    /// [`StorageError::Closed`].
    pub async fn close(&self) -> Result<()> {
        let db = {
            let mut guard = self.db.write().unwrap_or_else(|e| e.into_inner());
            guard.take().ok_or(StorageError::Closed)?
        };

        db.flush()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        db.cancel_all_background_work(true);

        debug!("Closed RocksDB store");
        Ok(())
    }
}

/// Batch of writes committed atomically
pub struct KvBatch {
    db: Arc<DB>,
    write_batch: WriteBatch,
}

impl KvBatch {
    /// Put a key-value pair in the batch
    pub fn put<V>(&mut self, key: &[u8], value: &V) -> Result<()>
    where
        V: Serialize,
    {
        let value_bytes = serialize_value(value)?;
        self.write_batch.put(key, &value_bytes);
        Ok(())
    }

    /// Delete a key in the batch
    pub fn delete(&mut self, key: &[u8]) {
        self.write_batch.delete(key);
    }

    /// Commit the batch atomically
    pub async fn commit(self) -> Result<()> {
        self.db
            .write(self.write_batch)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        debug!("Batch committed successfully");
        Ok(())
    }

    /// Rollback the batch (drop without committing)
    pub fn rollback(self) {
        debug!("Batch rolled back");
    }
}

/// Helper function to serialize a value
pub(crate) fn serialize_value<V: Serialize>(value: &V) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Helper function to deserialize a value
pub(crate) fn deserialize_value<V: DeserializeOwned>(bytes: &[u8]) -> Result<V> {
    bincode::deserialize(bytes).map_err(|e| StorageError::Deserialization(e.to_string()))
}

//! Blob store trait.
//!
//! A flat string-keyed store of text blobs. The card collection is kept as a
//! single blob; nothing else about the layout is assumed here.

use cardsmith_types::error::RepositoryError;

/// Trait for persistent string-keyed blob storage.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in cardsmith-infra.
pub trait BlobStore: Send + Sync {
    /// Get a blob by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, RepositoryError>> + Send;

    /// Write a blob for a key, replacing any previous value.
    fn put(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

/// In-memory blob store for tests.
#[cfg(test)]
pub(crate) mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[derive(Default)]
    pub struct MemoryBlobStore {
        pub blobs: Mutex<HashMap<String, String>>,
        pub writes: Mutex<usize>,
        pub fail_writes: AtomicBool,
    }

    impl MemoryBlobStore {
        pub fn with_blob(key: &str, value: &str) -> Self {
            let store = Self::default();
            store
                .blobs
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            store
        }

        pub fn fail_writes_now(&self) {
            self.fail_writes.store(true, Ordering::SeqCst);
        }

        pub fn write_count(&self) -> usize {
            *self.writes.lock().unwrap()
        }

        pub fn raw(&self, key: &str) -> Option<String> {
            self.blobs.lock().unwrap().get(key).cloned()
        }
    }

    impl BlobStore for MemoryBlobStore {
        async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
            Ok(self.blobs.lock().unwrap().get(key).cloned())
        }

        async fn put(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(RepositoryError::Connection);
            }
            *self.writes.lock().unwrap() += 1;
            self.blobs
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}

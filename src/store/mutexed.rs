use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task;
use tracing::debug;

use crate::store::{ConcurrentStore, MemoryStore, StoreError};

/// Shares a [`MemoryStore`] behind a single asynchronous mutex. Every operation acquires the lock,
/// performs exactly one store call and releases it.
///
/// Tokio's mutex is fair: waiters are granted the lock in the order they asked for it, so no
/// caller starves and the order in which operations hit the store matches acquisition order.
/// The handle is cheap to clone.
#[derive(Clone)]
pub struct MutexedStore {
    inner: Arc<Mutex<MemoryStore>>,
}

impl MutexedStore {
    pub fn new(store: MemoryStore) -> MutexedStore {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }
}

impl Default for MutexedStore {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl ConcurrentStore for MutexedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.lock().await.get(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner
            .lock()
            .await
            .set(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.lock().await.delete(key))
    }

    async fn count(&self, value: &str) -> Result<usize, StoreError> {
        Ok(self.inner.lock().await.count(value))
    }

    async fn begin(&self) -> Result<(), StoreError> {
        self.inner.lock().await.begin();
        Ok(())
    }

    async fn commit(&self) -> Result<(), StoreError> {
        // The merge is proportional to the size of the transaction, so it runs on the blocking
        // pool. The owned guard moves along with it and the lock is held until it finishes.
        let mut store = self.inner.clone().lock_owned().await;
        debug!("merging transaction on the blocking pool");

        task::spawn_blocking(move || store.commit()).await?
    }

    async fn rollback(&self) -> Result<(), StoreError> {
        self.inner.lock().await.rollback()
    }
}

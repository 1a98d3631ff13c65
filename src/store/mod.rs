pub mod memory;
pub mod mutexed;
pub mod sequenced;

use std::future::Future;
use thiserror::Error as ThisError;
use tokio::task::JoinError;

pub use memory::MemoryStore;
pub use mutexed::MutexedStore;
pub use sequenced::SequencedStore;

/// A [`MemoryStore`] made safe to share between concurrent callers.
///
/// Every operation suspends the caller until its result is available, and all operations from
/// all callers are applied to the underlying store in a single total order.
pub trait ConcurrentStore: Send + Sync {
    /// Returns the value of `key` in the active transaction, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Removes `key` from the active transaction and returns the value it held.
    fn delete(&self, key: &str)
        -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Returns how many keys of the active transaction hold `value`.
    fn count(&self, value: &str) -> impl Future<Output = Result<usize, StoreError>> + Send;

    fn begin(&self) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Fails with [`StoreError::NoTransaction`] if only the base scope is left.
    fn commit(&self) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Fails with [`StoreError::NoTransaction`] if only the base scope is left.
    fn rollback(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("no transaction")]
    NoTransaction,
    #[error("store sequencer is no longer running")]
    Closed,
    #[error("commit task failed: {0}")]
    Join(#[from] JoinError),
}

/// Serialization strategy used to share the store between callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Strategy {
    /// A fair mutex around the store, one operation per acquisition.
    Mutex,
    /// A dedicated task that applies queued operations one at a time.
    Sequencer,
}

/// Either serialization strategy, chosen at runtime.
#[derive(Clone)]
pub enum SerializedStore {
    Mutexed(MutexedStore),
    Sequenced(SequencedStore),
}

impl SerializedStore {
    /// Wraps `store` with `strategy`. Must be called from within a Tokio runtime, since the
    /// sequencer spawns its worker task.
    pub fn new(strategy: Strategy, store: MemoryStore, channel_capacity: usize) -> SerializedStore {
        match strategy {
            Strategy::Mutex => SerializedStore::Mutexed(MutexedStore::new(store)),
            Strategy::Sequencer => {
                SerializedStore::Sequenced(SequencedStore::with_capacity(store, channel_capacity))
            }
        }
    }
}

impl ConcurrentStore for SerializedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            SerializedStore::Mutexed(store) => store.get(key).await,
            SerializedStore::Sequenced(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            SerializedStore::Mutexed(store) => store.set(key, value).await,
            SerializedStore::Sequenced(store) => store.set(key, value).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            SerializedStore::Mutexed(store) => store.delete(key).await,
            SerializedStore::Sequenced(store) => store.delete(key).await,
        }
    }

    async fn count(&self, value: &str) -> Result<usize, StoreError> {
        match self {
            SerializedStore::Mutexed(store) => store.count(value).await,
            SerializedStore::Sequenced(store) => store.count(value).await,
        }
    }

    async fn begin(&self) -> Result<(), StoreError> {
        match self {
            SerializedStore::Mutexed(store) => store.begin().await,
            SerializedStore::Sequenced(store) => store.begin().await,
        }
    }

    async fn commit(&self) -> Result<(), StoreError> {
        match self {
            SerializedStore::Mutexed(store) => store.commit().await,
            SerializedStore::Sequenced(store) => store.commit().await,
        }
    }

    async fn rollback(&self) -> Result<(), StoreError> {
        match self {
            SerializedStore::Mutexed(store) => store.rollback().await,
            SerializedStore::Sequenced(store) => store.rollback().await,
        }
    }
}

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::store::{ConcurrentStore, MemoryStore, StoreError};

const DEFAULT_CAPACITY: usize = 1024;

/// Shares a [`MemoryStore`] by handing it to a dedicated worker task. Callers push requests onto
/// the worker's input queue and wait for the reply; the worker applies one request fully before
/// taking the next, so requests are applied in arrival order.
///
/// Each request carries its own reply channel, so a caller always receives the response to its
/// own request, no matter how many requests it or anyone else has in flight.
///
/// The handle is cheap to clone. The worker stops once every handle has been dropped.
#[derive(Clone)]
pub struct SequencedStore {
    requests: mpsc::Sender<Request>,
}

type Responder<T> = oneshot::Sender<T>;

#[derive(Debug)]
enum Request {
    Get {
        key: String,
        reply: Responder<Option<String>>,
    },
    Set {
        key: String,
        value: String,
        reply: Responder<()>,
    },
    Delete {
        key: String,
        reply: Responder<Option<String>>,
    },
    Count {
        value: String,
        reply: Responder<usize>,
    },
    Begin {
        reply: Responder<()>,
    },
    Commit {
        reply: Responder<Result<(), StoreError>>,
    },
    Rollback {
        reply: Responder<Result<(), StoreError>>,
    },
}

impl SequencedStore {
    /// Spawns the worker task, so this must be called from within a Tokio runtime.
    pub fn new(store: MemoryStore) -> SequencedStore {
        Self::with_capacity(store, DEFAULT_CAPACITY)
    }

    /// Like [`SequencedStore::new`], bounding the input queue to `capacity` pending requests.
    /// Callers wait for room once the queue is full.
    pub fn with_capacity(store: MemoryStore, capacity: usize) -> SequencedStore {
        let (requests, receiver) = mpsc::channel(capacity.max(1));

        tokio::spawn(apply_requests(store, receiver));

        Self { requests }
    }

    async fn request<T, F>(&self, build: F) -> Result<T, StoreError>
    where
        T: Send,
        F: FnOnce(Responder<T>) -> Request + Send,
    {
        let (reply, response) = oneshot::channel();

        self.requests
            .send(build(reply))
            .await
            .map_err(|_| StoreError::Closed)?;

        response.await.map_err(|_| StoreError::Closed)
    }
}

impl ConcurrentStore for SequencedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.request(|reply| Request::Get {
            key: key.to_string(),
            reply,
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.request(|reply| Request::Set {
            key: key.to_string(),
            value: value.to_string(),
            reply,
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.request(|reply| Request::Delete {
            key: key.to_string(),
            reply,
        })
        .await
    }

    async fn count(&self, value: &str) -> Result<usize, StoreError> {
        self.request(|reply| Request::Count {
            value: value.to_string(),
            reply,
        })
        .await
    }

    async fn begin(&self) -> Result<(), StoreError> {
        self.request(|reply| Request::Begin { reply }).await
    }

    async fn commit(&self) -> Result<(), StoreError> {
        self.request(|reply| Request::Commit { reply }).await?
    }

    async fn rollback(&self) -> Result<(), StoreError> {
        self.request(|reply| Request::Rollback { reply }).await?
    }
}

async fn apply_requests(mut store: MemoryStore, mut requests: mpsc::Receiver<Request>) {
    debug!("store sequencer started");

    while let Some(request) = requests.recv().await {
        // A failed send only means the caller stopped waiting for its reply.
        let delivered = match request {
            Request::Get { key, reply } => reply.send(store.get(&key)).is_ok(),
            Request::Set { key, value, reply } => {
                store.set(key, value);
                reply.send(()).is_ok()
            }
            Request::Delete { key, reply } => reply.send(store.delete(&key)).is_ok(),
            Request::Count { value, reply } => reply.send(store.count(&value)).is_ok(),
            Request::Begin { reply } => {
                store.begin();
                reply.send(()).is_ok()
            }
            Request::Commit { reply } => reply.send(store.commit()).is_ok(),
            Request::Rollback { reply } => reply.send(store.rollback()).is_ok(),
        };

        if !delivered {
            debug!("caller dropped before its reply was sent");
        }
    }

    debug!("all store handles dropped, sequencer stopped");
}

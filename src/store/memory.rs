use std::collections::HashMap;
use tracing::debug;

use crate::store::StoreError;

/// The MemoryStore keeps a stack of scopes, one per open transaction, on top of a permanent base
/// scope. Every read and write observes only the active (top) scope. Each scope carries its own
/// reverse index from value to the number of keys holding it, so `count` never walks the map.
///
/// The store holds no synchronization of its own. Share it between tasks through one of the
/// [`ConcurrentStore`](crate::store::ConcurrentStore) strategies.
#[derive(Debug)]
pub struct MemoryStore {
    scopes: Vec<Scope>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    /// Builds a store whose base scope already holds `entries`, with the reverse index derived
    /// from them. Later pairs overwrite earlier ones with the same key.
    pub fn from_entries<I, K, V>(entries: I) -> MemoryStore
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut base = Scope::default();
        for (key, value) in entries {
            base.set(key.into(), value.into());
        }

        Self { scopes: vec![base] }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.active().keys.get(key).cloned()
    }

    pub fn set(&mut self, key: String, value: String) {
        self.active_mut().set(key, value);
    }

    pub fn delete(&mut self, key: &str) -> Option<String> {
        self.active_mut().delete(key)
    }

    pub fn count(&self, value: &str) -> usize {
        self.active().counters.get(value).copied().unwrap_or_default()
    }

    pub fn begin(&mut self) {
        self.scopes.push(Scope::default());
        debug!(depth = self.depth(), "transaction started");
    }

    /// Pops the active transaction and replays each of its entries as a `set` against the scope
    /// below, so the destination's reverse index stays consistent. Keys deleted inside the
    /// transaction are not propagated.
    pub fn commit(&mut self) -> Result<(), StoreError> {
        let committed = self.pop()?;
        let target = self.active_mut();

        let merged = committed.keys.len();
        for (key, value) in committed.keys {
            target.set(key, value);
        }

        debug!(depth = self.depth(), merged, "transaction committed");
        Ok(())
    }

    pub fn rollback(&mut self) -> Result<(), StoreError> {
        let discarded = self.pop()?;
        debug!(
            depth = self.depth(),
            discarded = discarded.keys.len(),
            "transaction rolled back"
        );
        Ok(())
    }

    /// Number of scopes on the stack, including the base scope. Always at least one.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    fn pop(&mut self) -> Result<Scope, StoreError> {
        // The base scope is never removed.
        if self.scopes.len() == 1 {
            return Err(StoreError::NoTransaction);
        }
        self.scopes.pop().ok_or(StoreError::NoTransaction)
    }

    fn active(&self) -> &Scope {
        self.scopes
            .last()
            .expect("scope stack always holds the base scope")
    }

    fn active_mut(&mut self) -> &mut Scope {
        self.scopes
            .last_mut()
            .expect("scope stack always holds the base scope")
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

type Key = String;
type Value = String;

#[derive(Debug, Default)]
struct Scope {
    keys: HashMap<Key, Value>,
    counters: HashMap<Value, usize>,
}

impl Scope {
    fn set(&mut self, key: Key, value: Value) {
        if let Some(old) = self.keys.get(&key).cloned() {
            self.decrement(&old);
        }
        *self.counters.entry(value.clone()).or_insert(0) += 1;
        self.keys.insert(key, value);
    }

    fn delete(&mut self, key: &str) -> Option<Value> {
        let removed = self.keys.remove(key)?;
        self.decrement(&removed);
        Some(removed)
    }

    fn decrement(&mut self, value: &str) {
        if let Some(count) = self.counters.get_mut(value) {
            *count -= 1;
            if *count == 0 {
                self.counters.remove(value);
            }
        }
    }
}

//! Single-flight coalescing of identical in-progress requests.
//!
//! Concurrent cache misses for the same key share one network call: the
//! first caller installs a shared future, later callers clone and await
//! it. The entry is removed when the call completes, so a subsequent
//! miss starts a fresh request.

use std::collections::HashMap;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;

/// A coalesced in-progress fetch, cloneable by any number of waiters.
pub(crate) type SharedFetch<T, E> = Shared<BoxFuture<'static, Result<T, E>>>;

/// Map from cache key to the in-progress fetch for that key.
pub(crate) struct FlightTable<T, E> {
    inflight: Mutex<HashMap<String, SharedFetch<T, E>>>,
}

impl<T, E> FlightTable<T, E>
where
    T: Clone,
    E: Clone,
{
    pub(crate) fn new() -> Self {
        Self {
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Join the in-progress fetch for `key`, or install the one produced
    /// by `make` if none exists. Returns the future to await and whether
    /// this caller is the leader that installed it.
    pub(crate) fn join_or_insert(
        &self,
        key: &str,
        make: impl FnOnce() -> BoxFuture<'static, Result<T, E>>,
    ) -> (SharedFetch<T, E>, bool) {
        let mut inflight = self.inflight.lock();
        if let Some(existing) = inflight.get(key) {
            return (existing.clone(), false);
        }
        let shared = make().shared();
        inflight.insert(key.to_string(), shared.clone());
        (shared, true)
    }

    /// Remove the entry for `key`, called by the leader on completion.
    pub(crate) fn remove(&self, key: &str) {
        self.inflight.lock().remove(key);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inflight.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_caller_joins_existing_flight() {
        let table: FlightTable<u32, String> = FlightTable::new();

        let (first, leader) = table.join_or_insert("k", || async { Ok(7) }.boxed());
        assert!(leader);

        let (second, leader) = table.join_or_insert("k", || async { Ok(99) }.boxed());
        assert!(!leader);

        // Both awaiters resolve to the leader's result.
        assert_eq!(first.await, Ok(7));
        assert_eq!(second.await, Ok(7));
    }

    #[tokio::test]
    async fn test_remove_allows_fresh_flight() {
        let table: FlightTable<u32, String> = FlightTable::new();

        let (first, _) = table.join_or_insert("k", || async { Ok(1) }.boxed());
        assert_eq!(first.await, Ok(1));
        table.remove("k");
        assert_eq!(table.len(), 0);

        let (second, leader) = table.join_or_insert("k", || async { Ok(2) }.boxed());
        assert!(leader);
        assert_eq!(second.await, Ok(2));
    }
}

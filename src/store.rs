//! Status-store backends: the memoization layer the solver reads from and
//! writes to. An abstract contract plus a dict-backed default, generalized
//! here into a trait plus an in-process default implementation.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::error::SylverError;
use crate::status::Status;

/// A stored record for one position: its status and the set of winning
/// replies discovered so far (a union across calls).
#[derive(Debug, Clone, Default)]
pub struct StoredEntry {
    pub status: Status,
    pub replies: HashSet<u64>,
}

/// The contract every persistence backend must satisfy. Identity is by
/// [`crate::position::Position::to_identity`]; callers outside this crate
/// are expected to plug in a store that keys on that canonical string.
pub trait StatusStore {
    /// Looks up the known status of `key`, or `Status::Unknown` if absent.
    fn get_status(&self, key: &str) -> Result<Status, SylverError>;

    /// Saves `status` and unions `replies` into the existing reply set.
    /// A `P` or `N` status, once saved, must never be overwritten with
    /// `Unknown`: implementations enforce this.
    fn save(&self, key: &str, status: Status, replies: &[u64]) -> Result<(), SylverError>;
}

/// The default in-process backend: a mutex-guarded hash map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, StoredEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the replies recorded for `key`, or an empty set if absent.
    pub fn get_replies(&self, key: &str) -> HashSet<u64> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).map(|e| e.replies.clone()))
            .unwrap_or_default()
    }
}

impl StatusStore for MemoryStore {
    fn get_status(&self, key: &str) -> Result<Status, SylverError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| SylverError::BackendError("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).map(|e| e.status).unwrap_or(Status::Unknown))
    }

    fn save(&self, key: &str, status: Status, replies: &[u64]) -> Result<(), SylverError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| SylverError::BackendError("memory store lock poisoned".to_string()))?;
        let entry = entries.entry(key.to_string()).or_default();
        if !matches!(status, Status::Unknown) || matches!(entry.status, Status::Unknown) {
            entry.status = status;
        }
        entry.replies.extend(replies.iter().copied());
        Ok(())
    }
}

/// A backend that stores nothing: every lookup is a miss, every save is a
/// no-op. Useful when a caller wants no memoization overhead at all.
#[derive(Debug, Default)]
pub struct NullStore;

impl StatusStore for NullStore {
    fn get_status(&self, _key: &str) -> Result<Status, SylverError> {
        Ok(Status::Unknown)
    }

    fn save(&self, _key: &str, _status: Status, _replies: &[u64]) -> Result<(), SylverError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_status() {
        let store = MemoryStore::new();
        assert_eq!(store.get_status("{2, 3}").unwrap(), Status::Unknown);
        store.save("{2, 3}", Status::P, &[]).unwrap();
        assert_eq!(store.get_status("{2, 3}").unwrap(), Status::P);
    }

    #[test]
    fn replies_union_across_saves() {
        let store = MemoryStore::new();
        store.save("{4, 6}", Status::N, &[4]).unwrap();
        store.save("{4, 6}", Status::N, &[6]).unwrap();
        let entries = store.entries.lock().unwrap();
        let entry = entries.get("{4, 6}").unwrap();
        assert_eq!(entry.replies, HashSet::from([4, 6]));
    }

    #[test]
    fn resolved_status_is_not_overwritten_by_unknown() {
        let store = MemoryStore::new();
        store.save("{5}", Status::P, &[]).unwrap();
        store.save("{5}", Status::Unknown, &[]).unwrap();
        assert_eq!(store.get_status("{5}").unwrap(), Status::P);
    }

    #[test]
    fn null_store_never_remembers() {
        let store = NullStore;
        store.save("{2, 3}", Status::P, &[1]).unwrap();
        assert_eq!(store.get_status("{2, 3}").unwrap(), Status::Unknown);
    }
}

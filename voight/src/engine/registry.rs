//! Concurrency-safe interview registry with monotonic id allocation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::error::{Error, Result};
use crate::models::Interview;

/// A registered interview behind its own lock.
///
/// Every mutation of one interview's fields goes through this lock, so
/// concurrent callers on the same id serialize instead of racing. Lock order
/// is always registry map first, then entry.
pub type SharedInterview = Arc<Mutex<Interview>>;

/// Owns the id counter and the id → interview map.
///
/// Each registry instance is self-contained; independent instances (one per
/// server, one per test) never share state.
pub struct InterviewRegistry {
    next_id: AtomicU64,
    interviews: RwLock<HashMap<u64, SharedInterview>>,
}

impl InterviewRegistry {
    /// Create an empty registry. Ids start at 1.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            interviews: RwLock::new(HashMap::new()),
        }
    }

    /// Allocate the next id and store a fresh interview under it.
    ///
    /// The increment is the only contended step; the insert under a
    /// just-allocated id can never collide with another caller's.
    pub fn create(&self) -> (u64, SharedInterview) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let interview = Arc::new(Mutex::new(Interview::new(id)));

        self.interviews.write().insert(id, Arc::clone(&interview));

        (id, interview)
    }

    /// Look up an interview by id.
    pub fn get(&self, id: u64) -> Result<SharedInterview> {
        self.interviews
            .read()
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound(id))
    }

    /// Evict an interview, returning it if it existed.
    pub fn remove(&self, id: u64) -> Option<SharedInterview> {
        self.interviews.write().remove(&id)
    }

    /// Replace the entry at `id` with one built from the current occupant.
    ///
    /// Holds the map write lock across the swap, so no other caller can
    /// observe the entry between `f` inspecting the old interview and the
    /// replacement landing.
    pub fn replace_with<F>(&self, id: u64, f: F) -> Result<SharedInterview>
    where
        F: FnOnce(&Interview) -> Result<Interview>,
    {
        let mut interviews = self.interviews.write();

        let current = interviews.get(&id).cloned().ok_or(Error::NotFound(id))?;
        let replacement = Arc::new(Mutex::new(f(&current.lock())?));

        interviews.insert(id, Arc::clone(&replacement));

        Ok(replacement)
    }

    /// All registered interviews, ordered by id.
    pub fn entries(&self) -> Vec<SharedInterview> {
        let interviews = self.interviews.read();
        let mut ids: Vec<u64> = interviews.keys().copied().collect();
        ids.sort_unstable();

        ids.iter()
            .filter_map(|id| interviews.get(id).cloned())
            .collect()
    }

    /// Number of registered interviews.
    pub fn len(&self) -> usize {
        self.interviews.read().len()
    }

    /// Whether the registry holds no interviews.
    pub fn is_empty(&self) -> bool {
        self.interviews.read().is_empty()
    }
}

impl Default for InterviewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InterviewStatus;

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let registry = InterviewRegistry::new();

        let (first, _) = registry.create();
        let (second, _) = registry.create();
        let (third, _) = registry.create();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(third, 3);
    }

    #[test]
    fn test_concurrent_creation_yields_distinct_ids() {
        let registry = Arc::new(InterviewRegistry::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                (0..50).map(|_| registry.create().0).collect::<Vec<u64>>()
            }));
        }

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 400);
        assert_eq!(registry.len(), 400);
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let registry = InterviewRegistry::new();

        let (first, _) = registry.create();
        assert!(registry.remove(first).is_some());

        let (second, _) = registry.create();
        assert!(second > first);
    }

    #[test]
    fn test_get_unknown_id_is_not_found() {
        let registry = InterviewRegistry::new();

        match registry.get(42) {
            Err(Error::NotFound(id)) => assert_eq!(id, 42),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_remove_unknown_id_is_none() {
        let registry = InterviewRegistry::new();
        assert!(registry.remove(9).is_none());
    }

    #[test]
    fn test_replace_with_swaps_the_entry() {
        let registry = InterviewRegistry::new();
        let (id, entry) = registry.create();
        entry.lock().status = InterviewStatus::Finished;

        let replacement = registry
            .replace_with(id, |old| {
                assert_eq!(old.status, InterviewStatus::Finished);
                let mut fresh = Interview::new(old.id);
                fresh.status = InterviewStatus::SelectingPositions;
                Ok(fresh)
            })
            .unwrap();

        assert_eq!(replacement.lock().status, InterviewStatus::SelectingPositions);
        assert_eq!(
            registry.get(id).unwrap().lock().status,
            InterviewStatus::SelectingPositions
        );
    }

    #[test]
    fn test_replace_with_propagates_errors_without_swapping() {
        let registry = InterviewRegistry::new();
        let (id, _) = registry.create();

        let result = registry.replace_with(id, |old| {
            Err(Error::InvalidState {
                id: old.id,
                expected: InterviewStatus::Finished,
                actual: old.status,
            })
        });

        assert!(result.is_err());
        assert_eq!(
            registry.get(id).unwrap().lock().status,
            InterviewStatus::WaitingForConnections
        );
    }

    #[test]
    fn test_entries_are_ordered_by_id() {
        let registry = InterviewRegistry::new();
        registry.create();
        registry.create();
        registry.create();

        let ids: Vec<u64> = registry.entries().iter().map(|e| e.lock().id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}

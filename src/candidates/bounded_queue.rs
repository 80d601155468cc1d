use std::collections::TryReserveError;
use std::vec::IntoIter;

use tracing::error;

use crate::candidates::{CandidateEntry, CandidateSequence};

/// What [`BoundedPriorityQueue::enqueue`] did with the offered entry.
///
/// Both variants mean the entry was accepted for consideration; `Full`
/// additionally reports which entry fell off the top end to keep the
/// queue within capacity. The overflow is the old maximum when the new
/// entry ranks below it, and the new entry itself when it does not.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// The entry was inserted and the queue stayed within capacity.
    Inserted,
    /// The queue was already at capacity; the carried entry is the one
    /// that was evicted to make room.
    Full(CandidateEntry),
}

/// Failures surfaced by queue operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// The storage layer could not grow to hold another entry.
    #[error("candidate queue allocation failed: {0}")]
    OutOfMemory(#[from] TryReserveError),
    /// A dequeue was attempted with no entries held.
    #[error("dequeue on an empty candidate queue")]
    Empty,
}

/// A bounded priority queue that maintains the `capacity` smallest
/// candidate entries seen so far.
///
/// Entries are kept in ascending order, smallest first, under the single
/// ordering on [`CandidateEntry`]: score first, then id as the
/// tie-break. Duplicate entries are retained, each occupying its own
/// slot. When an enqueue would exceed capacity, the largest entry is
/// evicted and handed back through [`EnqueueOutcome::Full`].
///
/// # Insertion Semantics
/// - If not full, the new entry is inserted in sorted order
/// - If full and the new entry is smaller than the current maximum, the
///   maximum is evicted and returned
/// - If full and the new entry ranks at or past the maximum, the new
///   entry itself is the eviction
/// - A capacity of 0 is valid: the queue is permanently empty and full,
///   and every enqueue reports the offered entry as evicted
///
/// # Time Complexity
/// - `enqueue`: O(log k) to locate the slot plus O(k) to shift entries
/// - `peek` / `peek_last` / `min_score` / `max_score`: O(1)
#[derive(Clone)]
pub struct BoundedPriorityQueue {
    sequence: CandidateSequence,
    capacity: usize,
}

impl BoundedPriorityQueue {
    /// Creates a new empty queue bounded at `capacity` entries.
    /// Allocates nothing up front; `capacity == 0` is allowed.
    pub fn new(capacity: usize) -> Self {
        BoundedPriorityQueue {
            sequence: CandidateSequence::new(),
            capacity,
        }
    }

    /// Number of entries currently held. Never exceeds
    /// [`capacity`](Self::capacity).
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// The bound this queue was created with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns `true` if the queue holds `capacity` entries. A
    /// zero-capacity queue is empty and full at the same time.
    pub fn is_full(&self) -> bool {
        self.sequence.len() == self.capacity
    }

    /// Offers `entry` to the queue, keeping the held entries sorted and
    /// within capacity.
    ///
    /// # Returns
    /// `Ok(EnqueueOutcome::Inserted)` when the queue had room, or
    /// `Ok(EnqueueOutcome::Full(evicted))` when an entry had to give way.
    ///
    /// # Errors
    /// [`QueueError::OutOfMemory`] when the storage layer cannot grow;
    /// the queue is left unchanged in that case.
    pub fn enqueue(&mut self, entry: CandidateEntry) -> Result<EnqueueOutcome, QueueError> {
        // 1. find the insertion point that keeps the sequence sorted (O(log k))
        let position = self.sequence.as_slice().partition_point(|held| held < &entry);

        // 2. ordered insert; fails before mutating anything
        self.sequence
            .insert_at(position, entry)
            .inspect_err(|err| error!("enqueue allocation failed: {err}"))?;

        // 3. restore the bound: one entry over capacity means the tail,
        //    the current maximum, is the overflow
        if self.sequence.len() > self.capacity {
            let evicted = self.sequence.remove_at(self.sequence.len() - 1);
            return Ok(EnqueueOutcome::Full(evicted));
        }

        Ok(EnqueueOutcome::Inserted)
    }

    /// Removes and returns the smallest held entry.
    ///
    /// # Errors
    /// [`QueueError::Empty`] when there is nothing to dequeue.
    pub fn dequeue(&mut self) -> Result<CandidateEntry, QueueError> {
        if self.sequence.is_empty() {
            return Err(QueueError::Empty);
        }
        Ok(self.sequence.remove_at(0))
    }

    /// A copy of the smallest held entry, or `None` if empty. The queue
    /// is not modified.
    pub fn peek(&self) -> Option<CandidateEntry> {
        self.sequence.first().copied()
    }

    /// A copy of the largest held entry, or `None` if empty. The queue
    /// is not modified.
    pub fn peek_last(&self) -> Option<CandidateEntry> {
        self.sequence.last().copied()
    }

    /// The smallest held score, or `None` if empty.
    pub fn min_score(&self) -> Option<f64> {
        self.sequence.first().map(|held| held.score.0)
    }

    /// The largest held score, or `None` if empty.
    pub fn max_score(&self) -> Option<f64> {
        self.sequence.last().map(|held| held.score.0)
    }

    /// Drops every held entry. The capacity bound is unchanged and the
    /// queue remains usable.
    pub fn clear(&mut self) {
        self.sequence.clear();
    }

    /// Returns an iterator over the held entries in sorted order
    /// (smallest to largest).
    pub fn iter(&self) -> std::slice::Iter<'_, CandidateEntry> {
        self.sequence.iter()
    }
}

impl IntoIterator for BoundedPriorityQueue {
    type Item = CandidateEntry;
    type IntoIter = IntoIter<CandidateEntry>;

    fn into_iter(self) -> IntoIter<CandidateEntry> {
        self.sequence.into_iter()
    }
}

impl std::fmt::Debug for BoundedPriorityQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedPriorityQueue")
            .field("capacity", &self.capacity)
            .field("entries", &self.sequence.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to create a CandidateEntry quickly
    fn entry(score: f64, id: usize) -> CandidateEntry {
        CandidateEntry::new(score, id)
    }

    #[test]
    fn new_queue_is_empty_and_not_full() {
        let queue = BoundedPriorityQueue::new(3);
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.capacity(), 3);
        assert!(queue.is_empty());
        assert!(!queue.is_full());
        assert_eq!(queue.peek(), None);
        assert_eq!(queue.peek_last(), None);
        assert_eq!(queue.min_score(), None);
        assert_eq!(queue.max_score(), None);
    }

    #[test]
    fn zero_capacity_queue_is_empty_and_full() {
        let mut queue = BoundedPriorityQueue::new(0);
        assert!(queue.is_empty());
        assert!(queue.is_full());

        let outcome = queue.enqueue(entry(1.0, 1)).unwrap();
        assert_eq!(outcome, EnqueueOutcome::Full(entry(1.0, 1)));
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(queue.is_full());
    }

    #[test]
    fn enqueue_keeps_entries_sorted() {
        let mut queue = BoundedPriorityQueue::new(5);
        for &(score, id) in &[(3.0, 3), (1.0, 1), (4.0, 4), (2.0, 2)] {
            assert_eq!(queue.enqueue(entry(score, id)).unwrap(), EnqueueOutcome::Inserted);
        }

        let ids: Vec<usize> = queue.iter().map(|held| held.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(queue.min_score(), Some(1.0));
        assert_eq!(queue.max_score(), Some(4.0));
    }

    #[test]
    fn min_and_max_track_scores_not_insertion_order() {
        let mut queue = BoundedPriorityQueue::new(2);
        queue.enqueue(entry(2.0, 2)).unwrap();
        queue.enqueue(entry(1.0, 2)).unwrap();

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.min_score(), Some(1.0));
        assert_eq!(queue.max_score(), Some(2.0));
        assert_eq!(queue.peek(), Some(entry(1.0, 2)));
        assert_eq!(queue.peek_last(), Some(entry(2.0, 2)));
    }

    #[test]
    fn tie_on_score_breaks_by_id_and_evicts_previous_maximum() {
        let mut queue = BoundedPriorityQueue::new(2);
        queue.enqueue(entry(2.0, 2)).unwrap();
        queue.enqueue(entry(1.0, 2)).unwrap();

        // Same score as the held maximum but a lower id, so it ranks
        // before it and pushes it out.
        let outcome = queue.enqueue(entry(2.0, 1)).unwrap();
        assert_eq!(outcome, EnqueueOutcome::Full(entry(2.0, 2)));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek(), Some(entry(1.0, 2)));
        assert_eq!(queue.peek_last(), Some(entry(2.0, 1)));
        assert_eq!(queue.min_score(), Some(1.0));
        assert_eq!(queue.max_score(), Some(2.0));
    }

    #[test]
    fn eviction_removes_previous_maximum() {
        let mut queue = BoundedPriorityQueue::new(3);
        queue.enqueue(entry(10.0, 1)).unwrap();
        queue.enqueue(entry(20.0, 2)).unwrap();
        queue.enqueue(entry(30.0, 3)).unwrap();
        assert!(queue.is_full());

        let outcome = queue.enqueue(entry(5.0, 4)).unwrap();
        assert_eq!(outcome, EnqueueOutcome::Full(entry(30.0, 3)));

        let ids: Vec<usize> = queue.iter().map(|held| held.id).collect();
        assert_eq!(ids, vec![4, 1, 2]);
    }

    #[test]
    fn eviction_can_reject_the_new_entry() {
        let mut queue = BoundedPriorityQueue::new(2);
        queue.enqueue(entry(1.0, 1)).unwrap();
        queue.enqueue(entry(2.0, 2)).unwrap();

        // Ranks past every held entry, so it is its own overflow.
        let outcome = queue.enqueue(entry(9.0, 9)).unwrap();
        assert_eq!(outcome, EnqueueOutcome::Full(entry(9.0, 9)));

        let ids: Vec<usize> = queue.iter().map(|held| held.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn duplicates_are_retained() {
        let mut queue = BoundedPriorityQueue::new(3);
        queue.enqueue(entry(1.0, 7)).unwrap();
        queue.enqueue(entry(1.0, 7)).unwrap();

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek(), Some(entry(1.0, 7)));
        assert_eq!(queue.peek_last(), Some(entry(1.0, 7)));
    }

    #[test]
    fn capacity_one_keeps_single_smallest() {
        let mut queue = BoundedPriorityQueue::new(1);
        assert_eq!(queue.enqueue(entry(50.0, 1)).unwrap(), EnqueueOutcome::Inserted);
        assert_eq!(
            queue.enqueue(entry(10.0, 2)).unwrap(),
            EnqueueOutcome::Full(entry(50.0, 1))
        );
        assert_eq!(
            queue.enqueue(entry(100.0, 3)).unwrap(),
            EnqueueOutcome::Full(entry(100.0, 3))
        );

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek(), Some(entry(10.0, 2)));
    }

    #[test]
    fn dequeue_returns_entries_in_ascending_order() {
        let mut queue = BoundedPriorityQueue::new(4);
        for &(score, id) in &[(3.0, 1), (1.0, 4), (2.0, 2), (2.0, 1)] {
            queue.enqueue(entry(score, id)).unwrap();
        }

        let drained: Vec<CandidateEntry> = std::iter::from_fn(|| queue.dequeue().ok()).collect();
        assert_eq!(
            drained,
            vec![entry(1.0, 4), entry(2.0, 1), entry(2.0, 2), entry(3.0, 1)]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn interleaved_enqueue_and_dequeue_keep_order() {
        let mut queue = BoundedPriorityQueue::new(3);
        queue.enqueue(entry(5.0, 5)).unwrap();
        queue.enqueue(entry(3.0, 3)).unwrap();

        assert_eq!(queue.dequeue(), Ok(entry(3.0, 3)));

        queue.enqueue(entry(1.0, 1)).unwrap();
        queue.enqueue(entry(4.0, 4)).unwrap();
        let outcome = queue.enqueue(entry(2.0, 2)).unwrap();
        assert_eq!(outcome, EnqueueOutcome::Full(entry(5.0, 5)));

        let ids: Vec<usize> = queue.iter().map(|held| held.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn dequeue_on_empty_reports_empty() {
        let mut queue = BoundedPriorityQueue::new(2);
        assert_eq!(queue.dequeue(), Err(QueueError::Empty));

        // The failed dequeue leaves the queue usable.
        queue.enqueue(entry(1.0, 1)).unwrap();
        assert_eq!(queue.dequeue(), Ok(entry(1.0, 1)));
        assert_eq!(queue.dequeue(), Err(QueueError::Empty));
    }

    #[test]
    fn peek_does_not_mutate() {
        let mut queue = BoundedPriorityQueue::new(2);
        queue.enqueue(entry(1.0, 1)).unwrap();

        assert_eq!(queue.peek(), queue.peek());
        assert_eq!(queue.peek_last(), queue.peek_last());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn clear_preserves_capacity() {
        let mut queue = BoundedPriorityQueue::new(2);
        queue.enqueue(entry(1.0, 1)).unwrap();
        queue.enqueue(entry(2.0, 2)).unwrap();

        queue.clear();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), 2);
        assert_eq!(queue.peek(), None);

        // The bound still applies after a clear.
        queue.enqueue(entry(1.0, 1)).unwrap();
        queue.enqueue(entry(2.0, 2)).unwrap();
        let outcome = queue.enqueue(entry(3.0, 3)).unwrap();
        assert_eq!(outcome, EnqueueOutcome::Full(entry(3.0, 3)));
    }

    #[test]
    fn clone_is_deep_and_independent() {
        let mut original = BoundedPriorityQueue::new(3);
        original.enqueue(entry(1.0, 1)).unwrap();
        original.enqueue(entry(2.0, 2)).unwrap();

        let mut copy = original.clone();
        assert_eq!(copy.capacity(), 3);
        assert_eq!(copy.len(), 2);

        // Draining the original must not touch the copy.
        original.dequeue().unwrap();
        original.dequeue().unwrap();
        assert!(original.is_empty());
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.peek(), Some(entry(1.0, 1)));

        // And the copy evolves on its own.
        copy.enqueue(entry(0.5, 3)).unwrap();
        assert_eq!(copy.len(), 3);
        assert!(original.is_empty());
    }

    #[test]
    fn clone_is_independent_even_for_equal_entries() {
        let mut original = BoundedPriorityQueue::new(2);
        original.enqueue(entry(1.0, 7)).unwrap();
        original.enqueue(entry(1.0, 7)).unwrap();

        let copy = original.clone();
        original.dequeue().unwrap();
        original.dequeue().unwrap();

        assert!(original.is_empty());
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.peek(), Some(entry(1.0, 7)));
        assert_eq!(copy.peek_last(), Some(entry(1.0, 7)));
    }

    #[test]
    fn clone_crosses_threads() {
        let mut queue = BoundedPriorityQueue::new(3);
        queue.enqueue(entry(2.0, 2)).unwrap();
        queue.enqueue(entry(1.0, 1)).unwrap();

        let copy = queue.clone();
        let handle =
            std::thread::spawn(move || copy.into_iter().map(|held| held.id).collect::<Vec<_>>());

        assert_eq!(handle.join().unwrap(), vec![1, 2]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn into_iter_yields_ascending_order() {
        let mut queue = BoundedPriorityQueue::new(3);
        queue.enqueue(entry(3.0, 3)).unwrap();
        queue.enqueue(entry(1.0, 1)).unwrap();
        queue.enqueue(entry(2.0, 2)).unwrap();

        let ids: Vec<usize> = queue.into_iter().map(|held| held.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn allocation_failure_maps_to_out_of_memory() {
        let reserve_err = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        let queue_err = QueueError::from(reserve_err);

        assert!(matches!(queue_err, QueueError::OutOfMemory(_)));
        assert!(queue_err.to_string().contains("allocation failed"));
        assert_eq!(
            QueueError::Empty.to_string(),
            "dequeue on an empty candidate queue"
        );
    }

    #[test]
    fn test_randomized_consistency() {
        use rand::prelude::*;
        let mut rng = StdRng::seed_from_u64(42);

        let k = 50;
        let mut queue = BoundedPriorityQueue::new(k);
        let mut all_entries = Vec::new();

        for id in 0..10_000 {
            let score = rng.random_range(0.0..1000.0);
            let offered = entry(score, id);
            queue.enqueue(offered).unwrap();
            all_entries.push(offered);

            assert!(queue.len() <= k);
            assert!(queue.sequence.as_slice().is_sorted());
        }

        // The "Truth": sort everything seen and keep the first k.
        all_entries.sort();
        all_entries.truncate(k);

        let actual: Vec<CandidateEntry> = queue.into_iter().collect();
        assert_eq!(actual, all_entries);
    }

    #[test]
    fn test_debug() {
        let mut queue = BoundedPriorityQueue::new(2);
        queue.enqueue(entry(1.0, 1)).unwrap();

        let debug_str = format!("{queue:?}");
        assert_eq!(
            debug_str,
            "BoundedPriorityQueue { capacity: 2, entries: [CandidateEntry { score: TotalF64(1.0), id: 1 }] }"
        );
    }
}

use std::collections::TryReserveError;
use std::vec::IntoIter;

use crate::candidates::CandidateEntry;

/// An ordered, duplicate-permitting sequence of candidate entries,
/// addressed by explicit positions.
///
/// This is the storage layer under [`BoundedPriorityQueue`]: it owns
/// copies of the entries it holds, supports insertion before an
/// arbitrary position and removal at a position, and knows nothing about
/// capacity or about the candidate ordering. Callers keep it sorted by
/// choosing insertion positions; the ordering policy lives entirely in
/// the queue. Positions are plain indices, so there is no hidden cursor
/// state to invalidate between calls.
///
/// Growth is fallible: insertion reserves through [`Vec::try_reserve`]
/// and reports allocation failure to the caller instead of aborting the
/// process.
///
/// [`BoundedPriorityQueue`]: crate::candidates::BoundedPriorityQueue
#[derive(Debug, Clone, Default)]
pub struct CandidateSequence {
    entries: Vec<CandidateEntry>,
}

impl CandidateSequence {
    /// Creates an empty sequence. Allocates nothing until the first
    /// insertion.
    pub fn new() -> Self {
        CandidateSequence {
            entries: Vec::new(),
        }
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the sequence holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a copy of `entry` immediately before `position`, shifting
    /// every entry from `position` onward up by one. `position == 0`
    /// inserts before the first entry and `position == len()` appends.
    ///
    /// On allocation failure the sequence is left unchanged.
    ///
    /// # Panics
    /// Panics if `position > len()`.
    pub fn insert_at(
        &mut self,
        position: usize,
        entry: CandidateEntry,
    ) -> Result<(), TryReserveError> {
        assert!(position <= self.entries.len(), "insert position out of bounds");
        self.entries.try_reserve(1)?;
        self.entries.insert(position, entry);
        Ok(())
    }

    /// Removes and returns the entry at `position`, shifting every later
    /// entry down by one.
    ///
    /// # Panics
    /// Panics if `position >= len()`; callers check [`len`](Self::len)
    /// first.
    pub fn remove_at(&mut self, position: usize) -> CandidateEntry {
        self.entries.remove(position)
    }

    /// The entry at the head of the sequence, or `None` if empty. As
    /// long as callers kept the sequence sorted this is the smallest
    /// entry.
    pub fn first(&self) -> Option<&CandidateEntry> {
        self.entries.first()
    }

    /// The entry at the tail of the sequence, or `None` if empty. As
    /// long as callers kept the sequence sorted this is the largest
    /// entry.
    pub fn last(&self) -> Option<&CandidateEntry> {
        self.entries.last()
    }

    /// Drops every held entry; `len()` becomes 0.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The held entries as a slice, in sequence order.
    pub fn as_slice(&self) -> &[CandidateEntry] {
        &self.entries
    }

    /// Iterates the held entries in sequence order.
    pub fn iter(&self) -> std::slice::Iter<'_, CandidateEntry> {
        self.entries.iter()
    }
}

impl IntoIterator for CandidateSequence {
    type Item = CandidateEntry;
    type IntoIter = IntoIter<CandidateEntry>;

    fn into_iter(self) -> IntoIter<CandidateEntry> {
        self.entries.into_iter()
    }
}

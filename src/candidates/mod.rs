//! Candidate management structures for nearest neighbor search.
//!
//! This module provides the data structures for tracking the best
//! candidates seen during a scan: a total ordering over floating-point
//! scores, a position-addressed ordered sequence, and a bounded
//! priority queue that keeps the k smallest entries and reports what it
//! evicts.

mod bounded_queue;
mod candidate_entry;
mod ordered_float;
mod sequence;

pub use bounded_queue::*;
pub use candidate_entry::*;
pub use ordered_float::*;
pub use sequence::*;

//! Performance statistics tracking for search operations.
//!
//! This module provides structures for collecting and aggregating metrics
//! about search runs, including number of searches, points scored, and
//! queue evictions.

mod stats;
pub use stats::*;

//! File system I/O operations for loading point sets.
//!
//! This module provides functionality for loading point sets from disk,
//! supporting NumPy format with row indices used as point identities.

mod points_load;

pub use points_load::*;

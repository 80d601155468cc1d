//! Fixed-dimension points and the squared distance that scores them.

mod point;

pub use point::*;

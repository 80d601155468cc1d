//! Nearest-neighbor search over point sets, built on the bounded
//! candidate queue.

mod knn;

pub use knn::*;

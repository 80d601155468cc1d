pub mod candidates;
pub mod fs;
pub mod points;
pub mod search;
pub mod statistics;

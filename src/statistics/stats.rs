use serde::Serialize;

/// Counters recorded while running nearest-neighbor searches.
///
/// Workers keep a private `Stats` each and the results get merged once
/// the threads are joined, so none of this needs atomics.
#[derive(Serialize)]
pub struct Stats {
    searches_run: usize,
    points_scored: usize,
    evictions: usize,
}

impl Stats {
    pub fn new() -> Self {
        Stats {
            searches_run: 0,
            points_scored: 0,
            evictions: 0,
        }
    }

    /// Record into the statistics object that a new search has been performed
    pub fn bump_searches(&mut self) {
        self.searches_run += 1
    }

    /// Record into the statistics object that a bunch of points were scored
    /// against a query
    pub fn bump_scored(&mut self, point_amount: usize) {
        self.points_scored += point_amount
    }

    /// Record into the statistics object that the candidate queue pushed an
    /// entry out to stay within capacity
    pub fn bump_evictions(&mut self) {
        self.evictions += 1
    }

    pub fn get_searches_run(&self) -> usize {
        self.searches_run
    }

    pub fn get_points_scored(&self) -> usize {
        self.points_scored
    }

    pub fn get_evictions(&self) -> usize {
        self.evictions
    }

    /// Combine two stats objects, typically one per worker thread, into
    /// their sum.
    pub fn merge(&self, other: &Stats) -> Stats {
        Stats {
            searches_run: self.searches_run + other.searches_run,
            points_scored: self.points_scored + other.points_scored,
            evictions: self.evictions + other.evictions,
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Stats::new()
    }
}

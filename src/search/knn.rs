use crate::{
    candidates::{BoundedPriorityQueue, CandidateEntry, EnqueueOutcome, QueueError},
    points::Point,
    statistics::Stats,
};

/// Performs an exact nearest-neighbor scan over `points`.
///
/// Every point is scored against `query` with the squared L2 distance
/// and offered to a bounded priority queue of capacity `k`. The queue
/// keeps the `k` smallest entries seen so far and reports everything it
/// pushes out, so the scan is a single pass with no rerank step.
///
/// # Parameters
/// - `points`: The set to search.
/// - `query`: Target point.
/// - `k`: Number of nearest neighbors desired.
/// - `stats`: Counter sink for searches, scored points and evictions.
///
/// # Returns
/// At most `k` entries ascending by (score, id); fewer when the point
/// set itself holds fewer than `k` points.
///
/// # Errors
/// [`QueueError::OutOfMemory`] if candidate storage cannot grow.
///
/// # Panics
/// Panics if any point's dimension differs from the query's.
pub fn k_nearest(
    points: &[Point],
    query: &Point,
    k: usize,
    stats: &mut Stats,
) -> Result<Vec<CandidateEntry>, QueueError> {
    let mut candidates = BoundedPriorityQueue::new(k);

    stats.bump_searches();
    stats.bump_scored(points.len());

    for point in points {
        // every point gets offered; the queue hangs on to the k best and
        // tells us whenever something falls off the top end
        if let EnqueueOutcome::Full(_) = candidates.enqueue(point.scored_against(query))? {
            stats.bump_evictions();
        }
    }

    Ok(candidates.into_iter().collect())
}

use crate::candidates::TotalF64;

/// One scored item competing for a slot in a bounded candidate queue:
/// a score (typically the squared distance to a query point) plus the
/// identity of the point that produced it.
///
/// Entries are plain `Copy` values. They are copied whenever they cross
/// into or out of a queue, never aliased, so a caller-held entry and a
/// queue-held one can never observe each other. Two entries are equal
/// iff both fields are equal (score equality is bitwise, see
/// [`TotalF64`]).
///
/// The `Ord` impl below is the single ordering relation the queue uses
/// for insertion positions and for picking what to evict: ascending
/// score, ties broken by ascending id. The smallest entry survives
/// longest; the largest is the first evicted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    /// Score of this candidate, usually a squared L2 distance.
    pub score: TotalF64,

    /// Identity of the point this score belongs to.
    pub id: usize,
}

impl CandidateEntry {
    pub fn new(score: f64, id: usize) -> Self {
        CandidateEntry {
            score: score.into(),
            id,
        }
    }
}

impl PartialOrd for CandidateEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CandidateEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.score.cmp(&other.score).then(self.id.cmp(&other.id))
    }
}

use std::cmp::Ordering;

/// A wrapper around f64 that provides total ordering and bitwise equality.
///
/// Standard f64 does not implement `Ord` or `Eq` because of NaN values and
/// signed zeros. This wrapper compares through `f64::total_cmp`, so every
/// pair of scores is ordered: NaN sorts above positive infinity and `-0.0`
/// sorts just below `+0.0`. Equality follows the same bit-level view, which
/// means `TotalF64(f64::NAN) == TotalF64(f64::NAN)` while
/// `TotalF64(0.0) != TotalF64(-0.0)`.
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct TotalF64(pub f64);

impl PartialEq for TotalF64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Allow implicit promotion from f64 → TotalF64
impl From<f64> for TotalF64 {
    fn from(x: f64) -> Self {
        TotalF64(x)
    }
}

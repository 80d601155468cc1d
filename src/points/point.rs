use crate::candidates::CandidateEntry;

/// A point in d-dimensional space with a stable identity.
///
/// The dimension is fixed when the point is created and the coordinates
/// are never mutated afterwards, so every distance computed against the
/// same pair of points yields the same value. Copying via `Clone` is
/// deep: the copy owns its own coordinate storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    id: usize,
    coords: Box<[f64]>,
}

impl Point {
    /// Creates a point with the given identity and coordinates.
    ///
    /// # Panics
    /// Panics if `coords` is empty; a zero-dimensional point cannot be
    /// scored against anything.
    pub fn new(id: usize, coords: Vec<f64>) -> Self {
        assert!(!coords.is_empty(), "a point needs at least one coordinate");
        Point {
            id,
            coords: coords.into_boxed_slice(),
        }
    }

    /// The identity carried into candidate entries scored from this point.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Number of coordinates.
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// The coordinates, in axis order.
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Computes the **squared** L2 distance to `other`:
    ///
    /// ```text
    /// L2^2(x, y) = Σ_i (x[i] - y[i]) ** 2
    /// ```
    ///
    /// This is typically useful when comparing two distances:
    ///
    /// dist(u,v) < dist(w,x) ⇔ dist(u,v) ** 2 < dist(w,x) ** 2
    ///
    /// We are usually interested in the left side of the equivalence,
    /// but the right side is slightly cheaper to compute.
    ///
    /// # Panics
    /// Panics if the two points have different dimensions
    pub fn l2_squared(&self, other: &Point) -> f64 {
        assert_eq!(self.coords.len(), other.coords.len());

        self.coords
            .iter()
            .zip(other.coords.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    /// Scores this point against `query` and wraps the result in a
    /// [`CandidateEntry`] carrying this point's identity.
    pub fn scored_against(&self, query: &Point) -> CandidateEntry {
        CandidateEntry::new(self.l2_squared(query), self.id)
    }
}

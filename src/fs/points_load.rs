use crate::points::Point;

/// Loading of point sets from disk. Implemented on the collection the
/// searches run over; row index becomes point identity.
pub trait PointSet {
    fn load_from_npy(path: &str) -> Self;
}

impl PointSet for Vec<Point> {
    fn load_from_npy(path: &str) -> Self {
        let bytes = std::fs::read(path).unwrap();
        let npy = npyz::NpyFile::new(&bytes[..]).unwrap();
        assert!(npy.shape().len() == 2);
        let (rows, dim) = (npy.shape()[0] as usize, npy.shape()[1] as usize);

        let mut iter = npy.data::<f64>().unwrap();
        let mut result = Vec::with_capacity(rows);
        for id in 0..rows {
            let mut coords = Vec::with_capacity(dim);
            for _ in 0..dim {
                coords.push(iter.next().unwrap().unwrap());
            }
            result.push(Point::new(id, coords));
        }

        result
    }
}

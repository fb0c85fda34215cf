use nalgebra::Vector2;
use ndarray::{Array1, ArrayView2};

pub struct Utility {}

impl Utility {
    #[inline]
    pub fn row_vector(positions: &ArrayView2<f64>, i: usize) -> Vector2<f64> {
        Vector2::new(positions[(i, 0)], positions[(i, 1)])
    }

    /// 相邻两点的欧氏距离，第 0 个为 0
    pub fn consecutive_dists(positions: &ArrayView2<f64>) -> Array1<f64> {
        let n = positions.nrows();
        let mut dists = Array1::<f64>::zeros(n);
        for i in 1..n {
            dists[i] = (Self::row_vector(positions, i) - Self::row_vector(positions, i - 1)).norm();
        }
        dists
    }

    /// 累计和，`cumsum[0] = dists[0]`
    pub fn cumsum(dists: &Array1<f64>) -> Array1<f64> {
        let mut acc = 0.0;
        dists
            .iter()
            .map(|d| {
                acc += d;
                acc
            })
            .collect()
    }
}

#[test]
fn test_consecutive_dists() {
    let positions = ndarray::array![[0.0, 0.0], [3.0, 4.0], [3.0, 5.0]];
    let dists = Utility::consecutive_dists(&positions.view());
    assert_eq!(dists, ndarray::array![0.0, 5.0, 1.0]);
    assert_eq!(Utility::cumsum(&dists), ndarray::array![0.0, 5.0, 6.0]);
}

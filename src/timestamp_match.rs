//! 最近时间戳匹配
//!
//! 位置日志和图像日志各自打时间戳，为每个图像时间戳找到时间最近的位姿。

use ndarray::{Array2, ArrayView1, Axis};
use serde::Serialize;

use crate::error::{Result, SplitError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// 逐个扫描，省内存
    #[default]
    DirectScan,
    /// 一次性构造 |R| x |Q| 的差值矩阵，占内存
    DistanceMatrix,
}

/// 第一个最小值的位置
fn argmin<I: IntoIterator<Item = f64>>(values: I) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.into_iter().enumerate() {
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// 对 `query` 中每个时间戳返回 `reference` 中时间差最小的索引，相同时取靠前的。
pub fn closest_indices(
    reference: ArrayView1<f64>,
    query: ArrayView1<f64>,
    strategy: MatchStrategy,
) -> Result<Vec<usize>> {
    if reference.is_empty() {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        return Err(SplitError::InputShape(
            "reference timestamps are empty".to_string(),
        ));
    }

    let inds = match strategy {
        MatchStrategy::DirectScan => query
            .iter()
            .filter_map(|&q| argmin(reference.iter().map(|&r| (r - q).abs())))
            .collect(),
        MatchStrategy::DistanceMatrix => {
            let diff = Array2::from_shape_fn((reference.len(), query.len()), |(i, j)| {
                (reference[i] - query[j]).abs()
            });
            diff.axis_iter(Axis(1))
                .filter_map(|col| argmin(col.iter().copied()))
                .collect()
        }
    };
    Ok(inds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_nearest() {
        let poses = array![0.0, 10.0, 20.0, 30.0];
        let imgs = array![-5.0, 4.0, 16.0, 29.0, 100.0];
        for strategy in [MatchStrategy::DirectScan, MatchStrategy::DistanceMatrix] {
            let inds = closest_indices(poses.view(), imgs.view(), strategy).unwrap();
            assert_eq!(inds, vec![0, 0, 2, 3, 3]);
        }
    }

    #[test]
    fn test_tie_takes_first() {
        let poses = array![0.0, 10.0, 10.0, 20.0];
        let imgs = array![5.0, 10.0, 15.0];
        for strategy in [MatchStrategy::DirectScan, MatchStrategy::DistanceMatrix] {
            let inds = closest_indices(poses.view(), imgs.view(), strategy).unwrap();
            assert_eq!(inds, vec![0, 1, 1]);
        }
    }

    #[test]
    fn test_strategies_agree() {
        // 微秒时间戳，两个时钟有偏移
        let poses: ndarray::Array1<f64> = (0..500).map(|i| 1.4e15 + i as f64 * 20_000.0).collect();
        let imgs: ndarray::Array1<f64> = (0..120).map(|i| 1.4e15 + 3_333.0 + i as f64 * 66_667.0).collect();
        let a = closest_indices(poses.view(), imgs.view(), MatchStrategy::DirectScan).unwrap();
        let b = closest_indices(poses.view(), imgs.view(), MatchStrategy::DistanceMatrix).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 120);
    }

    #[test]
    fn test_empty_reference() {
        let empty = ndarray::Array1::<f64>::zeros(0);
        let imgs = array![1.0];
        assert!(matches!(
            closest_indices(empty.view(), imgs.view(), MatchStrategy::DirectScan),
            Err(SplitError::InputShape(_))
        ));
        assert!(closest_indices(empty.view(), empty.view(), MatchStrategy::DirectScan)
            .unwrap()
            .is_empty());
    }
}

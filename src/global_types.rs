//! 全局类型
//!
//! 轨迹 [Traverse] 与索引集合 [IndexSet]

use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::Serialize;

use crate::error::{Result, SplitError};

/// 严格递增的索引集合，用于表示采样结果和数据集划分
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IndexSet(Vec<usize>);

impl IndexSet {
    /// 排序并去重
    pub fn from_unsorted(mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self(indices)
    }

    /// 取出 mask 中为 true 的位置
    pub fn from_mask<I: IntoIterator<Item = bool>>(mask: I) -> Self {
        Self(
            mask.into_iter()
                .enumerate()
                .filter(|(_, keep)| *keep)
                .map(|(i, _)| i)
                .collect(),
        )
    }

    /// 0..n
    pub fn full(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// 并集，结果仍然严格递增
    pub fn union(&self, other: &IndexSet) -> IndexSet {
        let (a, b) = (&self.0, &other.0);
        let mut out = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => {
                    out.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    out.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&a[i..]);
        out.extend_from_slice(&b[j..]);
        IndexSet(out)
    }

    #[cfg(test)]
    pub fn intersection(&self, other: &IndexSet) -> IndexSet {
        IndexSet(
            self.0
                .iter()
                .copied()
                .filter(|i| other.contains(*i))
                .collect(),
        )
    }

    /// 把相对 `base` 的索引换算回 `base` 所指向的原始序列
    pub fn compose(&self, base: &IndexSet) -> IndexSet {
        IndexSet(self.0.iter().map(|&i| base.0[i]).collect())
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.binary_search(&index).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

}

/// 位置数组必须是 (N, 2)
pub fn check_positions(positions: &ArrayView2<f64>) -> Result<()> {
    if positions.ncols() != 2 {
        return Err(SplitError::InputShape(format!(
            "positions must have 2 columns, got {}",
            positions.ncols()
        )));
    }
    Ok(())
}

/// 一次完整的行驶记录: 时间戳 + (northing, easting)
#[derive(Debug, Clone, PartialEq)]
pub struct Traverse {
    pub timestamps: Array1<f64>,
    pub positions: Array2<f64>,
}

impl Traverse {
    pub fn new(timestamps: Array1<f64>, positions: Array2<f64>) -> Result<Self> {
        check_positions(&positions.view())?;
        if timestamps.len() != positions.nrows() {
            return Err(SplitError::InputShape(format!(
                "{} timestamps for {} positions",
                timestamps.len(),
                positions.nrows()
            )));
        }
        if let Some(index) = timestamps
            .windows(2)
            .into_iter()
            .position(|w| w[1] < w[0])
        {
            return Err(SplitError::UnorderedTimestamps { index: index + 1 });
        }
        Ok(Self {
            timestamps,
            positions,
        })
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[cfg(test)]
    pub fn position(&self, index: usize) -> nalgebra::Vector2<f64> {
        let row = self.positions.row(index);
        nalgebra::Vector2::new(row[0], row[1])
    }

    /// 按索引切片，时间戳和位置同步
    pub fn select(&self, indices: &IndexSet) -> Traverse {
        Traverse {
            timestamps: self.timestamps.select(Axis(0), indices.as_slice()),
            positions: self.positions.select(Axis(0), indices.as_slice()),
        }
    }
}

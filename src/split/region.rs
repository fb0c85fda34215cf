use nalgebra::Vector2;
use ndarray::ArrayView2;

use crate::global_types::IndexSet;
use crate::utility::Utility;

/// 划分区域：中心点 + 半径
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRegion {
    pub name: &'static str,
    pub center: Vector2<f64>,
    pub radius: f64,
}

impl ReferenceRegion {
    pub fn new(name: &'static str, center: [f64; 2], radius: f64) -> Self {
        Self {
            name,
            center: Vector2::new(center[0], center[1]),
            radius,
        }
    }

    /// 盒子测试：两个轴上 |p - c| 都不超过 `radius + delta`。
    ///
    /// 不是圆形距离，划分结果依赖这一点。
    #[inline]
    pub fn contains(&self, p: &Vector2<f64>, delta: f64) -> bool {
        let thresh = self.radius + delta;
        (p - self.center).abs().iter().all(|&d| d <= thresh)
    }

    /// 收缩 `offset` 后的区域内的点
    pub fn shrunk(&self, positions: &ArrayView2<f64>, offset: f64) -> IndexSet {
        self.members(positions, -offset)
    }

    /// 扩张 `offset` 后的区域内的点
    pub fn grown(&self, positions: &ArrayView2<f64>, offset: f64) -> IndexSet {
        self.members(positions, offset)
    }

    fn members(&self, positions: &ArrayView2<f64>, delta: f64) -> IndexSet {
        let inds = IndexSet::from_mask(
            (0..positions.nrows()).map(|i| self.contains(&Utility::row_vector(positions, i), delta)),
        );
        log::trace!(
            "{} (radius {:+}): {} of {}",
            self.name,
            delta,
            inds.len(),
            positions.nrows()
        );
        inds
    }
}

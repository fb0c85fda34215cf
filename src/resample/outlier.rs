use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::Serialize;

use crate::error::Result;
use crate::global_types::{check_positions, IndexSet};
use crate::utility::Utility;

/// 剔除跳变点的统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    /// 剔除前总里程
    pub total_dist_before: f64,
    /// 剔除后重新计算的总里程
    pub total_dist_after: f64,
    /// 被剔除点在原序列中的索引
    pub removed: IndexSet,
    /// 保留点在原序列中的索引
    pub kept: IndexSet,
}

#[derive(Debug, Clone)]
pub struct FilteredPositions {
    pub positions: Array2<f64>,
    /// 剔除后重新计算的相邻距离
    pub dists: Array1<f64>,
    pub report: OutlierReport,
}

/// 与前一点距离大于 `threshold` 的点认为是定位跳变，删除。
///
/// 只过一遍：距离在原序列上计算，删除后不再重复检查。
pub fn filter_outliers(positions: ArrayView2<f64>, threshold: f64) -> Result<FilteredPositions> {
    check_positions(&positions)?;
    let dists = Utility::consecutive_dists(&positions);
    let is_outlier: Vec<bool> = dists.iter().map(|&d| d > threshold).collect();

    let removed = IndexSet::from_mask(is_outlier.iter().copied());
    let kept = IndexSet::from_mask(is_outlier.iter().map(|o| !o));

    let filtered = positions.select(Axis(0), kept.as_slice());
    let filtered_dists = Utility::consecutive_dists(&filtered.view());

    let report = OutlierReport {
        total_dist_before: dists.sum(),
        total_dist_after: filtered_dists.sum(),
        removed,
        kept,
    };
    log::info!(
        "Total traversal distance: {:.3} km",
        report.total_dist_before / 1e3
    );
    log::info!("Removed indices: {}", report.removed.len());
    if !report.removed.is_empty() {
        log::debug!("{:?}", report.removed.as_slice());
    }
    log::info!(
        "Total traversal distance post removal: {:.3} km",
        report.total_dist_after / 1e3
    );

    Ok(FilteredPositions {
        positions: filtered,
        dists: filtered_dists,
        report,
    })
}

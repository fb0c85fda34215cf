//! 轨迹重采样
//!
//! 把按时间采集、间距不均匀的位置序列变成沿路径近似等间距的子序列。

mod outlier;

pub use outlier::{filter_outliers, OutlierReport};

use ndarray::{Array1, ArrayView2};

use crate::config::OUTLIER_DIST;
use crate::error::{Result, SplitError};
use crate::global_types::{check_positions, IndexSet};
use crate::utility::Utility;

/// 速度归一化采样结果
#[derive(Debug, Clone)]
pub struct SpeedNormalized {
    /// 换算回原始序列的索引
    pub original_inds: IndexSet,
    pub report: OutlierReport,
}

/// 在累计距离曲线上对 `target` 做线性插值，返回小数索引。
///
/// 累计距离有平台（零位移）时取平台的最后一个索引；超出末端取最后一个索引。
fn interp_index(cum: &[f64], target: f64) -> f64 {
    let last = cum.len() - 1;
    let j = cum.partition_point(|&c| c <= target).saturating_sub(1);
    if j == last || cum[j] == target {
        return j as f64;
    }
    j as f64 + (target - cum[j]) / (cum[j + 1] - cum[j])
}

/// 对已经剔除跳变的位置序列按固定间距 `fixed_dist` 重采样
pub fn resample_by_distance(positions: ArrayView2<f64>, fixed_dist: f64) -> Result<IndexSet> {
    check_positions(&positions)?;
    resample_dists(&Utility::consecutive_dists(&positions), fixed_dist)
}

/// 由相邻距离 (`dists[0] = 0`) 计算重采样索引
fn resample_dists(dists: &Array1<f64>, fixed_dist: f64) -> Result<IndexSet> {
    if !(fixed_dist.is_finite() && fixed_dist > 0.0) {
        return Err(SplitError::InvalidSampleDistance(fixed_dist));
    }
    let cum = Utility::cumsum(dists);
    let total_dist = dists.sum();
    if !(total_dist > 0.0) {
        return Err(SplitError::DegenerateTraverse {
            total_length: total_dist,
        });
    }
    let cum = cum.as_slice().ok_or_else(|| {
        SplitError::InputShape("cumulative distances are not contiguous".to_string())
    })?;

    // 目标距离 0, d, 2d, ... <= total
    let n_targets = (total_dist / fixed_dist).floor() as usize;
    let inds: Vec<usize> = (0..=n_targets)
        .map(|k| k as f64 * fixed_dist)
        .take_while(|&t| t <= total_dist)
        .map(|t| interp_index(cum, t).round_ties_even() as usize)
        .collect();
    let n_raw = inds.len();
    let unique = IndexSet::from_unsorted(inds);

    log::info!(
        "{} remaining after speed normalization out of {}",
        n_raw,
        dists.len()
    );
    log::info!("Unique indices: {}", unique.len());
    Ok(unique)
}

/// 剔除跳变点后按距离重采样
pub fn speed_normalized_indices(
    positions: ArrayView2<f64>,
    fixed_dist: f64,
) -> Result<SpeedNormalized> {
    let filtered = filter_outliers(positions, OUTLIER_DIST)?;
    let filtered_inds = resample_dists(&filtered.dists, fixed_dist)?;
    let original_inds = filtered_inds.compose(&filtered.report.kept);
    log::debug!(
        "{} of {} filtered frames kept",
        filtered_inds.len(),
        filtered.positions.nrows()
    );
    Ok(SpeedNormalized {
        original_inds,
        report: filtered.report,
    })
}

/// 每隔 `step` 帧取一帧，`step` 必须是正整数
pub fn frame_indices(n: usize, step: f64) -> Result<IndexSet> {
    if !(step.is_finite() && step >= 1.0 && step.fract() == 0.0) {
        return Err(SplitError::InvalidSampleDistance(step));
    }
    Ok(IndexSet::from_unsorted(
        (0..n).step_by(step as usize).collect(),
    ))
}

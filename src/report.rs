//! 划分结果汇总
//!
//! 只在命令行要求时调用，核心算法本身不输出任何东西。

use ndarray::ArrayView2;

use crate::error::Result;
use crate::split::{SplitName, SplitPolicy, SplitVersion};
use crate::utility::Utility;

/// 相邻帧间距统计
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpacingStats {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitSummary {
    pub version: SplitVersion,
    pub total: usize,
    pub counts: Vec<(SplitName, usize)>,
    pub spacing: SpacingStats,
}

impl SplitSummary {
    pub fn compute(positions: ArrayView2<f64>, version: SplitVersion) -> Result<Self> {
        let policy = SplitPolicy::new(version);
        let mut counts = Vec::new();
        for split in [SplitName::Train, SplitName::Val, SplitName::Test] {
            counts.push((split, policy.split_indices(positions, split)?.len()));
        }

        let dists = Utility::consecutive_dists(&positions);
        let spacing = if dists.len() > 1 {
            let gaps = dists.slice(ndarray::s![1..]);
            SpacingStats {
                min: gaps.fold(f64::INFINITY, |m, &v| m.min(v)),
                mean: gaps.mean().unwrap_or_default(),
                max: gaps.fold(0.0, |m, &v| m.max(v)),
            }
        } else {
            SpacingStats::default()
        };

        Ok(Self {
            version,
            total: positions.nrows(),
            counts,
            spacing,
        })
    }
}

pub trait SplitReporter {
    fn report(&mut self, summary: &SplitSummary);
}

/// 写到日志
#[derive(Debug, Default)]
pub struct LogReporter;

impl SplitReporter for LogReporter {
    fn report(&mut self, summary: &SplitSummary) {
        log::info!("Data splits ({}), {} frames", summary.version, summary.total);
        for (split, count) in summary.counts.iter() {
            log::info!("  {:>5}: {}", split.as_str(), count);
        }
        log::info!(
            "Distance between consecutive frames (m): min {:.3}, mean {:.3}, max {:.3}",
            summary.spacing.min,
            summary.spacing.mean,
            summary.spacing.max
        );
    }
}

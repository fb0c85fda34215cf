#![allow(dead_code)]

use serde::Serialize;

use crate::split::{SplitName, SplitVersion};
use crate::timestamp_match::MatchStrategy;

/// 相邻两帧距离超过该值（米）视为定位跳变，直接剔除
pub const OUTLIER_DIST: f64 = 10.0;
/// 默认的最小采样间距（米）
pub const DEFAULT_SAMPLE_DIST: f64 = 0.01;

/// 非训练集区域收缩量
pub const OFFSET_NON_TRAIN: f64 = 10.0;
/// 训练集排除区域扩张量，保证训练集不会贴着验证/测试区域
pub const OFFSET_TRAIN: f64 = 30.0;

/// v2.1 验证集区域中心 (northing, easting)
pub const VAL_CORD_V21: [f64; 2] = [5735158.209064, 619861.387519];
pub const VAL_RAD_V21: f64 = 150.0;
/// v2.2 验证集区域中心
pub const VAL_CORD_V22: [f64; 2] = [5735298.209064, 619751.387519];
pub const VAL_RAD_V22: f64 = 270.0;
/// 测试集区域，两个版本相同
pub const TEST_CORD: [f64; 2] = [5734776.164594, 619832.666353];
pub const TEST_RAD: f64 = 260.0;

/// 采样方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SamplingType {
    /// 按行驶距离等间隔采样
    #[default]
    Odom,
    /// 每隔固定帧数取一帧
    Frame,
}

/// 一次运行的全部可选配置
#[derive(Debug, Clone, Serialize)]
pub struct SplitConfig {
    pub split: Option<SplitName>,
    pub version: SplitVersion,
    /// odom: 采样间距（米）; frame: 帧步长
    pub sample_dist: f64,
    pub sampling: SamplingType,
    pub match_strategy: MatchStrategy,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            split: None,
            version: SplitVersion::default(),
            sample_dist: DEFAULT_SAMPLE_DIST,
            sampling: SamplingType::default(),
            match_strategy: MatchStrategy::default(),
        }
    }
}

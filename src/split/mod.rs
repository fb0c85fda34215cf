//! 数据集划分
//!
//! 根据与固定参考点的距离把每一帧分到 train / val / test。
//! 训练集的排除区域比验证/测试区域大，避免地理上的泄漏。

mod region;

pub use region::ReferenceRegion;

use std::fmt::Display;
use std::str::FromStr;

use ndarray::ArrayView2;
use serde::Serialize;

use crate::config::*;
use crate::error::{Result, SplitError};
use crate::global_types::{check_positions, IndexSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
pub enum SplitName {
    #[serde(rename = "train")]
    #[value(name = "train")]
    Train,
    #[serde(rename = "val")]
    #[value(name = "val")]
    Val,
    #[serde(rename = "test")]
    #[value(name = "test")]
    Test,
    #[serde(rename = "val+test")]
    #[value(name = "val+test")]
    ValTest,
    /// 整条轨迹
    #[serde(rename = "valFull")]
    #[value(name = "valFull")]
    ValFull,
}

impl SplitName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitName::Train => "train",
            SplitName::Val => "val",
            SplitName::Test => "test",
            SplitName::ValTest => "val+test",
            SplitName::ValFull => "valFull",
        }
    }
}

impl Display for SplitName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SplitName {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "train" => Ok(SplitName::Train),
            "val" => Ok(SplitName::Val),
            "test" => Ok(SplitName::Test),
            "val+test" => Ok(SplitName::ValTest),
            "valFull" => Ok(SplitName::ValFull),
            _ => Err(SplitError::UnsupportedSplit {
                split: s.to_string(),
                version: "*".to_string(),
            }),
        }
    }
}

/// 划分策略版本
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, clap::ValueEnum,
)]
pub enum SplitVersion {
    #[default]
    #[serde(rename = "v2.1")]
    #[value(name = "v2.1")]
    V21,
    /// test 与 val 相同
    #[serde(rename = "v2.2")]
    #[value(name = "v2.2")]
    V22,
}

impl SplitVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitVersion::V21 => "v2.1",
            SplitVersion::V22 => "v2.2",
        }
    }
}

impl Display for SplitVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SplitVersion {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "v2.1" => Ok(SplitVersion::V21),
            "v2.2" => Ok(SplitVersion::V22),
            _ => Err(SplitError::UnsupportedSplit {
                split: "*".to_string(),
                version: s.to_string(),
            }),
        }
    }
}

/// 某个版本下的参考区域与边距
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPolicy {
    pub version: SplitVersion,
    pub val: ReferenceRegion,
    pub test: ReferenceRegion,
    /// 验证/测试区域收缩量
    pub offset_non_train: f64,
    /// 训练集排除区域扩张量
    pub offset_train: f64,
}

impl SplitPolicy {
    pub fn new(version: SplitVersion) -> Self {
        let val = match version {
            SplitVersion::V21 => ReferenceRegion::new("val", VAL_CORD_V21, VAL_RAD_V21),
            SplitVersion::V22 => ReferenceRegion::new("val", VAL_CORD_V22, VAL_RAD_V22),
        };
        Self {
            version,
            val,
            test: ReferenceRegion::new("test", TEST_CORD, TEST_RAD),
            offset_non_train: OFFSET_NON_TRAIN,
            offset_train: OFFSET_TRAIN,
        }
    }

    /// 训练集不能出现的点：扩张后的 val ∪ 扩张后的 test
    pub fn train_exclusion(&self, positions: &ArrayView2<f64>) -> IndexSet {
        self.val
            .grown(positions, self.offset_train)
            .union(&self.test.grown(positions, self.offset_train))
    }

    fn train(&self, positions: &ArrayView2<f64>) -> IndexSet {
        let excluded = self.train_exclusion(positions);
        IndexSet::from_mask((0..positions.nrows()).map(|i| !excluded.contains(i)))
    }

    /// 收缩的 val ∪ 扩张的 test
    fn val_shrunk_test_grown(&self, positions: &ArrayView2<f64>) -> IndexSet {
        self.val
            .shrunk(positions, self.offset_non_train)
            .union(&self.test.grown(positions, self.offset_train))
    }

    pub fn split_indices(&self, positions: ArrayView2<f64>, split: SplitName) -> Result<IndexSet> {
        check_positions(&positions)?;
        let inds = match (self.version, split) {
            (_, SplitName::Train) => self.train(&positions),
            (SplitVersion::V21, SplitName::Val) => {
                self.val.shrunk(&positions, self.offset_non_train)
            }
            (SplitVersion::V21, SplitName::Test) => {
                self.test.shrunk(&positions, self.offset_non_train)
            }
            (SplitVersion::V21, SplitName::ValTest) => self.val_shrunk_test_grown(&positions),
            (SplitVersion::V22, SplitName::Val | SplitName::Test) => {
                self.val_shrunk_test_grown(&positions)
            }
            (SplitVersion::V22, SplitName::ValFull) => IndexSet::full(positions.nrows()),
            (version, split) => {
                return Err(SplitError::UnsupportedSplit {
                    split: split.to_string(),
                    version: version.to_string(),
                })
            }
        };
        log::debug!("{} / {}: {} samples", self.version, split, inds.len());
        Ok(inds)
    }
}

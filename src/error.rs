//! 核心算法的错误类型

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    /// 轨迹总长度为零，无法按距离插值
    #[error("degenerate traverse: total path length is {total_length}")]
    DegenerateTraverse { total_length: f64 },

    #[error("unsupported split `{split}` for version `{version}`")]
    UnsupportedSplit { split: String, version: String },

    #[error("input shape error: {0}")]
    InputShape(String),

    #[error("sample distance must be positive and finite, got {0}")]
    InvalidSampleDistance(f64),

    #[error("timestamps decrease at index {index}")]
    UnorderedTimestamps { index: usize },
}

pub type Result<T> = std::result::Result<T, SplitError>;

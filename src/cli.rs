use clap::Parser;

use crate::config::{SamplingType, SplitConfig, DEFAULT_SAMPLE_DIST};
use crate::split::{SplitName, SplitVersion};
use crate::timestamp_match::MatchStrategy;

/// Subsample Oxford Traverse and Obtain Splits
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path where raw data is stored
    #[arg(short = 'p', long)]
    pub data_path: String,

    /// Timestamp id of the traverse, e.g. 2015-10-29-12-18-17
    #[arg(short, long)]
    pub traverse_id: String,

    /// Type of camera, e.g. stereo/left
    #[arg(short, long, default_value = "stereo")]
    pub camera: String,

    /// Split to extract (test and val are the same in v2.2)
    #[arg(short, long, value_enum)]
    pub split: Option<SplitName>,

    /// Minimum distance between consecutive images (frame step for --sampling frame)
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_DIST)]
    pub offset: f64,

    /// Split policy version
    #[arg(long, value_enum, default_value_t = SplitVersion::V21)]
    pub version_policy: SplitVersion,

    #[arg(long, value_enum, default_value_t = SamplingType::Odom)]
    pub sampling: SamplingType,

    /// Nearest timestamp search strategy
    #[arg(long, value_enum, default_value_t = MatchStrategy::DirectScan)]
    pub match_strategy: MatchStrategy,

    /// Directory holding the per-traverse pose cache
    #[arg(long, default_value = ".")]
    pub cache_dir: String,

    /// Log split counts and frame spacing of the sampled traverse
    #[arg(short = 'd', long)]
    pub report: bool,

    /// Only log warnings
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn split_config(&self) -> SplitConfig {
        SplitConfig {
            split: self.split,
            version: self.version_policy,
            sample_dist: self.offset,
            sampling: self.sampling,
            match_strategy: self.match_strategy,
        }
    }
}

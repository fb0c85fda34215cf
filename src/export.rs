use std::io::Write;

use serde::Serialize;

use crate::config::SplitConfig;
use crate::global_types::IndexSet;
use crate::pipeline::SplitResult;
use crate::resample::OutlierReport;

/// 输出到标准输出的结果
#[derive(Debug, Serialize)]
pub struct SplitOutput {
    pub traverse_id: String,
    pub config: SplitConfig,
    /// (northing, easting)
    pub poses: Vec<[f64; 2]>,
    pub sample_inds: IndexSet,
    pub split_inds: Option<IndexSet>,
    pub timestamps: Vec<f64>,
    /// 只有 odom 采样才有
    pub outliers: Option<OutlierReport>,
}

impl SplitOutput {
    pub fn new(traverse_id: &str, config: &SplitConfig, result: &SplitResult) -> Self {
        Self {
            traverse_id: traverse_id.to_string(),
            config: config.clone(),
            poses: result.poses.rows().into_iter().map(|r| [r[0], r[1]]).collect(),
            sample_inds: result.sample_inds.clone(),
            split_inds: result.split_inds.clone(),
            timestamps: result.timestamps.to_vec(),
            outliers: result.outliers.clone(),
        }
    }

    pub fn write_json<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global_types::Traverse;
    use crate::split::SplitName;
    use ndarray::array;

    fn result(outliers: Option<OutlierReport>) -> SplitResult {
        let sampled = Traverse::new(array![1.0, 2.0], array![[0.0, 0.0], [0.0, 5.0]]).unwrap();
        SplitResult {
            poses: array![[0.0, 5.0]],
            timestamps: array![2.0],
            sample_inds: IndexSet::from_unsorted(vec![0, 4]),
            split_inds: Some(IndexSet::from_unsorted(vec![1])),
            outliers,
            sampled,
        }
    }

    fn to_value(output: &SplitOutput) -> serde_json::Value {
        let mut buf = Vec::new();
        output.write_json(&mut buf).unwrap();
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn test_json_layout() {
        let config = SplitConfig {
            split: Some(SplitName::ValTest),
            sample_dist: 2.0,
            ..Default::default()
        };
        let value = to_value(&SplitOutput::new("trav", &config, &result(None)));
        assert_eq!(
            value,
            serde_json::json!({
                "traverse_id": "trav",
                "config": {
                    "split": "val+test",
                    "version": "v2.1",
                    "sample_dist": 2.0,
                    "sampling": "odom",
                    "match_strategy": "direct-scan"
                },
                "poses": [[0.0, 5.0]],
                "sample_inds": [0, 4],
                "split_inds": [1],
                "timestamps": [2.0],
                "outliers": null
            })
        );
    }

    #[test]
    fn test_outlier_report_exported() {
        let report = OutlierReport {
            total_dist_before: 60.0,
            total_dist_after: 20.0,
            removed: IndexSet::from_unsorted(vec![3]),
            kept: IndexSet::from_unsorted(vec![0, 1, 2, 4]),
        };
        let value = to_value(&SplitOutput::new(
            "trav",
            &SplitConfig::default(),
            &result(Some(report)),
        ));
        assert_eq!(value["config"]["split"], serde_json::Value::Null);
        assert_eq!(
            value["outliers"],
            serde_json::json!({
                "total_dist_before": 60.0,
                "total_dist_after": 20.0,
                "removed": [3],
                "kept": [0, 1, 2, 4]
            })
        );
    }
}

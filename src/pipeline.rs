//! 采样 + 划分
//!
//! 位姿来源 (缓存) -> 采样 -> 可选的数据集划分

use ndarray::{Array1, Array2, Axis};

use crate::cache::{CacheKey, PoseCache};
use crate::config::{SamplingType, SplitConfig};
use crate::dataset::DatasetTrait;
use crate::error::Result;
use crate::global_types::{IndexSet, Traverse};
use crate::resample::{frame_indices, speed_normalized_indices, OutlierReport};
use crate::split::SplitPolicy;
use crate::timestamp_match::{closest_indices, MatchStrategy};

#[derive(Debug, Clone)]
pub struct SplitResult {
    /// 采样（以及划分）后的位置
    pub poses: Array2<f64>,
    pub timestamps: Array1<f64>,
    /// 采样得到的帧在原始轨迹中的索引
    pub sample_inds: IndexSet,
    /// 划分得到的帧在采样结果中的索引
    pub split_inds: Option<IndexSet>,
    /// 只有 odom 采样才有
    pub outliers: Option<OutlierReport>,
    /// 划分前的采样轨迹
    pub sampled: Traverse,
}

/// 为每个图像时间戳找到最近的位姿
pub fn image_traverse<D: DatasetTrait>(
    dataset: &D,
    strategy: MatchStrategy,
) -> anyhow::Result<Traverse> {
    let (pose_ts, poses) = dataset.read_poses()?;
    let img_ts = dataset.read_image_timestamps()?;
    log::info!("Searching for nearest poses for given timestamps...");
    let close_inds = closest_indices(pose_ts.view(), img_ts.view(), strategy)?;
    let img_poses = poses.select(Axis(0), &close_inds);
    Ok(Traverse::new(img_ts, img_poses)?)
}

/// 先查缓存，没有再做时间戳匹配
pub fn load_image_traverse<D, C>(
    dataset: &D,
    cache: &mut C,
    strategy: MatchStrategy,
) -> anyhow::Result<Traverse>
where
    D: DatasetTrait,
    C: PoseCache,
{
    let key = CacheKey::new(dataset.traverse_id(), dataset.camera());
    cache.get_or_compute(&key, || image_traverse(dataset, strategy))
}

/// 按配置采样，返回原始轨迹中的索引
pub fn sample_traverse(
    traverse: &Traverse,
    config: &SplitConfig,
) -> Result<(IndexSet, Option<OutlierReport>)> {
    match config.sampling {
        SamplingType::Odom => {
            let sampled = speed_normalized_indices(traverse.positions.view(), config.sample_dist)?;
            Ok((sampled.original_inds, Some(sampled.report)))
        }
        SamplingType::Frame => Ok((frame_indices(traverse.len(), config.sample_dist)?, None)),
    }
}

pub fn get_splits(traverse: &Traverse, config: &SplitConfig) -> Result<SplitResult> {
    let (sample_inds, outliers) = sample_traverse(traverse, config)?;
    let sampled = traverse.select(&sample_inds);
    log::info!("Subsampled traverse shape: {:?}", sampled.positions.dim());

    let (selected, split_inds) = match config.split {
        Some(split) => {
            let split_inds = SplitPolicy::new(config.version)
                .split_indices(sampled.positions.view(), split)?;
            let selected = sampled.select(&split_inds);
            log::info!("Split sample count: {}", selected.len());
            (selected, Some(split_inds))
        }
        None => (sampled.clone(), None),
    };

    Ok(SplitResult {
        poses: selected.positions,
        timestamps: selected.timestamps,
        sample_inds,
        split_inds,
        outliers,
        sampled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryPoseCache;
    use crate::config::{TEST_CORD, VAL_CORD_V21};
    use crate::error::SplitError;
    use crate::split::{SplitName, SplitVersion};
    use ndarray::array;

    /// 从测试区中心向北开出 800m，每 0.5s 记录一次，第 400 帧起定位整体跳了 25m
    fn drive() -> Traverse {
        let n = 800;
        let mut ts = Vec::new();
        let mut flat = Vec::new();
        for i in 0..n {
            ts.push(i as f64 * 0.5);
            let mut north = TEST_CORD[0] + i as f64;
            if i >= 400 {
                north += 25.0;
            }
            flat.extend_from_slice(&[north, TEST_CORD[1]]);
        }
        Traverse::new(Array1::from(ts), Array2::from_shape_vec((n, 2), flat).unwrap()).unwrap()
    }

    struct FakeDataset;

    impl DatasetTrait for FakeDataset {
        fn read_poses(&self) -> anyhow::Result<(Array1<f64>, Array2<f64>)> {
            Ok((
                array![0.0, 10.0, 20.0, 30.0],
                array![[0.0, 0.0], [0.0, 1.0], [0.0, 2.0], [0.0, 3.0]],
            ))
        }
        fn read_image_timestamps(&self) -> anyhow::Result<Array1<f64>> {
            Ok(array![1.0, 12.0, 26.0])
        }
        fn traverse_id(&self) -> &str {
            "fake"
        }
        fn camera(&self) -> &str {
            "stereo"
        }
    }

    #[test]
    fn test_image_traverse() {
        let mut cache = MemoryPoseCache::default();
        let trav = load_image_traverse(&FakeDataset, &mut cache, MatchStrategy::DirectScan).unwrap();
        assert_eq!(trav.timestamps, array![1.0, 12.0, 26.0]);
        assert_eq!(trav.positions, array![[0.0, 0.0], [0.0, 1.0], [0.0, 3.0]]);
        assert!(cache.load(&CacheKey::new("fake", "stereo")).unwrap().is_some());
    }

    #[test]
    fn test_sample_skips_outlier() {
        let trav = drive();
        let config = SplitConfig {
            sample_dist: 5.0,
            ..Default::default()
        };
        let result = get_splits(&trav, &config).unwrap();
        let report = result.outliers.unwrap();
        assert_eq!(report.removed.as_slice(), &[400]);
        assert!(!result.sample_inds.contains(400));
        assert_eq!(result.sample_inds.as_slice()[..3], [0, 5, 10]);
        assert!(result.split_inds.is_none());
        assert_eq!(result.poses.nrows(), result.sample_inds.len());
    }

    #[test]
    fn test_split_selects_from_sampled() {
        let trav = drive();
        let config = SplitConfig {
            split: Some(SplitName::Test),
            version: SplitVersion::V21,
            sample_dist: 7.0,
            ..Default::default()
        };
        let result = get_splits(&trav, &config).unwrap();
        let split_inds = result.split_inds.unwrap();
        // 北向 0, 7, ..., 245m 在收缩后的测试区 (250m) 内
        assert_eq!(split_inds, IndexSet::full(36));
        assert_eq!(result.poses.nrows(), 36);
        assert_eq!(result.timestamps[35], result.sampled.timestamps[35]);
    }

    #[test]
    fn test_frame_sampling() {
        let trav = drive();
        let config = SplitConfig {
            sampling: SamplingType::Frame,
            sample_dist: 100.0,
            ..Default::default()
        };
        let result = get_splits(&trav, &config).unwrap();
        assert_eq!(result.sample_inds.len(), 8);
        assert!(result.outliers.is_none());
    }

    #[test]
    fn test_errors_propagate() {
        let still = Traverse::new(
            array![0.0, 1.0],
            array![[VAL_CORD_V21[0], VAL_CORD_V21[1]], [VAL_CORD_V21[0], VAL_CORD_V21[1]]],
        )
        .unwrap();
        assert!(matches!(
            get_splits(&still, &SplitConfig::default()),
            Err(SplitError::DegenerateTraverse { .. })
        ));

        let config = SplitConfig {
            split: Some(SplitName::ValFull),
            sample_dist: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            get_splits(&drive(), &config),
            Err(SplitError::UnsupportedSplit { .. })
        ));
    }
}

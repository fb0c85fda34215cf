//! 图像时间戳对应位姿的缓存
//!
//! 最近时间戳匹配比较慢，结果按 (traverse, camera) 缓存，有就读，没有就算完再写。
//! 不加锁，多个进程同时写同一个文件不在考虑范围内。

use std::path::PathBuf;

use anyhow::Context;
use ndarray::{Array1, Array2};

use crate::global_types::Traverse;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub traverse_id: String,
    pub camera: String,
}

impl CacheKey {
    pub fn new(traverse_id: &str, camera: &str) -> Self {
        Self {
            traverse_id: traverse_id.to_string(),
            camera: camera.to_string(),
        }
    }
}

pub trait PoseCache {
    fn load(&self, key: &CacheKey) -> anyhow::Result<Option<Traverse>>;
    fn store(&mut self, key: &CacheKey, traverse: &Traverse) -> anyhow::Result<()>;

    fn get_or_compute<F>(&mut self, key: &CacheKey, compute: F) -> anyhow::Result<Traverse>
    where
        F: FnOnce() -> anyhow::Result<Traverse>,
        Self: Sized,
    {
        if let Some(traverse) = self.load(key)? {
            log::info!(
                "loaded {} cached poses for {}/{}",
                traverse.len(),
                key.traverse_id,
                key.camera
            );
            return Ok(traverse);
        }
        let traverse = compute()?;
        self.store(key, &traverse)?;
        Ok(traverse)
    }
}

/// `<dir>/<traverse>_<camera>_timestamp_poses.csv`，每行 timestamp,northing,easting
#[derive(Debug, Clone)]
pub struct CsvPoseCache {
    pub dir: PathBuf,
}

impl CsvPoseCache {
    pub fn new(dir: &str) -> Self {
        Self {
            dir: PathBuf::from(dir),
        }
    }

    pub fn path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!(
            "{}_{}_timestamp_poses.csv",
            key.traverse_id, key.camera
        ))
    }
}

impl PoseCache for CsvPoseCache {
    fn load(&self, key: &CacheKey) -> anyhow::Result<Option<Traverse>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .with_context(|| format!("open {}", path.display()))?;
        let mut timestamps = Vec::new();
        let mut positions = Vec::new();
        for row in reader.deserialize() {
            let (t, n, e): (f64, f64, f64) =
                row.with_context(|| format!("read {}", path.display()))?;
            timestamps.push(t);
            positions.push(n);
            positions.push(e);
        }
        let len = timestamps.len();
        let traverse = Traverse::new(
            Array1::from(timestamps),
            Array2::from_shape_vec((len, 2), positions)?,
        )?;
        Ok(Some(traverse))
    }

    fn store(&mut self, key: &CacheKey, traverse: &Traverse) -> anyhow::Result<()> {
        let path = self.path(key);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .with_context(|| format!("create {}", path.display()))?;
        for (t, row) in traverse.timestamps.iter().zip(traverse.positions.rows()) {
            writer.serialize((t, row[0], row[1]))?;
        }
        writer.flush()?;
        log::info!("saved {} poses to {}", traverse.len(), path.display());
        Ok(())
    }
}

/// 内存缓存，测试用
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryPoseCache {
    entries: std::collections::HashMap<CacheKey, Traverse>,
}

#[cfg(test)]
impl PoseCache for MemoryPoseCache {
    fn load(&self, key: &CacheKey) -> anyhow::Result<Option<Traverse>> {
        Ok(self.entries.get(key).cloned())
    }

    fn store(&mut self, key: &CacheKey, traverse: &Traverse) -> anyhow::Result<()> {
        self.entries.insert(key.clone(), traverse.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tempfile::TempDir;

    fn sample() -> Traverse {
        Traverse::new(
            array![1445000000000000.0, 1445000000050000.0],
            array![[5735000.123456, 619800.654321], [5735001.5, 619801.25]],
        )
        .unwrap()
    }

    #[test]
    fn test_compute_once() {
        let mut cache = MemoryPoseCache::default();
        let key = CacheKey::new("trav", "stereo");
        let mut calls = 0;
        for _ in 0..3 {
            let trav = cache
                .get_or_compute(&key, || {
                    calls += 1;
                    Ok(sample())
                })
                .unwrap();
            assert_eq!(trav, sample());
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_csv_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut cache = CsvPoseCache::new(dir.path().to_str().unwrap());
        let key = CacheKey::new("2015-10-29-12-18-17", "stereo");
        assert!(cache.load(&key).unwrap().is_none());

        cache.store(&key, &sample()).unwrap();
        assert!(dir
            .path()
            .join("2015-10-29-12-18-17_stereo_timestamp_poses.csv")
            .exists());
        assert_eq!(cache.load(&key).unwrap(), Some(sample()));
    }

    #[test]
    fn test_reads_scientific_notation() {
        let dir = TempDir::new().unwrap();
        let cache = CsvPoseCache::new(dir.path().to_str().unwrap());
        let key = CacheKey::new("t", "stereo");
        std::fs::write(
            cache.path(&key),
            "1.445000000000000000e+15,5.735000500000000000e+06,6.198002500000000000e+05\n",
        )
        .unwrap();
        let trav = cache.load(&key).unwrap().unwrap();
        assert_eq!(trav.timestamps, array![1.445e15]);
        assert_eq!(trav.positions, array![[5735000.5, 619800.25]]);
    }
}

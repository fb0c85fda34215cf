use std::path::{Path, PathBuf};

use anyhow::Context;
use ndarray::{Array1, Array2};

use super::DatasetTrait;

#[derive(Debug, Clone)]
pub struct OxfordDataset {
    pub root: PathBuf,
    pub traverse_id: String,
    pub camera: String,
}

impl OxfordDataset {
    const INS_PATH: &'static str = "gps/ins.csv";
    /// ins.csv 中的 timestamp, northing, easting 列
    const INS_COLUMNS: [usize; 3] = [0, 5, 6];

    /// `stereo/left`、`stereo/centre` 等都使用 stereo 的时间戳
    pub fn camera_name(camera: &str) -> String {
        if camera.contains("stereo") {
            "stereo".to_string()
        } else {
            camera.to_string()
        }
    }

    pub fn new(root: &str, traverse_id: &str, camera: &str) -> Self {
        Self {
            root: PathBuf::from(root),
            traverse_id: traverse_id.to_string(),
            camera: Self::camera_name(camera),
        }
    }

    fn parse_f64(field: Option<&str>, path: &Path, line: usize) -> anyhow::Result<f64> {
        let field = field.with_context(|| format!("{}:{}: missing column", path.display(), line))?;
        field
            .trim()
            .parse::<f64>()
            .with_context(|| format!("{}:{}: bad number {:?}", path.display(), line, field))
    }

    /// 读取 INS 日志，第一行是表头
    pub fn read_ins(path: &Path) -> anyhow::Result<(Array1<f64>, Array2<f64>)> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("open {}", path.display()))?;
        let mut timestamps = Vec::new();
        let mut north_east = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("read {}", path.display()))?;
            let [t, n, e] = Self::INS_COLUMNS;
            timestamps.push(Self::parse_f64(record.get(t), path, i + 2)?);
            north_east.push(Self::parse_f64(record.get(n), path, i + 2)?);
            north_east.push(Self::parse_f64(record.get(e), path, i + 2)?);
        }
        let n = timestamps.len();
        Ok((
            Array1::from(timestamps),
            Array2::from_shape_vec((n, 2), north_east)?,
        ))
    }

    /// 读取图像时间戳文件，空格分隔，只用第一列
    pub fn read_img_ts(path: &Path) -> anyhow::Result<Array1<f64>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b' ')
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("open {}", path.display()))?;
        let mut timestamps = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("read {}", path.display()))?;
            timestamps.push(Self::parse_f64(record.get(0), path, i + 1)?);
        }
        Ok(Array1::from(timestamps))
    }

    fn traverse_dir(&self) -> PathBuf {
        self.root.join(&self.traverse_id)
    }
}

impl DatasetTrait for OxfordDataset {
    fn read_poses(&self) -> anyhow::Result<(Array1<f64>, Array2<f64>)> {
        Self::read_ins(&self.traverse_dir().join(Self::INS_PATH))
    }

    fn read_image_timestamps(&self) -> anyhow::Result<Array1<f64>> {
        let name = format!("{}.timestamps", self.camera);
        Self::read_img_ts(&self.traverse_dir().join(name))
    }

    fn traverse_id(&self) -> &str {
        &self.traverse_id
    }

    fn camera(&self) -> &str {
        &self.camera
    }
}

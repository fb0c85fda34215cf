//! 数据集处理
//!
//! Oxford RobotCar Dataset  https://robotcar-dataset.robots.ox.ac.uk/
mod oxford;

use ndarray::{Array1, Array2};

pub type DefaultDataset = oxford::OxfordDataset;

pub trait DatasetTrait {
    /// 读取位置日志
    /// 返回时间戳和 (northing, easting)
    fn read_poses(&self) -> anyhow::Result<(Array1<f64>, Array2<f64>)>;
    /// 读取图像时间戳
    fn read_image_timestamps(&self) -> anyhow::Result<Array1<f64>>;
    fn traverse_id(&self) -> &str;
    fn camera(&self) -> &str;
}

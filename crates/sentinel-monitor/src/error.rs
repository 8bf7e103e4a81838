//! 监控层错误类型

use sentinel_checks::{ConfigError, IntervalError};
use sentinel_kinematics::ShapeError;
use thiserror::Error;

use crate::io::ExternalError;

/// 监控层错误
#[derive(Debug, Error)]
pub enum MonitorError {
    /// 配置档案无效
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 采样间隔无效
    #[error(transparent)]
    Interval(#[from] IntervalError),

    /// 角度向量长度错误
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// 外部角度源或停止接收端失败
    #[error(transparent)]
    External(#[from] ExternalError),

    /// 轨迹文件读取失败
    #[error("failed to read trajectory file: {0}")]
    Io(String),

    /// 轨迹文件格式错误
    #[error("failed to parse trajectory file: {0}")]
    Parse(String),
}

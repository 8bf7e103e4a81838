//! 检查层错误类型定义

use sentinel_kinematics::ShapeError;
use thiserror::Error;

/// 配置错误
///
/// 所有表格在加载时验证一次，之后的检查路径不再出现查表失败。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// 角度向量长度错误
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// 连杆不能与自身配对
    #[error("link {link} cannot be paired with itself")]
    SelfPair { link: u8 },

    /// 安全距离表引用了相邻连杆对（相邻对永远不检查）
    #[error("adjacent link pair ({a}, {b}) is not checkable")]
    AdjacentPair { a: u8, b: u8 },

    /// 连杆索引超出 1..=5
    #[error("link index {link} out of range (expected 1..=5)")]
    LinkOutOfRange { link: u8 },

    /// 同一连杆对出现多次
    #[error("duplicate entry for link pair ({a}, {b})")]
    DuplicatePair { a: u8, b: u8 },

    /// 数值必须为正
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    /// 数值不能为负
    #[error("{what} must not be negative, got {value}")]
    Negative { what: &'static str, value: f64 },

    /// 插值步数过少（至少需要起点和终点）
    #[error("interpolation needs at least 2 steps, got {steps}")]
    TooFewSteps { steps: usize },

    /// 配置文件解析失败
    #[error("failed to parse profile: {0}")]
    Parse(String),

    /// 配置文件读写失败
    #[error("failed to read profile file: {0}")]
    Io(String),
}

/// 采样间隔错误
///
/// 速度限制是离散采样检查，Δt 必须严格为正。
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("sampling interval must be positive, got {dt} s")]
pub struct IntervalError {
    /// 非法的 Δt（秒）
    pub dt: f64,
}

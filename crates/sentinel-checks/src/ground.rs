//! 地面间距检查
//!
//! 逐关节比较 z 坐标和最低许可余量。末端关节可配置工具延长：
//! 安装的笔/夹爪把实际最低点往下挪，检查前先从关节 6 的 z
//! 里减掉工具长度。

use nalgebra::Point3;
use sentinel_kinematics::{Joint, JointArray};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::ConfigError;

/// 地面检查配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundConfig {
    /// 最低许可余量（米）
    pub margin: f64,
    /// 工具延长（米），沿 -z 施加到关节 6；0 表示无工具
    pub tool_extension: f64,
}

impl GroundConfig {
    /// 参考机型配置：余量 0.1 m，笔形工具 0.03 m
    pub const fn reference() -> Self {
        GroundConfig {
            margin: 0.1,
            tool_extension: 0.03,
        }
    }

    /// 验证配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.margin < 0.0 {
            return Err(ConfigError::Negative {
                what: "ground margin",
                value: self.margin,
            });
        }
        if self.tool_extension < 0.0 {
            return Err(ConfigError::Negative {
                what: "tool extension",
                value: self.tool_extension,
            });
        }
        Ok(())
    }
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// 地面间距检查器
#[derive(Debug, Clone)]
pub struct GroundChecker {
    config: GroundConfig,
}

impl GroundChecker {
    /// 创建检查器（配置先验证）
    pub fn new(config: GroundConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(GroundChecker { config })
    }

    /// 逐关节判定：`z - margin >= 0` 为通过
    ///
    /// 返回每个关节的通过标志，索引 0 对应关节 1。
    pub fn check(&self, coordinates: &JointArray<Point3<f64>>) -> JointArray<bool> {
        JointArray::new(std::array::from_fn(|i| {
            let mut z = coordinates[i].z;
            if i == Joint::J6.index() {
                z -= self.config.tool_extension;
            }
            z - self.config.margin >= 0.0
        }))
    }

    /// 离地面过近的关节
    pub fn flagged(&self, coordinates: &JointArray<Point3<f64>>) -> SmallVec<[Joint; 6]> {
        let verdicts = self.check(coordinates);
        Joint::ALL
            .into_iter()
            .filter(|j| !verdicts[*j])
            .collect()
    }
}

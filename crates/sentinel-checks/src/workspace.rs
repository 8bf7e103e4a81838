//! 半球工作空间检查
//!
//! 允许区域是一个球体被过球心的平面切出的半球：点必须落在
//! 指定轴的允许一侧（边界算内），且到球心的平方距离不超过
//! 半径平方（边界算内）。

use nalgebra::Point3;
use sentinel_kinematics::JointArray;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 半球切分轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HemisphereAxis {
    /// 沿 x 轴切分
    X,
    /// 沿 y 轴切分
    Y,
    /// 沿 z 轴切分
    Z,
}

impl HemisphereAxis {
    fn component(self, point: &Point3<f64>) -> f64 {
        match self {
            HemisphereAxis::X => point.x,
            HemisphereAxis::Y => point.y,
            HemisphereAxis::Z => point.z,
        }
    }
}

/// 允许工作区域：球心、半径、半球谓词
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceRegion {
    /// 球心坐标
    pub center: [f64; 3],
    /// 球半径（米）
    pub radius: f64,
    /// 切分轴
    pub axis: HemisphereAxis,
    /// `true` 表示允许轴分量 ≥ 球心分量的一侧
    pub positive: bool,
}

impl WorkspaceRegion {
    /// 参考配置：原点球心，半径 0.62 m，z ≥ 0 的上半球
    pub const fn reference() -> Self {
        WorkspaceRegion {
            center: [0.0, 0.0, 0.0],
            radius: 0.62,
            axis: HemisphereAxis::Z,
            positive: true,
        }
    }

    /// 验证配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                what: "workspace radius",
                value: self.radius,
            });
        }
        Ok(())
    }

    /// 点是否在允许的半球内（两处边界都算内）
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        let center = Point3::new(self.center[0], self.center[1], self.center[2]);
        let side = self.axis.component(point) - self.axis.component(&center);
        let on_allowed_side = if self.positive { side >= 0.0 } else { side <= 0.0 };
        on_allowed_side && (point - center).norm_squared() <= self.radius * self.radius
    }

    /// 诊断用：逐关节成员关系
    pub fn check_all(&self, coordinates: &JointArray<Point3<f64>>) -> JointArray<bool> {
        JointArray::new(std::array::from_fn(|i| self.contains(&coordinates[i])))
    }
}

impl Default for WorkspaceRegion {
    fn default() -> Self {
        Self::reference()
    }
}

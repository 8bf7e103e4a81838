//! 轨迹插值
//!
//! 在两个路点之间生成有限、有序、可重置的中间角度序列，起点
//! 和终点都包含在内。监控器用它验证整段运动：任何一个中间姿态
//! 不合格，整段即拒绝——只检查端点是不够的，连杆可能在运动
//! 途中短暂交叠。
//!
//! # 包裹模式
//!
//! - `Raw`：纯线性插值，delta 不做包裹；
//! - `ShortestPath`：先把每个关节的 delta 包裹到 `[-π, π]`，
//!   插值永远走角度上较短的一侧。
//!
//! 两种模式在历史参数集里都出现过，这里作为显式配置暴露，
//! 不替调用方默默选择。

use sentinel_kinematics::JointAngles;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 判定"起终点过近"的最短角度距离阈值（弧度）
const TOO_CLOSE_EPS: f64 = 1e-4;

/// 插值包裹模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// 纯线性，不包裹
    Raw,
    /// 每个关节走最短角度路径
    ShortestPath,
}

/// 两路点之间的插值序列
///
/// `Iterator` 按需产出姿态，`reset()` 支持重新遍历。
#[derive(Debug, Clone)]
pub struct Interpolator {
    start: JointAngles,
    deltas: JointAngles,
    total_samples: usize,
    current_index: usize,
}

impl Interpolator {
    /// 创建插值器
    ///
    /// `steps` 是序列总长度（含起点和终点），至少为 2。
    /// 起终点所有关节的最短角度距离都小于阈值时，序列
    /// 短路为只有两个端点。
    pub fn new(
        start: JointAngles,
        end: JointAngles,
        steps: usize,
        mode: WrapMode,
    ) -> Result<Self, ConfigError> {
        if steps < 2 {
            return Err(ConfigError::TooFewSteps { steps });
        }

        let deltas = end.map_with(start, |e, s| match mode {
            WrapMode::Raw => e - s,
            WrapMode::ShortestPath => (e - s).normalize(),
        });

        let too_close = end
            .map_with(start, |e, s| (e - s).normalize().abs().value())
            .iter()
            .all(|dist| *dist < TOO_CLOSE_EPS);

        Ok(Interpolator {
            start,
            deltas,
            total_samples: if too_close { 2 } else { steps },
            current_index: 0,
        })
    }

    /// 序列总长度
    pub fn total_samples(&self) -> usize {
        self.total_samples
    }

    /// 重置到序列起点
    pub fn reset(&mut self) {
        self.current_index = 0;
    }

    /// 在归一化参数 t ∈ [0, 1] 处取姿态
    fn evaluate_at(&self, t: f64) -> JointAngles {
        self.start.map_with(self.deltas, |s, d| s + d * t)
    }
}

impl Iterator for Interpolator {
    type Item = JointAngles;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index >= self.total_samples {
            return None;
        }
        let t = (self.current_index as f64) / ((self.total_samples - 1) as f64);
        self.current_index += 1;
        Some(self.evaluate_at(t))
    }
}

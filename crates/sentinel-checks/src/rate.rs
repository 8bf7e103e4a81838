//! 关节角速度限制
//!
//! 离散采样限速器：比较当前角度和上一次采样的保持角度，
//! `|Δangle| / Δt` 严格大于该关节的限速即标记。除了单个上一
//! 采样点之外没有记忆，保持角度由调用方在每次评估后显式推进。

use sentinel_kinematics::{Joint, JointAngles, JointArray};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ConfigError, IntervalError};

/// 逐关节角速度上限（rad/s）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeedLimits(pub JointArray<f64>);

impl SpeedLimits {
    /// 参考机型限速
    pub const fn reference() -> Self {
        SpeedLimits(JointArray::new([0.4, 0.4, 0.5, 1.15, 1.15, 1.15]))
    }

    /// 验证配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        for limit in self.0.iter() {
            if *limit <= 0.0 {
                return Err(ConfigError::NonPositive {
                    what: "speed limit",
                    value: *limit,
                });
            }
        }
        Ok(())
    }
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self::reference()
    }
}

/// 角速度限制器
#[derive(Debug, Clone)]
pub struct RateLimiter {
    limits: SpeedLimits,
}

impl RateLimiter {
    /// 创建限制器（限速先验证）
    pub fn new(limits: SpeedLimits) -> Result<Self, ConfigError> {
        limits.validate()?;
        Ok(RateLimiter { limits })
    }

    /// 返回超速关节集合（可能为空）
    ///
    /// `dt` 必须严格为正，否则返回 [`IntervalError`]，绝不把
    /// 除零结果当判定用。速度恰好等于限速的关节算通过。
    pub fn flagged(
        &self,
        current: &JointAngles,
        hold: &JointAngles,
        dt: f64,
    ) -> Result<SmallVec<[Joint; 6]>, IntervalError> {
        if dt <= 0.0 {
            return Err(IntervalError { dt });
        }
        Ok(Joint::ALL
            .into_iter()
            .filter(|&j| {
                let velocity = (current[j] - hold[j]).abs().value() / dt;
                velocity > self.limits.0[j]
            })
            .collect())
    }
}

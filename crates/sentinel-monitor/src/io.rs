//! 外部协作者边界
//!
//! 连续监控依赖两个外部能力：提供实时关节角度的角度源，和接受
//! 减速停止指令的运动停止端。两者都以 trait 表示，真实实现由
//! 机器人通信栈提供，测试用脚本化的 mock 替代。
//!
//! 任一协作者在交互中失败，轮询循环立即停止（fail-stop），不再
//! 发起后续检查或运动指令。

use sentinel_kinematics::{JointAngles, JointArray};
use thiserror::Error;

/// 外部协作者交互失败
#[derive(Debug, Clone, Error)]
#[error("external collaborator failed: {reason}")]
pub struct ExternalError {
    /// 失败原因描述
    pub reason: String,
}

impl ExternalError {
    /// 创建错误
    pub fn new(reason: impl Into<String>) -> Self {
        ExternalError {
            reason: reason.into(),
        }
    }
}

/// 停止指令
///
/// 逐关节减速度（弧度/秒²）。监控器在首次检查失败时恰好发出
/// 一次该指令。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopCommand {
    /// 逐关节减速度（rad/s²）
    pub decelerations: JointArray<f64>,
}

impl StopCommand {
    /// 参考减速停止指令：每关节 5°/s²
    pub fn reference() -> Self {
        StopCommand {
            decelerations: JointArray::splat(5.0_f64.to_radians()),
        }
    }
}

impl Default for StopCommand {
    fn default() -> Self {
        Self::reference()
    }
}

/// 实时关节角度源
///
/// `current_angles` 可以阻塞（等待下一帧反馈），但应在合理时间内
/// 返回。实现必须可跨线程移动。
pub trait AngleSource: Send {
    /// 拉取当前关节角度
    fn current_angles(&mut self) -> Result<JointAngles, ExternalError>;
}

/// 运动停止端
pub trait StopSink: Send {
    /// 发出减速停止指令
    fn issue_stop(&mut self, command: &StopCommand) -> Result<(), ExternalError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_stop_command_deceleration() {
        let command = StopCommand::reference();
        for decel in command.decelerations.iter() {
            assert!((decel - 5.0_f64.to_radians()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_external_error_message() {
        let err = ExternalError::new("feedback timeout");
        assert_eq!(
            err.to_string(),
            "external collaborator failed: feedback timeout"
        );
    }
}

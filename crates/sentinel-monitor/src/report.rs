//! 单次检查报告

use std::fmt::Write as _;

use sentinel_checks::CollisionVerdict;
use sentinel_kinematics::{Joint, JointAngles};
use smallvec::SmallVec;

/// 一次完整安全检查的结果
///
/// 四项检查的结果按逻辑与合成 `valid`：超速关节集合为空、末端
/// 在工作空间内、无贴地关节、所有连杆对间隙达标。
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    /// 被检查的关节角度
    pub angles: JointAngles,
    /// 超速关节（一次性检查无前序角度时恒为空）
    pub rate_flagged: SmallVec<[Joint; 6]>,
    /// 末端执行器是否在允许工作空间内
    pub workspace_ok: bool,
    /// 地面间距不足的关节
    pub ground_flagged: SmallVec<[Joint; 6]>,
    /// 自碰撞逐对判定
    pub collision: CollisionVerdict,
    /// 合成判定
    pub valid: bool,
}

impl CheckReport {
    /// 合成判定
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// 失败摘要，用于日志和停止原因记录
    ///
    /// 全部通过时返回 `"all checks passed"`。
    pub fn summary(&self) -> String {
        if self.valid {
            return "all checks passed".to_string();
        }
        let mut parts = Vec::new();
        if !self.rate_flagged.is_empty() {
            parts.push(format!("rate exceeded: {}", joined(&self.rate_flagged)));
        }
        if !self.workspace_ok {
            parts.push("end effector outside workspace".to_string());
        }
        if !self.ground_flagged.is_empty() {
            parts.push(format!("ground clearance: {}", joined(&self.ground_flagged)));
        }
        if !self.collision.is_safe() {
            let mut pairs = String::new();
            for (i, failing) in self.collision.failing().enumerate() {
                if i > 0 {
                    let _ = write!(pairs, ", ");
                }
                let _ = write!(
                    pairs,
                    "{} ({:.4} m < {:.4} m)",
                    failing.pair, failing.clearance, failing.threshold
                );
            }
            parts.push(format!("self collision: {pairs}"));
        }
        parts.join("; ")
    }
}

fn joined(joints: &SmallVec<[Joint; 6]>) -> String {
    joints
        .iter()
        .map(|j| j.name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn empty_report() -> CheckReport {
        CheckReport {
            angles: JointAngles::from_radians([0.0; 6]),
            rate_flagged: SmallVec::new(),
            workspace_ok: true,
            ground_flagged: SmallVec::new(),
            collision: CollisionVerdict::default(),
            valid: true,
        }
    }

    #[test]
    fn test_valid_report_summary() {
        assert_eq!(empty_report().summary(), "all checks passed");
    }

    #[test]
    fn test_failed_report_summary_lists_checks() {
        let report = CheckReport {
            rate_flagged: smallvec![Joint::J1],
            workspace_ok: false,
            ground_flagged: smallvec![Joint::J5, Joint::J6],
            valid: false,
            ..empty_report()
        };
        let summary = report.summary();
        assert!(summary.contains("rate exceeded: J1"));
        assert!(summary.contains("end effector outside workspace"));
        assert!(summary.contains("ground clearance: J5, J6"));
    }
}

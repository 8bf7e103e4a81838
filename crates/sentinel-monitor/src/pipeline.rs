//! 检查流水线
//!
//! 把正运动学和四个检查器按验证过的配置档案捆绑成一个不可变
//! 对象。流水线本身纯且可重入：检查只读取构造时的配置和传入的
//! 角度，单次检查和后台轮询共用同一条流水线。

use sentinel_checks::{
    ConfigError, GroundChecker, IntervalError, Interpolator, RateLimiter, SafetyProfile,
    SelfCollisionChecker, WorkspaceRegion, WrapMode,
};
use sentinel_kinematics::{ForwardKinematics, Joint, JointAngles};
use smallvec::SmallVec;

use crate::report::CheckReport;

/// 检查流水线
///
/// 从验证过的 [`SafetyProfile`] 构建，之后不再改变。
#[derive(Debug, Clone)]
pub struct CheckPipeline {
    fk: ForwardKinematics,
    collision: SelfCollisionChecker,
    ground: GroundChecker,
    workspace: WorkspaceRegion,
    rate: RateLimiter,
    sample_interval_secs: f64,
    interpolation_steps: usize,
    wrap_mode: WrapMode,
}

/// 段验证结论
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentVerdict {
    /// 全部中间姿态通过
    Accepted {
        /// 实际检查的姿态数（含端点）
        samples: usize,
    },
    /// 在第一个失败的中间姿态处拒绝
    Rejected {
        /// 失败姿态在序列中的下标
        index: usize,
        /// 失败姿态的完整报告
        report: CheckReport,
    },
}

impl SegmentVerdict {
    /// 整段是否通过
    pub fn is_accepted(&self) -> bool {
        matches!(self, SegmentVerdict::Accepted { .. })
    }
}

impl CheckPipeline {
    /// 从配置档案构建流水线
    ///
    /// 档案先整体验证，任何一项无效都拒绝构建。
    pub fn from_profile(profile: &SafetyProfile) -> Result<Self, ConfigError> {
        profile.validate()?;
        Ok(CheckPipeline {
            fk: ForwardKinematics::new(profile.dh_params),
            collision: SelfCollisionChecker::new(
                profile.link_diameters,
                profile.safe_distance_table()?,
            )?,
            ground: GroundChecker::new(profile.ground)?,
            workspace: profile.workspace,
            rate: RateLimiter::new(profile.speed_limits)?,
            sample_interval_secs: profile.sample_interval_secs,
            interpolation_steps: profile.interpolation_steps,
            wrap_mode: profile.wrap_mode,
        })
    }

    /// 连续监控的采样间隔（秒）
    pub fn sample_interval_secs(&self) -> f64 {
        self.sample_interval_secs
    }

    /// 检查单个姿态（不含速度检查）
    ///
    /// 工作空间检查只针对末端执行器，地面和自碰撞检查覆盖全部
    /// 被监控关节/连杆。
    pub fn check_pose(&self, angles: &JointAngles) -> CheckReport {
        let coordinates = self.fk.joint_positions(angles);
        let workspace_ok = self.workspace.contains(&coordinates[Joint::J6]);
        let ground_flagged = self.ground.flagged(&coordinates);
        let collision = self.collision.check(&coordinates);
        let valid = workspace_ok && ground_flagged.is_empty() && collision.is_safe();
        CheckReport {
            angles: *angles,
            rate_flagged: SmallVec::new(),
            workspace_ok,
            ground_flagged,
            collision,
            valid,
        }
    }

    /// 检查单个姿态，并以配置的采样间隔做速度检查
    ///
    /// `hold` 是上一周期检查过的角度。
    pub fn check_pose_against(
        &self,
        angles: &JointAngles,
        hold: &JointAngles,
    ) -> Result<CheckReport, IntervalError> {
        let rate_flagged = self.rate.flagged(angles, hold, self.sample_interval_secs)?;
        let mut report = self.check_pose(angles);
        report.valid = report.valid && rate_flagged.is_empty();
        report.rate_flagged = rate_flagged;
        Ok(report)
    }

    /// 验证两个路点之间的整段运动
    ///
    /// 按配置的步数和包裹模式插值，对每个中间姿态（含端点）做
    /// 姿态检查，遇到第一个失败立即拒绝整段。
    pub fn validate_segment(
        &self,
        start: &JointAngles,
        end: &JointAngles,
    ) -> Result<SegmentVerdict, ConfigError> {
        let interpolator =
            Interpolator::new(*start, *end, self.interpolation_steps, self.wrap_mode)?;
        let samples = interpolator.total_samples();
        for (index, pose) in interpolator.enumerate() {
            let report = self.check_pose(&pose);
            if !report.valid {
                return Ok(SegmentVerdict::Rejected { index, report });
            }
        }
        Ok(SegmentVerdict::Accepted { samples })
    }
}

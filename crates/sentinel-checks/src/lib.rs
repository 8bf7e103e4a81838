//! 安全检查层模块
//!
//! 本模块提供监督器的全部逐姿态检查，包括：
//! - 胶囊体自碰撞检查（线段间最近点几何）
//! - 地面间距检查（可选工具延长）
//! - 半球工作空间检查
//! - 关节角速度限制（离散采样）
//! - 轨迹插值（整段运动逐姿态验证的数据来源）
//! - 安全配置档案（所有阈值都是数据，不写死在代码里）
//!
//! 所有检查器都是纯函数：只读取构造时加载的配置和调用传入的
//! 坐标/角度，可从任意线程重入调用，无需同步。

mod capsule;
mod collision;
mod error;
mod ground;
mod interpolate;
mod profile;
mod rate;
mod workspace;

pub use capsule::{Capsule, closest_points_between_segments};
pub use collision::{CollisionVerdict, LinkPair, PairClearance, SafeDistanceTable, SelfCollisionChecker};
pub use error::{ConfigError, IntervalError};
pub use ground::{GroundChecker, GroundConfig};
pub use interpolate::{Interpolator, WrapMode};
pub use profile::{SafeDistanceEntry, SafetyProfile};
pub use rate::{RateLimiter, SpeedLimits};
pub use workspace::{HemisphereAxis, WorkspaceRegion};

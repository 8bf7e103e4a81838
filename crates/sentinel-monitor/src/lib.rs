//! 安全监控编排层
//!
//! 把正运动学和各项安全检查组合成完整的监督器：
//! - [`CheckPipeline`]: 不可变检查流水线（姿态检查 + 段验证）
//! - [`SafetyMonitor`]: 一次性检查和连续后台监控（fail-stop）
//! - [`AngleSource`] / [`StopSink`]: 外部协作者边界
//! - [`waypoints`]: 轨迹路点文件加载
//!
//! # 示例
//!
//! ```rust
//! use sentinel_checks::SafetyProfile;
//! use sentinel_kinematics::JointAngles;
//! use sentinel_monitor::SafetyMonitor;
//!
//! let monitor = SafetyMonitor::new(&SafetyProfile::reference()).unwrap();
//! let pose = JointAngles::from_radians([0.9509, -1.6623, 0.6353, -0.5976, -1.5722, 0.0]);
//! let report = monitor.check(&pose).unwrap();
//! assert!(report.valid);
//! ```

mod error;
mod io;
mod monitor;
mod pipeline;
mod report;
pub mod waypoints;

pub use error::MonitorError;
pub use io::{AngleSource, ExternalError, StopCommand, StopSink};
pub use monitor::SafetyMonitor;
pub use pipeline::{CheckPipeline, SegmentVerdict};
pub use report::CheckReport;

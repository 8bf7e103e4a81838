//! 运动学层模块
//!
//! 本模块提供安全监督器的几何基础，包括：
//! - 强类型关节索引和 6 关节数组（编译期长度保证）
//! - 弧度 NewType（防止单位混淆）
//! - DH 参数表（机器人常量，加载一次，永不修改）
//! - 正向运动学（角度 → 各关节三维坐标）
//!
//! # 使用场景
//!
//! 所有几何安全检查（自碰撞、地面间距、工作空间）都从这里的
//! 关节坐标出发。本层是纯函数：无状态、可重入、无锁。

mod dh;
mod fk;
mod joint;
mod units;

pub use dh::{DhRow, DhTable};
pub use fk::ForwardKinematics;
pub use joint::{Joint, JointAngles, JointArray, ShapeError};
pub use units::Rad;

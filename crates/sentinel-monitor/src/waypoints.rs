//! 轨迹路点文件加载
//!
//! 读取轨迹采集工具导出的 JSON 格式：
//!
//! ```json
//! {"modTraj": [{"positions": [0.0, -1.57, 0.6, 0.0, 1.57, 0.0]}, ...]}
//! ```
//!
//! 路点中除 `positions` 以外的字段（时间戳、速度等）被忽略。

use std::fs;
use std::path::Path;

use sentinel_kinematics::JointAngles;
use serde::Deserialize;

use crate::error::MonitorError;

#[derive(Debug, Deserialize)]
struct TrajectoryFile {
    #[serde(rename = "modTraj")]
    mod_traj: Vec<TrajectoryPoint>,
}

#[derive(Debug, Deserialize)]
struct TrajectoryPoint {
    positions: Vec<f64>,
}

/// 解析轨迹 JSON 文本为路点角度序列
///
/// 任一路点的角度长度不为 6 时整个文件被拒绝。
pub fn parse_waypoints(content: &str) -> Result<Vec<JointAngles>, MonitorError> {
    let file: TrajectoryFile =
        serde_json::from_str(content).map_err(|e| MonitorError::Parse(e.to_string()))?;
    file.mod_traj
        .iter()
        .map(|point| Ok(JointAngles::from_radians_slice(&point.positions)?))
        .collect()
}

/// 从文件加载路点角度序列
pub fn load_waypoints<P: AsRef<Path>>(path: P) -> Result<Vec<JointAngles>, MonitorError> {
    let content = fs::read_to_string(path).map_err(|e| MonitorError::Io(e.to_string()))?;
    parse_waypoints(&content)
}

//! 安全配置档案
//!
//! 历史上安全距离、限速、工作空间边界的多个参数集在代码里
//! 抄来抄去。这里把所有阈值统一成配置数据：一套规范算法 +
//! 一个可加载的档案。"哪个版本才是对的"不写进代码。
//!
//! 档案可以从 TOML 文件加载/保存，缺省字段回落到参考机型的
//! 标定值。所有表格在 `validate()` 里一次性验证，之后的检查
//! 路径不再出现查表失败。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use sentinel_kinematics::DhTable;

use crate::collision::{LINK_COUNT, SafeDistanceTable};
use crate::error::ConfigError;
use crate::ground::GroundConfig;
use crate::interpolate::WrapMode;
use crate::rate::SpeedLimits;
use crate::workspace::WorkspaceRegion;

/// 安全距离表的单条配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafeDistanceEntry {
    /// 连杆 a（1-5）
    pub a: u8,
    /// 连杆 b（1-5，非相邻）
    pub b: u8,
    /// 最小许可间隙（米）
    pub min_clearance: f64,
}

/// 监督器的完整配置面
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyProfile {
    /// 连续监控的采样间隔（秒）
    pub sample_interval_secs: f64,
    /// 段验证的插值步数（含端点）
    pub interpolation_steps: usize,
    /// 插值包裹模式
    pub wrap_mode: WrapMode,
    /// 连杆直径（米），连杆 1-5
    pub link_diameters: [f64; LINK_COUNT],
    /// 逐关节限速
    pub speed_limits: SpeedLimits,
    /// DH 参数表
    pub dh_params: DhTable,
    /// 安全距离表条目
    pub safe_distances: Vec<SafeDistanceEntry>,
    /// 地面检查配置
    pub ground: GroundConfig,
    /// 允许工作区域
    pub workspace: WorkspaceRegion,
}

impl SafetyProfile {
    /// 参考机型档案
    pub fn reference() -> Self {
        SafetyProfile {
            dh_params: DhTable::reference(),
            link_diameters: [0.128, 0.09, 0.09, 0.065, 0.065],
            safe_distances: vec![
                SafeDistanceEntry { a: 1, b: 3, min_clearance: 0.05 },
                SafeDistanceEntry { a: 1, b: 4, min_clearance: 0.05 },
                SafeDistanceEntry { a: 1, b: 5, min_clearance: 0.08 },
                SafeDistanceEntry { a: 2, b: 4, min_clearance: 0.001 },
                SafeDistanceEntry { a: 2, b: 5, min_clearance: 0.01 },
                SafeDistanceEntry { a: 3, b: 5, min_clearance: 0.01 },
            ],
            speed_limits: SpeedLimits::reference(),
            ground: GroundConfig::reference(),
            workspace: WorkspaceRegion::reference(),
            sample_interval_secs: 0.1,
            interpolation_steps: 101,
            wrap_mode: WrapMode::ShortestPath,
        }
    }

    /// 从安全距离条目构建验证过的表
    pub fn safe_distance_table(&self) -> Result<SafeDistanceTable, ConfigError> {
        let entries: Vec<(u8, u8, f64)> = self
            .safe_distances
            .iter()
            .map(|e| (e.a, e.b, e.min_clearance))
            .collect();
        SafeDistanceTable::from_entries(&entries)
    }

    /// 一次性验证全部配置，失败即拒绝整个档案
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.safe_distance_table()?;
        self.speed_limits.validate()?;
        self.ground.validate()?;
        self.workspace.validate()?;
        for diameter in self.link_diameters {
            if diameter <= 0.0 {
                return Err(ConfigError::NonPositive {
                    what: "link diameter",
                    value: diameter,
                });
            }
        }
        if self.sample_interval_secs <= 0.0 {
            return Err(ConfigError::NonPositive {
                what: "sample interval",
                value: self.sample_interval_secs,
            });
        }
        if self.interpolation_steps < 2 {
            return Err(ConfigError::TooFewSteps {
                steps: self.interpolation_steps,
            });
        }
        Ok(())
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let profile: SafetyProfile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// 从文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// 保存到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

impl Default for SafetyProfile {
    fn default() -> Self {
        Self::reference()
    }
}

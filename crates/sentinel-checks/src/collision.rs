//! 胶囊体自碰撞检查
//!
//! 从当前关节坐标构建 5 个连杆胶囊体（关节 i → i+1），对安全
//! 距离表中登记的每个非相邻连杆对计算间隙并与阈值比较。
//!
//! # 约定（一次固定，处处一致）
//!
//! - 胶囊体半径 = 配置连杆直径 / 4。历史参数集里的减半做了两次，
//!   阈值表就是按这个口径标定的，这里直接按四分之一直径建模。
//! - 间隙恰好等于阈值判 SAFE：不安全分支是严格的
//!   `clearance < threshold`。
//! - 相邻连杆对（i, i+1）永远共享一个关节，distance 恒为 0，
//!   不登记、不检查；安全距离表在构建时就拒绝相邻对。

use nalgebra::Point3;
use sentinel_kinematics::JointArray;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::capsule::Capsule;
use crate::error::ConfigError;

/// 连杆数量（6 个关节 → 5 根连杆）
pub const LINK_COUNT: usize = 5;

/// 无序的非相邻连杆对，构建时已验证
///
/// 恒有 `a < b`，`b > a + 1`，两端都在 1..=5 范围内。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkPair {
    a: u8,
    b: u8,
}

impl LinkPair {
    /// 创建连杆对，自动归一化顺序
    pub fn new(first: u8, second: u8) -> Result<Self, ConfigError> {
        for link in [first, second] {
            if link < 1 || link as usize > LINK_COUNT {
                return Err(ConfigError::LinkOutOfRange { link });
            }
        }
        if first == second {
            return Err(ConfigError::SelfPair { link: first });
        }
        let (a, b) = if first < second {
            (first, second)
        } else {
            (second, first)
        };
        if b == a + 1 {
            return Err(ConfigError::AdjacentPair { a, b });
        }
        Ok(LinkPair { a, b })
    }

    /// 较小的连杆编号
    #[inline]
    pub fn a(self) -> u8 {
        self.a
    }

    /// 较大的连杆编号
    #[inline]
    pub fn b(self) -> u8 {
        self.b
    }
}

impl fmt::Display for LinkPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

/// 安全距离表
///
/// 配置加载时构建并验证一次，之后按索引直接查询。缺席的对
/// 不属于检查范围（不是"永远安全"，是不检查）。
#[derive(Debug, Clone, PartialEq)]
pub struct SafeDistanceTable {
    thresholds: [[Option<f64>; LINK_COUNT]; LINK_COUNT],
    pairs: Vec<(LinkPair, f64)>,
}

impl SafeDistanceTable {
    /// 从 (连杆, 连杆, 最小间隙) 条目构建
    pub fn from_entries(entries: &[(u8, u8, f64)]) -> Result<Self, ConfigError> {
        let mut thresholds = [[None; LINK_COUNT]; LINK_COUNT];
        let mut pairs = Vec::with_capacity(entries.len());
        for &(first, second, min_clearance) in entries {
            let pair = LinkPair::new(first, second)?;
            if min_clearance < 0.0 {
                return Err(ConfigError::Negative {
                    what: "safe distance",
                    value: min_clearance,
                });
            }
            let slot = &mut thresholds[pair.a as usize - 1][pair.b as usize - 1];
            if slot.is_some() {
                return Err(ConfigError::DuplicatePair {
                    a: pair.a,
                    b: pair.b,
                });
            }
            *slot = Some(min_clearance);
            pairs.push((pair, min_clearance));
        }
        pairs.sort_by_key(|(p, _)| (p.a, p.b));
        Ok(SafeDistanceTable { thresholds, pairs })
    }

    /// 参考机型的标定阈值（米）
    pub fn reference() -> Self {
        Self::from_entries(&[
            (1, 3, 0.05),
            (1, 4, 0.05),
            (1, 5, 0.08),
            (2, 4, 0.001),
            (2, 5, 0.01),
            (3, 5, 0.01),
        ])
        .expect("reference table is well-formed")
    }

    /// 查询某对的阈值；`None` 表示该对不在检查范围内
    #[inline]
    pub fn threshold(&self, pair: LinkPair) -> Option<f64> {
        self.thresholds[pair.a as usize - 1][pair.b as usize - 1]
    }

    /// 按 (a, b) 升序遍历所有登记的对
    pub fn iter(&self) -> impl Iterator<Item = (LinkPair, f64)> + '_ {
        self.pairs.iter().copied()
    }

    /// 登记的对数
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// 是否为空表
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for SafeDistanceTable {
    fn default() -> Self {
        Self::reference()
    }
}

/// 单个连杆对的检查结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairClearance {
    /// 被检查的连杆对
    pub pair: LinkPair,
    /// 实测间隙（米，可为负）
    pub clearance: f64,
    /// 要求的最小间隙
    pub threshold: f64,
    /// 判定：`clearance >= threshold`
    pub safe: bool,
}

/// 一次自碰撞检查的完整结果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollisionVerdict {
    /// 逐对结果，(a, b) 升序
    pub pairs: SmallVec<[PairClearance; 8]>,
}

impl CollisionVerdict {
    /// 所有登记的对都安全
    pub fn is_safe(&self) -> bool {
        self.pairs.iter().all(|p| p.safe)
    }

    /// 不安全的对
    pub fn failing(&self) -> impl Iterator<Item = &PairClearance> {
        self.pairs.iter().filter(|p| !p.safe)
    }

    /// 按对查询判定
    pub fn get(&self, pair: LinkPair) -> Option<&PairClearance> {
        self.pairs.iter().find(|p| p.pair == pair)
    }
}

/// 自碰撞检查器
///
/// 配置一次，检查任意次。每次检查在栈上的定长数组里重建
/// 胶囊体，不做动态映射分配。
#[derive(Debug, Clone)]
pub struct SelfCollisionChecker {
    radii: [f64; LINK_COUNT],
    table: SafeDistanceTable,
}

impl SelfCollisionChecker {
    /// 用连杆直径（米）和安全距离表创建
    pub fn new(link_diameters: [f64; LINK_COUNT], table: SafeDistanceTable) -> Result<Self, ConfigError> {
        let mut radii = [0.0; LINK_COUNT];
        for (i, diameter) in link_diameters.into_iter().enumerate() {
            if diameter <= 0.0 {
                return Err(ConfigError::NonPositive {
                    what: "link diameter",
                    value: diameter,
                });
            }
            // 标定口径：半径 = 直径 / 4
            radii[i] = diameter / 4.0;
        }
        Ok(SelfCollisionChecker { radii, table })
    }

    /// 参考机型配置
    pub fn reference() -> Self {
        Self::new(
            [0.128, 0.09, 0.09, 0.065, 0.065],
            SafeDistanceTable::reference(),
        )
        .expect("reference diameters are positive")
    }

    /// 对一组关节坐标执行全部登记对的间隙检查
    pub fn check(&self, coordinates: &JointArray<Point3<f64>>) -> CollisionVerdict {
        let capsules: [Capsule; LINK_COUNT] = std::array::from_fn(|i| {
            Capsule::new(coordinates[i], coordinates[i + 1], self.radii[i])
        });

        let mut verdict = CollisionVerdict::default();
        for (pair, threshold) in self.table.iter() {
            let clearance = capsules[pair.a as usize - 1].clearance(&capsules[pair.b as usize - 1]);
            verdict.pairs.push(PairClearance {
                pair,
                clearance,
                threshold,
                safe: clearance >= threshold,
            });
        }
        verdict
    }

    /// 检查表
    pub fn table(&self) -> &SafeDistanceTable {
        &self.table
    }
}

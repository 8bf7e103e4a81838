//! 胶囊体与线段距离几何
//!
//! 每根连杆建模为一个胶囊体：相邻两个关节坐标构成的线段加一个
//! 半径。两根连杆的间隙 = 两线段最近点距离 − 两半径之和。
//!
//! # 最近点算法
//!
//! 标准参数化方法：最小化 `‖(P1 + s·d1) − (P2 + t·d2)‖²`，
//! 解 2×2 正规方程（a = d1·d1, b = d1·d2, c = d2·d2,
//! d = d1·r, e = d2·r, denom = a·c − b²）得到 s，截断到 [0, 1]
//! 后按该 s 解 t；t 若也被截断到端点，再按截断后的 t 重解一次 s。
//! 这一步补解保证结果是线段（而非无限直线）上的真最小值。
//! `|denom| < 1e-6` 时两轴近似平行，正规方程退化；此时以 s = 0
//! 为种子走同一条补解路径，避免除以近零值。退化情形在这里局部
//! 恢复，从不作为错误上抛。

use nalgebra::Point3;

/// 平行退化判定阈值
const PARALLEL_EPS: f64 = 1e-6;

/// 胶囊体：一根连杆的简化碰撞体
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    /// 线段起点（关节 i 坐标）
    pub start: Point3<f64>,
    /// 线段终点（关节 i+1 坐标）
    pub end: Point3<f64>,
    /// 半径（米）
    pub radius: f64,
}

impl Capsule {
    /// 创建胶囊体
    pub fn new(start: Point3<f64>, end: Point3<f64>, radius: f64) -> Self {
        Capsule { start, end, radius }
    }

    /// 两胶囊体的间隙：线段距离 − 半径之和
    ///
    /// 负值表示表面已经重叠。
    pub fn clearance(&self, other: &Capsule) -> f64 {
        let (p, q) = closest_points_between_segments(self.start, self.end, other.start, other.end);
        (q - p).norm() - (self.radius + other.radius)
    }
}

/// 两条有限线段之间的最近点对
///
/// 返回 `(segment1 上的点, segment2 上的点)`。
pub fn closest_points_between_segments(
    p1: Point3<f64>,
    q1: Point3<f64>,
    p2: Point3<f64>,
    q2: Point3<f64>,
) -> (Point3<f64>, Point3<f64>) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;

    let a = d1.dot(&d1);
    let b = d1.dot(&d2);
    let c = d2.dot(&d2);
    let d = d1.dot(&r);
    let e = d2.dot(&r);

    // 两条线段都退化成点
    if a < PARALLEL_EPS && c < PARALLEL_EPS {
        return (p1, p2);
    }

    let mut s = if a < PARALLEL_EPS {
        0.0
    } else if c < PARALLEL_EPS {
        (-d / a).clamp(0.0, 1.0)
    } else {
        let denom = a * c - b * b;
        if denom.abs() < PARALLEL_EPS {
            // 平行退化：种子 s = 0，靠下面的补解落到正确端点
            0.0
        } else {
            ((b * e - c * d) / denom).clamp(0.0, 1.0)
        }
    };

    // 给定 s 下的最优 t
    let mut t = if c < PARALLEL_EPS {
        0.0
    } else {
        (b * s + e) / c
    };

    // t 被截断到端点后，原来的 s 不再最优，按截断后的 t 重解
    if t < 0.0 {
        t = 0.0;
        if a > PARALLEL_EPS {
            s = (-d / a).clamp(0.0, 1.0);
        }
    } else if t > 1.0 {
        t = 1.0;
        if a > PARALLEL_EPS {
            s = ((b - d) / a).clamp(0.0, 1.0);
        }
    }

    (p1 + d1 * s, p2 + d2 * t)
}

//! 正向运动学
//!
//! 把关节角度向量映射为各关节的三维坐标。
//!
//! # 算法
//!
//! 对每个关节 i 按 DH 约定构建局部变换：
//!
//! ```text
//! T(θ, α, a, d) = | cosθ  -sinθ·cosα   sinθ·sinα   a·cosθ |
//!                 | sinθ   cosθ·cosα  -cosθ·sinα   a·sinθ |
//!                 |   0        sinα        cosα         d |
//!                 |   0           0           0         1 |
//! ```
//!
//! 累乘 `C_i = C_{i-1} · T_i`，关节 i 的坐标即 `C_i` 的平移列。
//! θ 不做任何截断或包裹，三角函数的周期性覆盖任意实数输入。
//! 纯函数：相同输入永远产生相同坐标，每次调用重新计算。

use nalgebra::{Matrix4, Point3};

use crate::dh::DhTable;
use crate::joint::{JointAngles, JointArray};

/// 正向运动学引擎
///
/// 持有只读 DH 表，无其他状态。
#[derive(Debug, Clone)]
pub struct ForwardKinematics {
    table: DhTable,
}

impl ForwardKinematics {
    /// 用给定 DH 表创建
    pub fn new(table: DhTable) -> Self {
        ForwardKinematics { table }
    }

    /// 单关节局部 DH 变换
    fn local_transform(&self, index: usize, theta: f64) -> Matrix4<f64> {
        let row = self.table.row(index);
        let (st, ct) = (theta.sin(), theta.cos());
        let (sa, ca) = (row.alpha.sin(), row.alpha.cos());
        Matrix4::new(
            ct,
            -st * ca,
            st * sa,
            row.a * ct,
            st,
            ct * ca,
            -ct * sa,
            row.a * st,
            0.0,
            sa,
            ca,
            row.d,
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    /// 各关节的累积变换矩阵 `C_1..C_6`
    pub fn frames(&self, angles: &JointAngles) -> [Matrix4<f64>; 6] {
        let mut frames = [Matrix4::identity(); 6];
        let mut cumulative = Matrix4::identity();
        for (i, theta) in angles.iter().enumerate() {
            cumulative *= self.local_transform(i, theta.value());
            frames[i] = cumulative;
        }
        frames
    }

    /// 各关节的三维坐标
    ///
    /// 索引 0 对应关节 1，依此类推。
    pub fn joint_positions(&self, angles: &JointAngles) -> JointArray<Point3<f64>> {
        let frames = self.frames(angles);
        JointArray::new(frames.map(|c| Point3::new(c[(0, 3)], c[(1, 3)], c[(2, 3)])))
    }
}

impl Default for ForwardKinematics {
    fn default() -> Self {
        Self::new(DhTable::reference())
    }
}

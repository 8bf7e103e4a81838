//! 强类型角度单位
//!
//! 使用 NewType 模式表示弧度，防止与裸 `f64`（米、秒等）混用。
//! 编译后与原始类型零开销。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// 弧度（NewType）
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rad(pub f64);

impl Rad {
    /// 创建新的弧度值
    #[inline]
    pub const fn new(value: f64) -> Self {
        Rad(value)
    }

    /// 获取原始值
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// 计算正弦值
    #[inline]
    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    /// 计算余弦值
    #[inline]
    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    /// 取绝对值
    #[inline]
    pub fn abs(self) -> Self {
        Rad(self.0.abs())
    }

    /// 归一化到 `[-π, π]` 范围
    ///
    /// 最短角度路径插值依赖这个包裹操作。
    pub fn normalize(self) -> Self {
        let mut angle = self.0 % std::f64::consts::TAU;
        if angle > std::f64::consts::PI {
            angle -= std::f64::consts::TAU;
        } else if angle < -std::f64::consts::PI {
            angle += std::f64::consts::TAU;
        }
        Rad(angle)
    }
}

impl fmt::Display for Rad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} rad", self.0)
    }
}

impl Add for Rad {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Rad(self.0 + rhs.0)
    }
}

impl AddAssign for Rad {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Rad {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Rad(self.0 - rhs.0)
    }
}

impl SubAssign for Rad {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Mul<f64> for Rad {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Rad(self.0 * rhs)
    }
}

impl Div<f64> for Rad {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Rad(self.0 / rhs)
    }
}

impl Neg for Rad {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Rad(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_within_range() {
        assert!((Rad(1.0).normalize().0 - 1.0).abs() < 1e-12);
        assert!((Rad(-3.0).normalize().0 + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_wraps_over_pi() {
        let wrapped = Rad(3.1444).normalize();
        assert!((wrapped.0 - (3.1444 - std::f64::consts::TAU)).abs() < 1e-12);
        assert!(wrapped.0 < 0.0);
    }

    #[test]
    fn test_normalize_multiple_turns() {
        let wrapped = Rad(5.0 * std::f64::consts::PI).normalize();
        assert!((wrapped.0.abs() - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let a = Rad(1.5) + Rad(0.5) - Rad(1.0);
        assert!((a.0 - 1.0).abs() < 1e-12);
        assert!(((Rad(2.0) * 0.5).0 - 1.0).abs() < 1e-12);
        assert!(((Rad(2.0) / 4.0).0 - 0.5).abs() < 1e-12);
        assert!(((-Rad(1.0)).0 + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Rad(1.5)), "1.5000 rad");
    }
}

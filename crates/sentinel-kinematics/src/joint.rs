//! 关节索引和数组
//!
//! 提供编译期安全的 6 关节索引和定长数组容器。监督器的所有
//! 逐关节数据（角度、速度限制、地面判定）都用这两个类型表示，
//! 杜绝越界和长度错误。
//!
//! # 示例
//!
//! ```rust
//! use sentinel_kinematics::{Joint, JointAngles, Rad};
//!
//! let angles = JointAngles::from_radians([0.0, -1.57, 0.6, 0.0, 1.57, 0.0]);
//! assert_eq!(angles[Joint::J2], Rad(-1.57));
//! ```

use super::units::Rad;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use thiserror::Error;

/// 角度向量长度错误
///
/// 从外部切片（轨迹文件、实时反馈）构造 [`JointAngles`] 时，
/// 长度不等于 6 立即在调用边界失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected an angle vector of length {expected}, got {actual}")]
pub struct ShapeError {
    /// 期望长度（恒为 6）
    pub expected: usize,
    /// 实际长度
    pub actual: usize,
}

/// 关节枚举
///
/// 表示 6 关节机械臂的各个关节。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joint {
    /// 关节 1（基座旋转）
    J1 = 0,
    /// 关节 2（肩部俯仰）
    J2 = 1,
    /// 关节 3（肘部俯仰）
    J3 = 2,
    /// 关节 4（腕部旋转）
    J4 = 3,
    /// 关节 5（腕部俯仰）
    J5 = 4,
    /// 关节 6（末端旋转）
    J6 = 5,
}

impl Joint {
    /// 所有关节的数组
    pub const ALL: [Joint; 6] = [
        Joint::J1,
        Joint::J2,
        Joint::J3,
        Joint::J4,
        Joint::J5,
        Joint::J6,
    ];

    /// 获取关节索引（0-5）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 关节编号（1-6，与 DH 表和配置文件一致）
    #[inline]
    pub const fn number(self) -> usize {
        self as usize + 1
    }

    /// 从索引创建关节（范围检查）
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Joint::J1),
            1 => Some(Joint::J2),
            2 => Some(Joint::J3),
            3 => Some(Joint::J4),
            4 => Some(Joint::J5),
            5 => Some(Joint::J6),
            _ => None,
        }
    }

    /// 获取关节名称
    pub const fn name(self) -> &'static str {
        match self {
            Joint::J1 => "J1",
            Joint::J2 => "J2",
            Joint::J3 => "J3",
            Joint::J4 => "J4",
            Joint::J5 => "J5",
            Joint::J6 => "J6",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 关节数组
///
/// 类型安全的 6 元素容器，支持索引、迭代和映射操作。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointArray<T> {
    data: [T; 6],
}

impl<T: Copy> Copy for JointArray<T> {}

impl<T> JointArray<T> {
    /// 创建新的关节数组
    #[inline]
    pub const fn new(data: [T; 6]) -> Self {
        JointArray { data }
    }

    /// 获取内部数组的引用
    #[inline]
    pub fn as_array(&self) -> &[T; 6] {
        &self.data
    }

    /// 迭代器
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// 映射转换
    pub fn map<U, F>(self, mut f: F) -> JointArray<U>
    where
        F: FnMut(T) -> U,
    {
        let [a, b, c, d, e, g] = self.data;
        JointArray::new([f(a), f(b), f(c), f(d), f(e), f(g)])
    }

    /// 按元素对执行映射
    pub fn map_with<U, V, F>(self, other: JointArray<U>, mut f: F) -> JointArray<V>
    where
        F: FnMut(T, U) -> V,
    {
        let [a1, b1, c1, d1, e1, f1] = self.data;
        let [a2, b2, c2, d2, e2, f2] = other.data;
        JointArray::new([
            f(a1, a2),
            f(b1, b2),
            f(c1, c2),
            f(d1, d2),
            f(e1, e2),
            f(f1, f2),
        ])
    }
}

impl<T: Copy> JointArray<T> {
    /// 创建所有元素相同的数组
    #[inline]
    pub const fn splat(value: T) -> Self {
        JointArray::new([value; 6])
    }
}

impl<T> Index<Joint> for JointArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, joint: Joint) -> &T {
        &self.data[joint.index()]
    }
}

impl<T> IndexMut<Joint> for JointArray<T> {
    #[inline]
    fn index_mut(&mut self, joint: Joint) -> &mut T {
        &mut self.data[joint.index()]
    }
}

impl<T> Index<usize> for JointArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for JointArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T> From<[T; 6]> for JointArray<T> {
    #[inline]
    fn from(data: [T; 6]) -> Self {
        JointArray::new(data)
    }
}

impl<T> From<JointArray<T>> for [T; 6] {
    #[inline]
    fn from(arr: JointArray<T>) -> Self {
        arr.data
    }
}

impl<T> IntoIterator for JointArray<T> {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, 6>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a JointArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// 关节角度向量（弧度）
pub type JointAngles = JointArray<Rad>;

impl JointAngles {
    /// 从弧度原始值数组构造
    #[inline]
    pub fn from_radians(values: [f64; 6]) -> Self {
        JointArray::new(values.map(Rad))
    }

    /// 从任意长度切片构造，长度不为 6 时返回 [`ShapeError`]
    pub fn from_radians_slice(values: &[f64]) -> Result<Self, ShapeError> {
        let data: [f64; 6] = values.try_into().map_err(|_| ShapeError {
            expected: 6,
            actual: values.len(),
        })?;
        Ok(Self::from_radians(data))
    }

    /// 导出为弧度原始值数组
    #[inline]
    pub fn to_radians(self) -> [f64; 6] {
        self.data.map(Rad::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_index_roundtrip() {
        for joint in Joint::ALL {
            assert_eq!(Joint::from_index(joint.index()), Some(joint));
        }
        assert_eq!(Joint::from_index(6), None);
    }

    #[test]
    fn test_joint_number() {
        assert_eq!(Joint::J1.number(), 1);
        assert_eq!(Joint::J6.number(), 6);
    }

    #[test]
    fn test_joint_name() {
        assert_eq!(Joint::J3.name(), "J3");
        assert_eq!(format!("{}", Joint::J5), "J5");
    }

    #[test]
    fn test_joint_array_indexing() {
        let mut arr = JointArray::new([1, 2, 3, 4, 5, 6]);
        assert_eq!(arr[Joint::J1], 1);
        assert_eq!(arr[5], 6);
        arr[Joint::J4] = 40;
        assert_eq!(arr[3], 40);
    }

    #[test]
    fn test_joint_array_map_with() {
        let a = JointArray::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = JointArray::splat(0.5);
        let c = a.map_with(b, |x, y| x * y);
        assert_eq!(c[Joint::J2], 1.0);
        assert_eq!(c[Joint::J6], 3.0);
    }

    #[test]
    fn test_angles_from_slice_ok() {
        let angles = JointAngles::from_radians_slice(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap();
        assert_eq!(angles[Joint::J3], Rad(0.3));
    }

    #[test]
    fn test_angles_from_slice_wrong_length() {
        let err = JointAngles::from_radians_slice(&[0.1, 0.2, 0.3]).unwrap_err();
        assert_eq!(err.expected, 6);
        assert_eq!(err.actual, 3);

        let err = JointAngles::from_radians_slice(&[0.0; 7]).unwrap_err();
        assert_eq!(err.actual, 7);
    }

    #[test]
    fn test_angles_roundtrip() {
        let raw = [0.9509, -1.6623, 0.6353, -0.5976, -1.5722, 0.0];
        assert_eq!(JointAngles::from_radians(raw).to_radians(), raw);
    }
}

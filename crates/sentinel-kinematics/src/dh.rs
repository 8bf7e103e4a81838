//! Denavit–Hartenberg 参数表
//!
//! 每个关节一组常量 (α, a, d)，定义该关节的局部变换。参数在
//! 构造时加载一次，之后只读。默认值是参考机型（UR3e 级 6R 臂）
//! 的标定表。

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use crate::joint::JointArray;

/// 单关节 DH 参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DhRow {
    /// 扭转角 α（弧度）
    pub alpha: f64,
    /// 连杆长度 a（米）
    pub a: f64,
    /// 连杆偏移 d（米）
    pub d: f64,
}

/// 六关节 DH 参数表
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DhTable(pub JointArray<DhRow>);

impl DhTable {
    /// 参考机型的标定参数
    pub const fn reference() -> Self {
        const fn row(alpha: f64, a: f64, d: f64) -> DhRow {
            DhRow { alpha, a, d }
        }
        DhTable(JointArray::new([
            row(FRAC_PI_2, 0.0, 0.15185),
            row(0.0, -0.24355, 0.0),
            row(0.0, -0.2132, 0.0),
            row(FRAC_PI_2, 0.0, 0.13105),
            row(-FRAC_PI_2, 0.0, 0.08535),
            row(0.0, 0.0, 0.0921),
        ]))
    }

    /// 按索引（0-5）取一行
    #[inline]
    pub fn row(&self, index: usize) -> DhRow {
        self.0[index]
    }
}

impl Default for DhTable {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table_values() {
        let table = DhTable::default();
        assert_eq!(table.row(0).d, 0.15185);
        assert_eq!(table.row(1).a, -0.24355);
        assert_eq!(table.row(3).alpha, FRAC_PI_2);
        assert_eq!(table.row(4).alpha, -FRAC_PI_2);
        assert_eq!(table.row(5).d, 0.0921);
    }

    #[test]
    fn test_table_deserializes_from_json_like_list() {
        let json = r#"[
            {"alpha": 1.5707963267948966, "a": 0.0, "d": 0.15185},
            {"alpha": 0.0, "a": -0.24355, "d": 0.0},
            {"alpha": 0.0, "a": -0.2132, "d": 0.0},
            {"alpha": 1.5707963267948966, "a": 0.0, "d": 0.13105},
            {"alpha": -1.5707963267948966, "a": 0.0, "d": 0.08535},
            {"alpha": 0.0, "a": 0.0, "d": 0.0921}
        ]"#;
        let table: DhTable = serde_json::from_str(json).unwrap();
        assert_eq!(table, DhTable::reference());
    }
}

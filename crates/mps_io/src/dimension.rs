// crates/mps_io/src/dimension.rs

//! 空间维数与对应的列布局

use std::fmt;

/// 空间维数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// 二维
    Planar,
    /// 三维
    Spatial,
}

impl Dimension {
    /// 矢量分量数
    pub fn components(self) -> usize {
        match self {
            Self::Planar => 2,
            Self::Spatial => 3,
        }
    }

    /// 粒子文件的列注释
    pub fn lattice_columns(self) -> &'static str {
        match self {
            Self::Planar => "# x y vx vy type",
            Self::Spatial => "# x y z vx vy vz type",
        }
    }

    /// 粒子文件数据行的字段数（位置、速度与类型）
    pub fn lattice_fields(self) -> usize {
        2 * self.components() + 1
    }

    /// 由粒子文件数据行字段数推断
    pub fn from_lattice_fields(fields: usize) -> Option<Self> {
        [Self::Planar, Self::Spatial]
            .into_iter()
            .find(|d| d.lattice_fields() == fields)
    }

    /// 求解器输出帧的列名
    pub fn frame_columns(self) -> &'static [&'static str] {
        match self {
            Self::Planar => &["x", "y", "vx", "vy", "pressure", "type"],
            Self::Spatial => &["x", "y", "z", "vx", "vy", "vz", "pressure", "type"],
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planar => f.write_str("2D"),
            Self::Spatial => f.write_str("3D"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_counts() {
        assert_eq!(Dimension::Planar.lattice_fields(), 5);
        assert_eq!(Dimension::Spatial.lattice_fields(), 7);
        assert_eq!(Dimension::from_lattice_fields(7), Some(Dimension::Spatial));
        assert_eq!(Dimension::from_lattice_fields(6), None);
        assert_eq!(Dimension::Spatial.frame_columns().len(), 8);
    }
}

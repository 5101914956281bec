// crates/mps_core/src/lattice.rs

//! 格点索引与坐标映射
//!
//! 格点在概念上是无限的整数网格，坐标为 `index * spacing`。
//! 分类器只遍历一个有界索引盒，遍历顺序固定（i 最外层，k 最内层），
//! 以保证输出顺序确定。

use glam::{DVec2, DVec3};

/// 遍历盒格点数上限
///
/// 几何参数构造时按此上限拒绝过细的粒子间距，保证所有索引都能用 `i64` 表示。
pub const MAX_LATTICE_SITES: f64 = 1.0e9;

/// 闭区间整数索引范围 `[min, max]`
///
/// `min > max` 表示空范围。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    /// 下界（含）
    pub min: i64,
    /// 上界（含）
    pub max: i64,
}

impl IndexRange {
    /// 创建闭区间
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// 范围内的格点数
    pub fn len(&self) -> usize {
        if self.max < self.min {
            0
        } else {
            (self.max - self.min + 1) as usize
        }
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }

    /// 是否包含索引
    #[inline]
    pub fn contains(&self, index: i64) -> bool {
        index >= self.min && index <= self.max
    }

    /// 升序迭代
    pub fn iter(&self) -> std::ops::RangeInclusive<i64> {
        self.min..=self.max
    }
}

/// 二维格点索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Site2 {
    pub i: i64,
    pub j: i64,
}

/// 三维格点索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Site3 {
    pub i: i64,
    pub j: i64,
    pub k: i64,
}

impl Site2 {
    /// 格点坐标
    #[inline]
    pub fn position(&self, spacing: f64) -> DVec2 {
        DVec2::new(coordinate(self.i, spacing), coordinate(self.j, spacing))
    }
}

impl Site3 {
    /// 格点坐标
    #[inline]
    pub fn position(&self, spacing: f64) -> DVec3 {
        DVec3::new(
            coordinate(self.i, spacing),
            coordinate(self.j, spacing),
            coordinate(self.k, spacing),
        )
    }
}

/// 单轴坐标 `index * spacing`
#[inline]
pub fn coordinate(index: i64, spacing: f64) -> f64 {
    index as f64 * spacing
}

/// 二维遍历盒
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeBox2 {
    pub i: IndexRange,
    pub j: IndexRange,
}

impl LatticeBox2 {
    /// 盒内格点总数
    pub fn site_count(&self) -> usize {
        self.i.len() * self.j.len()
    }

    /// 按 i 外层、j 内层的顺序遍历
    pub fn sites(&self) -> impl Iterator<Item = Site2> {
        let j_range = self.j;
        self.i
            .iter()
            .flat_map(move |i| j_range.iter().map(move |j| Site2 { i, j }))
    }
}

/// 三维遍历盒
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeBox3 {
    pub i: IndexRange,
    pub j: IndexRange,
    pub k: IndexRange,
}

impl LatticeBox3 {
    /// 盒内格点总数
    pub fn site_count(&self) -> usize {
        self.i.len() * self.j.len() * self.k.len()
    }

    /// 按 i、j、k 的顺序遍历（k 最内层）
    pub fn sites(&self) -> impl Iterator<Item = Site3> {
        let j_range = self.j;
        let k_range = self.k;
        self.i.iter().flat_map(move |i| {
            j_range
                .iter()
                .flat_map(move |j| k_range.iter().map(move |k| Site3 { i, j, k }))
        })
    }
}

// crates/mps_core/src/classifier/mod.rs

//! 格点粒子分类器
//!
//! 遍历有界索引盒中的每个格点，按有序规则表为其指定唯一的区域类型，
//! 或将其丢弃。两种策略相互独立，边界判定规则刻意不统一：
//!
//! - [`ThreeTierPlanar`]: 二维，流体 / 壁面 / 虚粒子三层，左、下、右三面分层加厚
//! - [`TwoTierSpatial`]: 三维，流体 / 壁面两层，底面无条件为壁面，
//!   侧面（左、右、前、后）仅在 `j > 0` 时为壁面，顶面开放
//!
//! 两者共享的只有格点坐标映射（[`crate::lattice`]）与容差常量（[`crate::tolerance`]）。
//!
//! # 使用示例
//!
//! ```
//! use glam::DVec2;
//! use mps_core::classifier::{LatticeClassifier, ThreeTierPlanar};
//! use mps_core::geometry::PlanarGeometry;
//!
//! let geometry = PlanarGeometry::new(
//!     0.008,
//!     DVec2::new(0.584, 0.292),
//!     DVec2::new(0.146, 0.292),
//!     4,
//!     4,
//! )
//! .unwrap();
//! let particles = ThreeTierPlanar.classify(&geometry);
//! assert!(!particles.is_empty());
//! ```

pub mod planar;
pub mod spatial;

pub use planar::{PlanarFrame, ThreeTierPlanar};
pub use spatial::{SpatialFrame, TwoTierSpatial};

use crate::particle::{Particle, ParticleKind};

/// 格点分类器接口
///
/// 分类器是几何参数的纯函数：相同输入产生顺序与数值完全相同的粒子序列。
pub trait LatticeClassifier {
    /// 几何参数类型
    type Geometry;
    /// 坐标向量类型
    type Vector;

    /// 策略名称
    fn name(&self) -> &'static str;

    /// 生成全部粒子
    fn classify(&self, geometry: &Self::Geometry) -> Vec<Particle<Self::Vector>>;
}

/// 有序分类规则
///
/// 规则表自上而下匹配，首个命中的规则决定格点类型。
#[derive(Clone, Copy)]
pub struct Rule<F, S> {
    /// 规则名称（用于诊断）
    pub name: &'static str,
    /// 命中时的粒子类型
    pub kind: ParticleKind,
    /// 判定函数
    pub applies: fn(&F, S) -> bool,
}

impl<F, S> std::fmt::Debug for Rule<F, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// 按顺序匹配规则表，返回首个命中的规则
pub fn first_match<'a, F, S: Copy>(
    rules: &'a [Rule<F, S>],
    frame: &F,
    site: S,
) -> Option<&'a Rule<F, S>> {
    rules.iter().find(|rule| (rule.applies)(frame, site))
}

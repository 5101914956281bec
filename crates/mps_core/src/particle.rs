// crates/mps_core/src/particle.rs

//! 粒子数据模型
//!
//! 粒子在生成时一次性分类，之后只读。类型编码与外部求解器约定一致：
//! 0 = 流体，1 = 壁面，3 = 虚粒子，2 保留不用。

use std::fmt;

use crate::error::{MpsError, MpsResult};

/// 粒子区域类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParticleKind {
    /// 流体粒子
    Fluid,
    /// 壁面粒子
    Wall,
    /// 虚粒子（补全壁面粒子的核函数支撑域）
    Dummy,
}

impl ParticleKind {
    /// 全部类型（按编码升序）
    pub const ALL: [ParticleKind; 3] = [Self::Fluid, Self::Wall, Self::Dummy];

    /// 求解器类型编码
    pub fn code(self) -> u8 {
        match self {
            Self::Fluid => 0,
            Self::Wall => 1,
            Self::Dummy => 3,
        }
    }

    /// 由编码解析，2 为保留编码
    pub fn from_code(code: i64) -> MpsResult<Self> {
        match code {
            0 => Ok(Self::Fluid),
            1 => Ok(Self::Wall),
            3 => Ok(Self::Dummy),
            _ => Err(MpsError::UnknownParticleType { code }),
        }
    }

    /// 名称
    pub fn name(self) -> &'static str {
        match self {
            Self::Fluid => "fluid",
            Self::Wall => "wall",
            Self::Dummy => "dummy",
        }
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 粒子
///
/// `V` 为 `glam::DVec2` 或 `glam::DVec3`。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle<V> {
    /// 位置 [m]
    pub position: V,
    /// 速度 [m/s]
    pub velocity: V,
    /// 区域类型
    pub kind: ParticleKind,
}

impl<V: Default> Particle<V> {
    /// 创建静止粒子
    pub fn at_rest(position: V, kind: ParticleKind) -> Self {
        Self {
            position,
            velocity: V::default(),
            kind,
        }
    }
}

/// 二维粒子
pub type Particle2 = Particle<glam::DVec2>;
/// 三维粒子
pub type Particle3 = Particle<glam::DVec3>;

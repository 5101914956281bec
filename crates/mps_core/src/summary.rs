// crates/mps_core/src/summary.rs

//! 粒子集合统计

use std::fmt;

use crate::particle::{Particle, ParticleKind};

/// 各区域粒子数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParticleSummary {
    /// 流体粒子数
    pub fluid: usize,
    /// 壁面粒子数
    pub wall: usize,
    /// 虚粒子数
    pub dummy: usize,
    /// 总数
    pub total: usize,
}

impl ParticleSummary {
    /// 统计粒子序列（单次遍历）
    pub fn from_particles<V>(particles: &[Particle<V>]) -> Self {
        Self::from_kinds(particles.iter().map(|p| p.kind))
    }

    /// 统计类型序列
    pub fn from_kinds(kinds: impl IntoIterator<Item = ParticleKind>) -> Self {
        let mut summary = Self::default();
        for kind in kinds {
            match kind {
                ParticleKind::Fluid => summary.fluid += 1,
                ParticleKind::Wall => summary.wall += 1,
                ParticleKind::Dummy => summary.dummy += 1,
            }
            summary.total += 1;
        }
        summary
    }

    /// 指定类型的粒子数
    pub fn count(&self, kind: ParticleKind) -> usize {
        match kind {
            ParticleKind::Fluid => self.fluid,
            ParticleKind::Wall => self.wall,
            ParticleKind::Dummy => self.dummy,
        }
    }

    /// 边界粒子数（壁面 + 虚粒子）
    pub fn boundary(&self) -> usize {
        self.wall + self.dummy
    }
}

impl fmt::Display for ParticleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fluid, {} wall, {} dummy, {} total",
            self.fluid, self.wall, self.dummy, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_empty() {
        let summary = ParticleSummary::from_particles::<DVec2>(&[]);
        assert_eq!(summary, ParticleSummary::default());
    }

    #[test]
    fn test_counts() {
        let kinds = [
            ParticleKind::Fluid,
            ParticleKind::Wall,
            ParticleKind::Wall,
            ParticleKind::Dummy,
            ParticleKind::Fluid,
            ParticleKind::Fluid,
        ];
        let particles: Vec<_> = kinds
            .iter()
            .map(|&k| Particle::at_rest(DVec2::ZERO, k))
            .collect();
        let summary = ParticleSummary::from_particles(&particles);
        assert_eq!(summary.fluid, 3);
        assert_eq!(summary.wall, 2);
        assert_eq!(summary.dummy, 1);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.boundary(), 3);
        assert_eq!(summary.count(ParticleKind::Wall), 2);
    }

    #[test]
    fn test_display() {
        let summary = ParticleSummary {
            fluid: 648,
            wall: 608,
            dummy: 672,
            total: 1928,
        };
        assert_eq!(summary.to_string(), "648 fluid, 608 wall, 672 dummy, 1928 total");
    }
}

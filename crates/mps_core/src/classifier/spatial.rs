// crates/mps_core/src/classifier/spatial.rs

//! 三维两层分类器（溃坝水箱）
//!
//! 只有流体与壁面两类粒子。底面 `j <= 0` 无条件为壁面；左、右、前、后
//! 四个侧面只在底面以上（`j > 0`）才是壁面；顶面开放。
//!
//! 流体判定使用开区间：下界严格 `> 0.0`，上界 `< fluid - ε`。
//! 这与二维的闭区间判定不同，两者不能合并。

use glam::DVec3;
use tracing::debug;

use super::{first_match, LatticeClassifier, Rule};
use crate::geometry::SpatialGeometry;
use crate::lattice::{IndexRange, LatticeBox3, Site3};
use crate::particle::{Particle, ParticleKind};
use crate::tolerance;

/// 三维分类所需的预计算量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialFrame {
    spacing: f64,
    domain: DVec3,
    fluid: DVec3,
    wall_layers: i64,
}

/// 三维规则表：壁面规则在前，流体规则最后
pub static SPATIAL_RULES: [Rule<SpatialFrame, Site3>; 6] = [
    Rule {
        name: "wall_floor",
        kind: ParticleKind::Wall,
        applies: wall_floor,
    },
    Rule {
        name: "wall_left",
        kind: ParticleKind::Wall,
        applies: wall_left,
    },
    Rule {
        name: "wall_right",
        kind: ParticleKind::Wall,
        applies: wall_right,
    },
    Rule {
        name: "wall_front",
        kind: ParticleKind::Wall,
        applies: wall_front,
    },
    Rule {
        name: "wall_back",
        kind: ParticleKind::Wall,
        applies: wall_back,
    },
    Rule {
        name: "fluid_block",
        kind: ParticleKind::Fluid,
        applies: fluid_block,
    },
];

fn wall_floor(_frame: &SpatialFrame, site: Site3) -> bool {
    site.j <= 0
}

fn wall_left(_frame: &SpatialFrame, site: Site3) -> bool {
    site.i <= 0 && site.j > 0
}

fn wall_right(frame: &SpatialFrame, site: Site3) -> bool {
    let x = site.position(frame.spacing).x;
    tolerance::at_least(x, frame.domain.x) && site.j > 0
}

fn wall_front(_frame: &SpatialFrame, site: Site3) -> bool {
    site.k <= 0 && site.j > 0
}

fn wall_back(frame: &SpatialFrame, site: Site3) -> bool {
    let z = site.position(frame.spacing).z;
    tolerance::at_least(z, frame.domain.z) && site.j > 0
}

fn fluid_block(frame: &SpatialFrame, site: Site3) -> bool {
    let p = site.position(frame.spacing);
    let open = |value: f64, bound: f64| value > 0.0 && tolerance::strictly_below(value, bound);
    open(p.x, frame.fluid.x) && open(p.y, frame.fluid.y) && open(p.z, frame.fluid.z)
}

impl SpatialFrame {
    /// 由几何参数计算
    pub fn new(geometry: &SpatialGeometry) -> Self {
        Self {
            spacing: geometry.spacing(),
            domain: geometry.domain(),
            fluid: geometry.fluid(),
            wall_layers: i64::from(geometry.wall_layers()),
        }
    }

    /// 遍历盒
    ///
    /// 上界按 `floor(domain / l0)` 截断，y 方向不向上加厚。
    pub fn lattice_box(&self) -> LatticeBox3 {
        let margin = self.wall_layers - 1;
        let n = |extent: f64| (extent / self.spacing).floor() as i64;
        LatticeBox3 {
            i: IndexRange::new(-margin, n(self.domain.x) + margin),
            j: IndexRange::new(-margin, n(self.domain.y)),
            k: IndexRange::new(-margin, n(self.domain.z) + margin),
        }
    }

    /// 命中格点的规则，`None` 表示丢弃
    pub fn matching_rule(&self, site: Site3) -> Option<&'static Rule<SpatialFrame, Site3>> {
        first_match(&SPATIAL_RULES, self, site)
    }

    /// 格点类型，`None` 表示丢弃
    pub fn classify_site(&self, site: Site3) -> Option<ParticleKind> {
        self.matching_rule(site).map(|rule| rule.kind)
    }
}

/// 三维两层分类策略
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoTierSpatial;

impl LatticeClassifier for TwoTierSpatial {
    type Geometry = SpatialGeometry;
    type Vector = DVec3;

    fn name(&self) -> &'static str {
        "spatial-two-tier"
    }

    fn classify(&self, geometry: &SpatialGeometry) -> Vec<Particle<DVec3>> {
        let frame = SpatialFrame::new(geometry);
        let lattice = frame.lattice_box();
        debug!(
            "三维遍历盒: i={:?}, j={:?}, k={:?}, 格点数={}",
            lattice.i,
            lattice.j,
            lattice.k,
            lattice.site_count()
        );

        let mut particles = Vec::new();
        for site in lattice.sites() {
            if let Some(kind) = frame.classify_site(site) {
                particles.push(Particle::at_rest(site.position(frame.spacing), kind));
            }
        }
        particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tank(wall: i64) -> SpatialGeometry {
        SpatialGeometry::new(
            0.025,
            DVec3::new(0.4, 0.3, 0.2),
            DVec3::new(0.10, 0.20, 0.20),
            wall,
        )
        .unwrap()
    }

    #[test]
    fn test_lattice_box() {
        let b = SpatialFrame::new(&tank(3)).lattice_box();
        assert_eq!(b.i, IndexRange::new(-2, 18));
        // 0.3 / 0.025 = 11.999999999999998
        assert_eq!(b.j, IndexRange::new(-2, 11));
        assert_eq!(b.k, IndexRange::new(-2, 10));
    }

    #[test]
    fn test_floor_is_unconditional() {
        let frame = SpatialFrame::new(&tank(3));
        for i in [-2, 0, 5, 18] {
            for k in [-2, 0, 4, 10] {
                assert_eq!(frame.classify_site(Site3 { i, j: 0, k }), Some(ParticleKind::Wall));
                assert_eq!(frame.classify_site(Site3 { i, j: -2, k }), Some(ParticleKind::Wall));
            }
        }
    }

    #[test]
    fn test_side_walls_above_floor() {
        let frame = SpatialFrame::new(&tank(3));
        let rule = frame.matching_rule(Site3 { i: 0, j: 3, k: 3 }).unwrap();
        assert_eq!(rule.name, "wall_left");
        let rule = frame.matching_rule(Site3 { i: 16, j: 3, k: 3 }).unwrap();
        assert_eq!(rule.name, "wall_right");
        let rule = frame.matching_rule(Site3 { i: 5, j: 3, k: 0 }).unwrap();
        assert_eq!(rule.name, "wall_front");
        let rule = frame.matching_rule(Site3 { i: 5, j: 3, k: 8 }).unwrap();
        assert_eq!(rule.name, "wall_back");
        assert_eq!(frame.classify_site(Site3 { i: 15, j: 3, k: 3 }), None);
    }

    #[test]
    fn test_fluid_open_interval() {
        let frame = SpatialFrame::new(&tank(3));
        assert_eq!(frame.classify_site(Site3 { i: 1, j: 1, k: 1 }), Some(ParticleKind::Fluid));
        assert_eq!(frame.classify_site(Site3 { i: 3, j: 7, k: 7 }), Some(ParticleKind::Fluid));
        // x = 0.1 恰好等于流体块宽度，被排除
        assert_eq!(frame.classify_site(Site3 { i: 4, j: 1, k: 1 }), None);
        assert_eq!(frame.classify_site(Site3 { i: 1, j: 8, k: 1 }), None);
    }

    #[test]
    fn test_dambreak_counts() {
        let particles = TwoTierSpatial.classify(&tank(3));
        let fluid = particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Fluid)
            .count();
        let wall = particles.len() - fluid;
        assert_eq!(fluid, 3 * 7 * 7);
        assert_eq!(wall, 2667);
    }
}

// crates/mps_core/src/classifier/planar.rs

//! 二维三层分类器
//!
//! 流体块位于计算域左下角内侧，左、下、右三面先铺 `wall_layers` 层壁面粒子，
//! 再向外铺 `dummy_layers` 层虚粒子。顶面不设壁面。
//!
//! 遍历范围：
//!
//! ```text
//! i ∈ [-(T-1), i_right + (T-1)],  j ∈ [-(T-1), j_top]
//! T = wall_layers + dummy_layers
//! i_right = round(domain_x / l0),  j_top = round(domain_y / l0)
//! ```

use glam::DVec2;
use tracing::debug;

use super::{first_match, LatticeClassifier, Rule};
use crate::geometry::PlanarGeometry;
use crate::lattice::{IndexRange, LatticeBox2, Site2};
use crate::particle::{Particle, ParticleKind};
use crate::tolerance;

/// 二维分类所需的预计算量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarFrame {
    spacing: f64,
    fluid: DVec2,
    wall_layers: i64,
    total_layers: i64,
    i_right: i64,
    j_top: i64,
}

/// 二维规则表
///
/// 虚粒子规则排在壁面规则之前：虚粒子判定域是壁面判定域的子集，
/// 首个命中即为“虚粒子覆盖壁面”。流体规则只对未被边界规则命中的格点生效。
pub static PLANAR_RULES: [Rule<PlanarFrame, Site2>; 7] = [
    Rule {
        name: "dummy_bottom",
        kind: ParticleKind::Dummy,
        applies: dummy_bottom,
    },
    Rule {
        name: "dummy_left",
        kind: ParticleKind::Dummy,
        applies: dummy_left,
    },
    Rule {
        name: "dummy_right",
        kind: ParticleKind::Dummy,
        applies: dummy_right,
    },
    Rule {
        name: "wall_bottom",
        kind: ParticleKind::Wall,
        applies: wall_bottom,
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
        name: "fluid_block",
        kind: ParticleKind::Fluid,
        applies: fluid_block,
    },
];

fn dummy_bottom(frame: &PlanarFrame, site: Site2) -> bool {
    site.j <= -frame.wall_layers
}

fn dummy_left(frame: &PlanarFrame, site: Site2) -> bool {
    site.i <= -frame.wall_layers
}

fn dummy_right(frame: &PlanarFrame, site: Site2) -> bool {
    site.i >= frame.i_right + frame.wall_layers
}

fn wall_bottom(_frame: &PlanarFrame, site: Site2) -> bool {
    site.j <= 0
}

fn wall_left(_frame: &PlanarFrame, site: Site2) -> bool {
    site.i <= 0
}

fn wall_right(frame: &PlanarFrame, site: Site2) -> bool {
    site.i >= frame.i_right
}

fn fluid_block(frame: &PlanarFrame, site: Site2) -> bool {
    let p = site.position(frame.spacing);
    site.i >= 1
        && tolerance::at_most(p.x, frame.fluid.x)
        && site.j >= 1
        && tolerance::at_most(p.y, frame.fluid.y)
}

impl PlanarFrame {
    /// 由几何参数计算
    pub fn new(geometry: &PlanarGeometry) -> Self {
        let spacing = geometry.spacing();
        let domain = geometry.domain();
        Self {
            spacing,
            fluid: geometry.fluid(),
            wall_layers: i64::from(geometry.wall_layers()),
            total_layers: i64::from(geometry.total_layers()),
            i_right: nearest_index(domain.x / spacing),
            j_top: nearest_index(domain.y / spacing),
        }
    }

    /// 右壁基准索引
    pub fn i_right(&self) -> i64 {
        self.i_right
    }

    /// 顶部索引
    pub fn j_top(&self) -> i64 {
        self.j_top
    }

    /// 遍历盒
    pub fn lattice_box(&self) -> LatticeBox2 {
        let margin = self.total_layers - 1;
        LatticeBox2 {
            i: IndexRange::new(-margin, self.i_right + margin),
            j: IndexRange::new(-margin, self.j_top),
        }
    }

    /// 命中格点的规则，`None` 表示丢弃
    pub fn matching_rule(&self, site: Site2) -> Option<&'static Rule<PlanarFrame, Site2>> {
        first_match(&PLANAR_RULES, self, site)
    }

    /// 格点类型，`None` 表示丢弃
    pub fn classify_site(&self, site: Site2) -> Option<ParticleKind> {
        self.matching_rule(site).map(|rule| rule.kind)
    }
}

/// 最近整数，平局取偶
fn nearest_index(ratio: f64) -> i64 {
    ratio.round_ties_even() as i64
}

/// 二维三层分类策略
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeTierPlanar;

impl LatticeClassifier for ThreeTierPlanar {
    type Geometry = PlanarGeometry;
    type Vector = DVec2;

    fn name(&self) -> &'static str {
        "planar-three-tier"
    }

    fn classify(&self, geometry: &PlanarGeometry) -> Vec<Particle<DVec2>> {
        let frame = PlanarFrame::new(geometry);
        let lattice = frame.lattice_box();
        debug!(
            "二维遍历盒: i={:?}, j={:?}, 格点数={}",
            lattice.i,
            lattice.j,
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

    fn dambreak(wall: i64, dummy: i64) -> PlanarGeometry {
        PlanarGeometry::new(
            0.008,
            DVec2::new(0.584, 0.292),
            DVec2::new(0.146, 0.292),
            wall,
            dummy,
        )
        .unwrap()
    }

    #[test]
    fn test_frame_indices() {
        let frame = PlanarFrame::new(&dambreak(4, 4));
        assert_eq!(frame.i_right(), 73);
        assert_eq!(frame.j_top(), 36);
        let b = frame.lattice_box();
        assert_eq!(b.i, IndexRange::new(-7, 80));
        assert_eq!(b.j, IndexRange::new(-7, 36));
    }

    #[test]
    fn test_zero_layers_box() {
        let frame = PlanarFrame::new(&dambreak(0, 0));
        let b = frame.lattice_box();
        assert_eq!(b.i, IndexRange::new(1, 72));
        assert_eq!(b.j, IndexRange::new(1, 36));
    }

    #[test]
    fn test_dummy_overrides_wall() {
        let frame = PlanarFrame::new(&dambreak(4, 4));
        assert_eq!(frame.classify_site(Site2 { i: -4, j: 10 }), Some(ParticleKind::Dummy));
        assert_eq!(frame.classify_site(Site2 { i: -3, j: 10 }), Some(ParticleKind::Wall));
        assert_eq!(frame.classify_site(Site2 { i: 10, j: -4 }), Some(ParticleKind::Dummy));
        assert_eq!(frame.classify_site(Site2 { i: 76, j: 5 }), Some(ParticleKind::Wall));
        assert_eq!(frame.classify_site(Site2 { i: 77, j: 5 }), Some(ParticleKind::Dummy));
        // 角部：两个方向都在虚粒子区
        assert_eq!(frame.classify_site(Site2 { i: -7, j: -7 }), Some(ParticleKind::Dummy));
    }

    #[test]
    fn test_wall_borders_fluid() {
        let frame = PlanarFrame::new(&dambreak(4, 4));
        assert_eq!(frame.classify_site(Site2 { i: 0, j: 1 }), Some(ParticleKind::Wall));
        assert_eq!(frame.classify_site(Site2 { i: 1, j: 0 }), Some(ParticleKind::Wall));
        assert_eq!(frame.classify_site(Site2 { i: 1, j: 1 }), Some(ParticleKind::Fluid));
    }

    #[test]
    fn test_fluid_extent_edges() {
        let frame = PlanarFrame::new(&dambreak(4, 4));
        assert_eq!(frame.classify_site(Site2 { i: 18, j: 36 }), Some(ParticleKind::Fluid));
        assert_eq!(frame.classify_site(Site2 { i: 19, j: 1 }), None);
        assert_eq!(frame.classify_site(Site2 { i: 1, j: 37 }), None);
    }

    #[test]
    fn test_rule_names() {
        let frame = PlanarFrame::new(&dambreak(2, 1));
        let rule = frame.matching_rule(Site2 { i: -2, j: -2 }).unwrap();
        assert_eq!(rule.name, "dummy_bottom");
        let rule = frame.matching_rule(Site2 { i: 0, j: 0 }).unwrap();
        assert_eq!(rule.name, "wall_bottom");
        assert!(frame.matching_rule(Site2 { i: 30, j: 30 }).is_none());
    }

    #[test]
    fn test_classify_dambreak_fluid_count() {
        let particles = ThreeTierPlanar.classify(&dambreak(4, 4));
        let fluid = particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Fluid)
            .count();
        assert_eq!(fluid, 18 * 36);
        assert!(particles.iter().all(|p| p.velocity == DVec2::ZERO));
    }

    #[test]
    fn test_nearest_index_ties_even() {
        assert_eq!(nearest_index(2.5), 2);
        assert_eq!(nearest_index(3.5), 4);
        assert_eq!(nearest_index(72.99999999), 73);
    }
}

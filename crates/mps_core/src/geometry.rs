// crates/mps_core/src/geometry.rs

//! 几何参数
//!
//! 计算域、流体块、粒子间距与边界层数。构造时完成全部校验，
//! 之后不可变；分类器只接受已校验的几何参数。
//!
//! # 示例
//!
//! ```
//! use glam::DVec2;
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
//! assert_eq!(geometry.total_layers(), 8);
//! ```

use glam::{DVec2, DVec3};

use crate::error::{MpsError, MpsResult};

const AXES: [&str; 3] = ["x", "y", "z"];
const DOMAIN_FIELDS: [&str; 3] = ["domain_x", "domain_y", "domain_z"];
const FLUID_FIELDS: [&str; 3] = ["fluid_x", "fluid_y", "fluid_z"];

/// 二维几何参数（三层：流体 / 壁面 / 虚粒子）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarGeometry {
    spacing: f64,
    domain: DVec2,
    fluid: DVec2,
    wall_layers: u32,
    dummy_layers: u32,
}

impl PlanarGeometry {
    /// 创建并校验二维几何参数
    ///
    /// # 参数
    ///
    /// - `spacing`: 粒子间距 l0 [m]
    /// - `domain`: 计算域尺寸 [m]
    /// - `fluid`: 流体块尺寸 [m]，位于计算域左下角
    /// - `wall_layers`: 壁面粒子层数
    /// - `dummy_layers`: 虚粒子层数
    pub fn new(
        spacing: f64,
        domain: DVec2,
        fluid: DVec2,
        wall_layers: i64,
        dummy_layers: i64,
    ) -> MpsResult<Self> {
        MpsError::check_positive("spacing", spacing)?;
        check_extents(&DOMAIN_FIELDS, &domain.to_array())?;
        check_extents(&FLUID_FIELDS, &fluid.to_array())?;
        for (axis, (f, d)) in AXES.iter().zip(fluid.to_array().into_iter().zip(domain.to_array())) {
            MpsError::check_within_domain(*axis, f, d)?;
        }
        let wall_layers = MpsError::check_layers("wall_layers", wall_layers)?;
        let dummy_layers = MpsError::check_layers("dummy_layers", dummy_layers)?;

        // 遍历盒每轴格点数的上界：i 向两侧各加厚 T 层，j 只向下加厚
        let layers = f64::from(wall_layers) + f64::from(dummy_layers);
        let cells = domain / spacing;
        MpsError::check_lattice_size((cells.x + 2.0 * layers + 1.0) * (cells.y + layers + 1.0))?;

        Ok(Self {
            spacing,
            domain,
            fluid,
            wall_layers,
            dummy_layers,
        })
    }

    /// 粒子间距 l0 [m]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// 计算域尺寸 [m]
    pub fn domain(&self) -> DVec2 {
        self.domain
    }

    /// 流体块尺寸 [m]
    pub fn fluid(&self) -> DVec2 {
        self.fluid
    }

    /// 壁面粒子层数
    pub fn wall_layers(&self) -> u32 {
        self.wall_layers
    }

    /// 虚粒子层数
    pub fn dummy_layers(&self) -> u32 {
        self.dummy_layers
    }

    /// 边界总层数
    pub fn total_layers(&self) -> u32 {
        self.wall_layers + self.dummy_layers
    }
}

/// 三维几何参数（两层：流体 / 壁面）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialGeometry {
    spacing: f64,
    domain: DVec3,
    fluid: DVec3,
    wall_layers: u32,
}

impl SpatialGeometry {
    /// 创建并校验三维几何参数
    pub fn new(spacing: f64, domain: DVec3, fluid: DVec3, wall_layers: i64) -> MpsResult<Self> {
        MpsError::check_positive("spacing", spacing)?;
        check_extents(&DOMAIN_FIELDS, &domain.to_array())?;
        check_extents(&FLUID_FIELDS, &fluid.to_array())?;
        for (axis, (f, d)) in AXES.iter().zip(fluid.to_array().into_iter().zip(domain.to_array())) {
            MpsError::check_within_domain(*axis, f, d)?;
        }
        let wall_layers = MpsError::check_layers("wall_layers", wall_layers)?;

        // i、k 向两侧各加厚，j 只向下加厚
        let layers = f64::from(wall_layers);
        let cells = domain / spacing;
        MpsError::check_lattice_size(
            (cells.x + 2.0 * layers + 1.0) * (cells.y + layers + 1.0) * (cells.z + 2.0 * layers + 1.0),
        )?;

        Ok(Self {
            spacing,
            domain,
            fluid,
            wall_layers,
        })
    }

    /// 粒子间距 l0 [m]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// 计算域尺寸 [m]
    pub fn domain(&self) -> DVec3 {
        self.domain
    }

    /// 流体块尺寸 [m]
    pub fn fluid(&self) -> DVec3 {
        self.fluid
    }

    /// 壁面粒子层数
    pub fn wall_layers(&self) -> u32 {
        self.wall_layers
    }
}

fn check_extents(fields: &[&'static str], extents: &[f64]) -> MpsResult<()> {
    for (&field, &value) in fields.iter().zip(extents) {
        MpsError::check_positive(field, value)?;
    }
    Ok(())
}

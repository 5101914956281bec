// crates/mps_core/src/droplet.rs

//! 无重力液滴振荡算例
//!
//! 以原点为中心的 `nx × ny` 正方形流体块，不含壁面与虚粒子。
//! 开启表面张力后液滴由方形向圆形变形并振荡。
//!
//! 参考量：
//!
//! - 等效圆半径 `R = sqrt(nx·ny·l0² / π)`
//! - 毛细稳定时间步上限 `dt < sqrt(ρ·l0³ / (2π·σ))`
//! - Rayleigh n=2 模态角频率 `ω = sqrt(6σ / (ρ·R³))`（二维）

use std::f64::consts::PI;

use glam::DVec2;

use crate::error::{MpsError, MpsResult};
use crate::lattice::coordinate;
use crate::particle::{Particle, Particle2, ParticleKind};

/// 计算域半宽相对等效半径的余量倍数
pub const DOMAIN_MARGIN_RADII: f64 = 5.0;

/// 液滴参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropletParameters {
    spacing: f64,
    nx: usize,
    ny: usize,
    density: f64,
    sigma: f64,
}

impl DropletParameters {
    /// 创建并校验液滴参数
    ///
    /// # 参数
    ///
    /// - `spacing`: 粒子间距 l0 [m]
    /// - `nx`, `ny`: 两个方向的粒子数
    /// - `density`: 密度 [kg/m³]
    /// - `sigma`: 表面张力系数 [N/m]
    pub fn new(spacing: f64, nx: usize, ny: usize, density: f64, sigma: f64) -> MpsResult<Self> {
        MpsError::check_positive("spacing", spacing)?;
        MpsError::check_positive("density", density)?;
        MpsError::check_positive("sigma", sigma)?;
        if nx == 0 || ny == 0 {
            return Err(MpsError::invalid_input(format!(
                "液滴粒子数必须为正: nx={nx}, ny={ny}"
            )));
        }
        MpsError::check_lattice_size(nx as f64 * ny as f64)?;
        Ok(Self {
            spacing,
            nx,
            ny,
            density,
            sigma,
        })
    }

    /// 粒子间距 l0 [m]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// x 方向粒子数
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// y 方向粒子数
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// 密度 [kg/m³]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// 表面张力系数 [N/m]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// 中心偏移，使粒子块中心位于原点
    fn center(&self) -> DVec2 {
        DVec2::new(
            (self.nx - 1) as f64 * self.spacing / 2.0,
            (self.ny - 1) as f64 * self.spacing / 2.0,
        )
    }

    /// 生成流体粒子（iy 外层、ix 内层）
    pub fn generate(&self) -> Vec<Particle2> {
        let c = self.center();
        let mut particles = Vec::with_capacity(self.nx * self.ny);
        for iy in 0..self.ny {
            for ix in 0..self.nx {
                let x = coordinate(ix as i64, self.spacing) - c.x;
                let y = coordinate(iy as i64, self.spacing) - c.y;
                particles.push(Particle::at_rest(DVec2::new(x, y), ParticleKind::Fluid));
            }
        }
        particles
    }

    /// 参考量
    pub fn diagnostics(&self) -> DropletDiagnostics {
        let l0 = self.spacing;
        let side = DVec2::new((self.nx - 1) as f64 * l0, (self.ny - 1) as f64 * l0);
        let area = (self.nx * self.ny) as f64 * l0 * l0;
        let equivalent_radius = (area / PI).sqrt();
        let capillary_dt_limit = (self.density * l0.powi(3) / (2.0 * PI * self.sigma)).sqrt();
        let rayleigh_omega =
            (6.0 * self.sigma / (self.density * equivalent_radius.powi(3))).sqrt();
        let domain_half_width = side.max_element() / 2.0 + DOMAIN_MARGIN_RADII * equivalent_radius;

        DropletDiagnostics {
            side,
            equivalent_radius,
            capillary_dt_limit,
            rayleigh_omega,
            domain_half_width,
        }
    }
}

/// 液滴参考量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropletDiagnostics {
    /// 粒子块边长 `(n-1)·l0` [m]
    pub side: DVec2,
    /// 等效圆半径 [m]
    pub equivalent_radius: f64,
    /// 毛细稳定时间步上限 [s]
    pub capillary_dt_limit: f64,
    /// Rayleigh n=2 模态角频率 [rad/s]
    pub rayleigh_omega: f64,
    /// 计算域半宽 [m]
    pub domain_half_width: f64,
}

impl DropletDiagnostics {
    /// Rayleigh n=2 模态频率 [Hz]
    pub fn rayleigh_frequency(&self) -> f64 {
        self.rayleigh_omega / (2.0 * PI)
    }

    /// Rayleigh n=2 模态周期 [s]
    pub fn rayleigh_period(&self) -> f64 {
        2.0 * PI / self.rayleigh_omega
    }
}

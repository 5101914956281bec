// apps/mps_cli/src/commands/dambreak2d.rs

//! 二维溃坝初始条件生成命令

use anyhow::Result;
use clap::Args;
use glam::DVec2;
use mps_config::defaults::{self, dambreak2d};
use mps_config::{DamBreak2dScenario, PlanarSolverSettings, Scenario};
use std::path::PathBuf;
use tracing::info;

use super::{parse_flag, PlanarSolverArgs};

/// 二维溃坝参数
#[derive(Args)]
pub struct DamBreak2dArgs {
    /// 计算域 x 宽度 [m]
    #[arg(long, default_value_t = dambreak2d::DOMAIN_X)]
    pub domain_x: f64,

    /// 计算域 y 高度 [m]
    #[arg(long, default_value_t = dambreak2d::DOMAIN_Y)]
    pub domain_y: f64,

    /// 水柱 x 宽度 [m]
    #[arg(long, default_value_t = dambreak2d::WATER_X)]
    pub water_x: f64,

    /// 水柱 y 高度 [m]
    #[arg(long, default_value_t = dambreak2d::WATER_Y)]
    pub water_y: f64,

    /// 粒子间距 [m]
    #[arg(long, default_value_t = dambreak2d::L0)]
    pub l0: f64,

    /// 壁面粒子层数
    #[arg(long, default_value_t = dambreak2d::WALL_LAYERS, allow_negative_numbers = true)]
    pub wall_layers: i64,

    /// 虚粒子层数
    #[arg(long, default_value_t = dambreak2d::DUMMY_LAYERS, allow_negative_numbers = true)]
    pub dummy_layers: i64,

    /// 重力 y 分量 [m/s²]
    #[arg(long, default_value_t = defaults::GRAVITY_Y, allow_negative_numbers = true)]
    pub gravity_y: f64,

    /// 负压截断 (0: 关闭, 1: 开启)
    #[arg(long, default_value = "1", value_parser = parse_flag)]
    pub clamp_negative_pressure: bool,

    /// 粒子间碰撞恢复系数 e (0: 完全非弹性, 1: 完全弹性)
    #[arg(long, default_value_t = defaults::RESTITUTION_COEFF)]
    pub restitution_coeff: f64,

    /// 碰撞判定距离系数 (col_dist = ratio · l0)
    #[arg(long, default_value_t = defaults::COLLISION_DISTANCE_RATIO)]
    pub collision_distance_ratio: f64,

    /// 表面张力 (0: 关闭, 1: 开启)
    #[arg(long, default_value = "0", value_parser = parse_flag)]
    pub surface_tension_enabled: bool,

    /// λ 计算方式 (1: 解析解, 0: 由初始粒子布置计算)
    #[arg(long, default_value = "0", value_parser = parse_flag)]
    pub use_analytical_lambda: bool,

    #[command(flatten)]
    pub solver: PlanarSolverArgs,

    /// 文件输出目录
    #[arg(long, default_value = dambreak2d::OUTDIR)]
    pub outdir: PathBuf,
}

impl DamBreak2dArgs {
    /// 转换为算例
    pub fn into_scenario(self) -> DamBreak2dScenario {
        let mut solver = PlanarSolverSettings {
            gravity_y: self.gravity_y,
            clamp_negative_pressure: self.clamp_negative_pressure,
            restitution_coeff: self.restitution_coeff,
            collision_distance_ratio: self.collision_distance_ratio,
            surface_tension_enabled: self.surface_tension_enabled,
            use_analytical_lambda: self.use_analytical_lambda,
            ..PlanarSolverSettings::default()
        };
        self.solver.apply(&mut solver);

        DamBreak2dScenario {
            domain: DVec2::new(self.domain_x, self.domain_y),
            water: DVec2::new(self.water_x, self.water_y),
            l0: self.l0,
            wall_layers: self.wall_layers,
            dummy_layers: self.dummy_layers,
            outdir: self.outdir.display().to_string(),
            solver,
        }
    }
}

/// 执行二维溃坝生成命令
pub fn execute(args: DamBreak2dArgs) -> Result<()> {
    info!("=== MPS 二维溃坝初始条件生成 ===");
    let outdir = args.outdir.clone();
    let scenario = Scenario::DamBreak2d(args.into_scenario());
    super::generate::run_scenario(&scenario, &outdir)?;
    Ok(())
}

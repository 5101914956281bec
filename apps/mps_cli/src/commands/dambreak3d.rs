// apps/mps_cli/src/commands/dambreak3d.rs

//! 三维溃坝初始条件生成命令

use anyhow::Result;
use clap::Args;
use glam::DVec3;
use mps_config::defaults::{self, dambreak3d};
use mps_config::{DamBreak3dScenario, Scenario, SpatialSolverSettings};
use std::path::PathBuf;
use tracing::info;

/// 三维溃坝参数
#[derive(Args)]
pub struct DamBreak3dArgs {
    /// 计算域 x 宽度 [m]
    #[arg(long, default_value_t = dambreak3d::DOMAIN_X)]
    pub domain_x: f64,

    /// 计算域 y 高度 [m]
    #[arg(long, default_value_t = dambreak3d::DOMAIN_Y)]
    pub domain_y: f64,

    /// 计算域 z 深度 [m]
    #[arg(long, default_value_t = dambreak3d::DOMAIN_Z)]
    pub domain_z: f64,

    /// 水柱 x 宽度 [m]
    #[arg(long, default_value_t = dambreak3d::WATER_X)]
    pub water_x: f64,

    /// 水柱 y 高度 [m]
    #[arg(long, default_value_t = dambreak3d::WATER_Y)]
    pub water_y: f64,

    /// 水柱 z 深度 [m]
    #[arg(long, default_value_t = dambreak3d::WATER_Z)]
    pub water_z: f64,

    /// 粒子间距 [m]
    #[arg(long, default_value_t = dambreak3d::L0)]
    pub l0: f64,

    /// 壁面粒子层数
    #[arg(long, default_value_t = dambreak3d::WALL_LAYERS, allow_negative_numbers = true)]
    pub wall_layers: i64,

    /// 密度 [kg/m³]
    #[arg(long, default_value_t = defaults::DENSITY)]
    pub density: f64,

    /// 运动黏性系数 [m²/s]
    #[arg(long, default_value_t = dambreak3d::VISCOSITY)]
    pub viscosity: f64,

    /// 重力 y 分量 [m/s²]
    #[arg(long, default_value_t = defaults::GRAVITY_Y, allow_negative_numbers = true)]
    pub gravity_y: f64,

    /// 时间步长 [s]
    #[arg(long, default_value_t = defaults::DT)]
    pub dt: f64,

    /// 结束时间 [s]
    #[arg(long, default_value_t = defaults::T_END)]
    pub t_end: f64,

    /// 输出间隔 [步]
    #[arg(long, default_value_t = defaults::OUTPUT_INTERVAL)]
    pub output_interval: i64,

    /// 文件输出目录
    #[arg(long, default_value = dambreak3d::OUTDIR)]
    pub outdir: PathBuf,

    /// 求解器输出目录（写入参数文件）
    #[arg(long, default_value = dambreak3d::OUTPUT_DIR)]
    pub output_dir: String,
}

impl DamBreak3dArgs {
    /// 转换为算例
    pub fn into_scenario(self) -> DamBreak3dScenario {
        DamBreak3dScenario {
            domain: DVec3::new(self.domain_x, self.domain_y, self.domain_z),
            water: DVec3::new(self.water_x, self.water_y, self.water_z),
            l0: self.l0,
            wall_layers: self.wall_layers,
            outdir: self.outdir.display().to_string(),
            solver: SpatialSolverSettings {
                density: self.density,
                viscosity: self.viscosity,
                gravity_y: self.gravity_y,
                dt: self.dt,
                t_end: self.t_end,
                output_interval: self.output_interval,
                output_dir: self.output_dir,
            },
        }
    }
}

/// 执行三维溃坝生成命令
pub fn execute(args: DamBreak3dArgs) -> Result<()> {
    info!("=== MPS 三维溃坝初始条件生成 ===");
    let outdir = args.outdir.clone();
    let scenario = Scenario::DamBreak3d(args.into_scenario());
    super::generate::run_scenario(&scenario, &outdir)?;
    Ok(())
}

// apps/mps_cli/src/commands/droplet.rs

//! 液滴振荡初始条件生成命令
//!
//! 无重力下的正方形流体块，表面张力使其向圆形变形并振荡。
//! 不使用壁面与虚粒子。

use anyhow::Result;
use clap::Args;
use mps_config::defaults::droplet;
use mps_config::{DropletScenario, PlanarSolverSettings, Scenario};
use std::path::PathBuf;
use tracing::info;

use super::PlanarSolverArgs;

/// 液滴振荡参数
#[derive(Args)]
pub struct DropletArgs {
    /// 粒子间距 [m]
    #[arg(long, default_value_t = droplet::L0)]
    pub l0: f64,

    /// x 方向粒子数
    #[arg(long, default_value_t = droplet::NX)]
    pub nx: usize,

    /// y 方向粒子数
    #[arg(long, default_value_t = droplet::NY)]
    pub ny: usize,

    #[command(flatten)]
    pub solver: PlanarSolverArgs,

    /// 文件输出目录
    #[arg(long, default_value = droplet::OUTDIR)]
    pub outdir: PathBuf,
}

impl DropletArgs {
    /// 转换为算例
    pub fn into_scenario(self) -> DropletScenario {
        let mut solver = PlanarSolverSettings::droplet();
        self.solver.apply(&mut solver);
        DropletScenario {
            l0: self.l0,
            nx: self.nx,
            ny: self.ny,
            outdir: self.outdir.display().to_string(),
            solver,
        }
    }
}

/// 执行液滴生成命令
pub fn execute(args: DropletArgs) -> Result<()> {
    info!("=== MPS 液滴振荡初始条件生成 ===");
    let outdir = args.outdir.clone();
    let scenario = Scenario::Droplet(args.into_scenario());
    super::generate::run_scenario(&scenario, &outdir)?;
    Ok(())
}

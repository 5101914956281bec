// apps/mps_cli/src/commands/inspect.rs

//! 求解器输出检查命令
//!
//! 逐帧统计粒子数与流体压力范围。

use anyhow::{bail, Context, Result};
use clap::Args;
use mps_io::{list_frames, read_frame};
use std::path::PathBuf;
use tracing::{info, warn};

/// 输出检查参数
#[derive(Args)]
pub struct InspectArgs {
    /// 求解器输出目录
    #[arg(short, long, default_value = "output")]
    pub input_dir: PathBuf,

    /// 只显示流体统计
    #[arg(long)]
    pub fluid_only: bool,

    /// 时间步长 [s]，给出时同时显示各帧时刻
    #[arg(long)]
    pub dt: Option<f64>,
}

/// 全部帧的统计
#[derive(Debug, Default, PartialEq)]
struct InspectReport {
    frames: usize,
    pressure_range: Option<(f64, f64)>,
}

/// 执行输出检查命令
pub fn execute(args: InspectArgs) -> Result<()> {
    info!("=== MPS 输出检查 ===");
    let report = inspect(&args)?;
    match report.pressure_range {
        Some((lo, hi)) => info!(
            "{} 帧, 流体压力范围 [{:.3}, {:.3}] Pa",
            report.frames, lo, hi
        ),
        None => info!("{} 帧, 无流体粒子", report.frames),
    }
    Ok(())
}

fn inspect(args: &InspectArgs) -> Result<InspectReport> {
    let frames = list_frames(&args.input_dir)
        .with_context(|| format!("无法列出 {}", args.input_dir.display()))?;
    if frames.is_empty() {
        bail!("{} 中没有 output_*.csv 帧文件", args.input_dir.display());
    }

    let mut report = InspectReport::default();
    for (step, path) in &frames {
        let frame = match read_frame(path) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("跳过 {}: {}", path.display(), e);
                continue;
            }
        };
        report.frames += 1;

        let time = args
            .dt
            .map(|dt| format!(" t={:.4} s", *step as f64 * dt))
            .unwrap_or_default();
        let summary = frame.summary();
        let range = frame.fluid_pressure_range();

        if args.fluid_only {
            info!("step {step:06}{time}: {} fluid", summary.fluid);
        } else {
            info!("step {step:06}{time} ({}): {}", frame.dimension, summary);
        }
        if let Some((lo, hi)) = range {
            info!("  p ∈ [{lo:.3}, {hi:.3}] Pa");
        }

        report.pressure_range = match (report.pressure_range, range) {
            (Some((a, b)), Some((lo, hi))) => Some((a.min(lo), b.max(hi))),
            (acc, None) => acc,
            (None, range) => range,
        };
    }
    Ok(report)
}

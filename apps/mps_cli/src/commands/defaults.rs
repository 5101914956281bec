// apps/mps_cli/src/commands/defaults.rs

//! 默认算例显示命令
//!
//! 以 JSON 输出指定算例类型的全部默认参数，可作为 `generate` 的模板。

use anyhow::{Context, Result};
use clap::Args;
use mps_config::{Scenario, ScenarioKind};
use std::path::PathBuf;
use tracing::info;

/// 默认算例参数
#[derive(Args)]
pub struct DefaultsArgs {
    /// 算例类型 (dambreak2d, dambreak3d, droplet)
    #[arg(short, long, default_value = "dambreak2d")]
    pub kind: ScenarioKind,

    /// 保存到文件（不给出时打印到标准输出）
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// 执行默认算例命令
pub fn execute(args: DefaultsArgs) -> Result<()> {
    let scenario = Scenario::default_for(args.kind);
    match &args.output {
        Some(path) => {
            scenario
                .save_to_file(path)
                .with_context(|| format!("无法写出 {}", path.display()))?;
            info!("{} 默认算例已保存: {}", args.kind, path.display());
        }
        None => println!("{}", scenario.to_json()?),
    }
    Ok(())
}

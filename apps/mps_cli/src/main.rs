// apps/mps_cli/src/main.rs

//! MPS 初始条件生成命令行界面
//!
//! 生成粒子法求解器的输入文件组（粒子文件、参数文件、计算控制文件），
//! 并提供文件组验证与求解器输出检查。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// MPS 初始条件生成工具
#[derive(Parser)]
#[command(name = "mps_cli")]
#[command(author = "MPS Prep Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MPS initial condition generator", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 生成二维溃坝算例
    Dambreak2d(commands::dambreak2d::DamBreak2dArgs),
    /// 生成三维溃坝算例
    Dambreak3d(commands::dambreak3d::DamBreak3dArgs),
    /// 生成二维液滴振荡算例
    Droplet(commands::droplet::DropletArgs),
    /// 由 JSON 算例文件生成
    Generate(commands::generate::GenerateArgs),
    /// 验证文件组
    Validate(commands::validate::ValidateArgs),
    /// 检查求解器输出
    Inspect(commands::inspect::InspectArgs),
    /// 显示默认算例
    Defaults(commands::defaults::DefaultsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Dambreak2d(args) => commands::dambreak2d::execute(args),
        Commands::Dambreak3d(args) => commands::dambreak3d::execute(args),
        Commands::Droplet(args) => commands::droplet::execute(args),
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Inspect(args) => commands::inspect::execute(args),
        Commands::Defaults(args) => commands::defaults::execute(args),
    }
}

// apps/mps_cli/src/commands/generate.rs

//! 算例文件生成命令
//!
//! 读取 JSON 算例文件，校验后写出求解器输入文件组。
//! 各生成子命令也经由 [`run_scenario`] 完成写出。

use anyhow::{Context, Result};
use clap::Args;
use mps_config::Scenario;
use mps_core::{LatticeClassifier, ThreeTierPlanar, TwoTierSpatial};
use mps_io::{write_artifacts, ArtifactSet, LatticeHeader};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 算例生成参数
#[derive(Args)]
pub struct GenerateArgs {
    /// 算例文件路径（JSON）
    #[arg(short, long)]
    pub scenario: PathBuf,

    /// 覆盖算例中的文件输出目录
    #[arg(short, long)]
    pub outdir: Option<PathBuf>,
}

/// 执行算例生成命令
pub fn execute(args: GenerateArgs) -> Result<()> {
    info!("=== MPS 算例生成 ===");
    info!("算例文件: {}", args.scenario.display());

    let scenario = Scenario::from_file(&args.scenario)
        .with_context(|| format!("无法加载算例文件 {}", args.scenario.display()))?;
    info!("算例类型: {}", scenario.kind());

    let outdir = args
        .outdir
        .unwrap_or_else(|| PathBuf::from(scenario.outdir()));
    run_scenario(&scenario, &outdir)?;
    Ok(())
}

/// 生成粒子并写出文件组
pub fn run_scenario(scenario: &Scenario, outdir: &Path) -> Result<ArtifactSet> {
    scenario.validate().context("算例参数无效")?;
    let config = scenario.configuration().context("无法组装参数表")?;

    let artifacts = match scenario {
        Scenario::DamBreak2d(s) => {
            let geometry = s.geometry()?;
            info!("分类策略: {}", ThreeTierPlanar.name());
            let particles = ThreeTierPlanar.classify(&geometry);
            let header = LatticeHeader::DamBreak2d {
                domain: geometry.domain(),
                water: geometry.fluid(),
                spacing: geometry.spacing(),
            };
            write_artifacts(outdir, &header, &particles, &config)
        }
        Scenario::DamBreak3d(s) => {
            let geometry = s.geometry()?;
            info!("分类策略: {}", TwoTierSpatial.name());
            let particles = TwoTierSpatial.classify(&geometry);
            let header = LatticeHeader::DamBreak3d {
                domain: geometry.domain(),
                water: geometry.fluid(),
                spacing: geometry.spacing(),
            };
            write_artifacts(outdir, &header, &particles, &config)
        }
        Scenario::Droplet(s) => {
            let droplet = s.parameters()?;
            let diagnostics = droplet.diagnostics();
            let l0 = droplet.spacing();

            info!(
                "粒子块: {:.1} x {:.1} mm (nx={}, ny={}, l0={:.2} mm)",
                diagnostics.side.x * 1.0e3,
                diagnostics.side.y * 1.0e3,
                droplet.nx(),
                droplet.ny(),
                l0 * 1.0e3
            );
            info!("等效圆半径: {:.2} mm", diagnostics.equivalent_radius * 1.0e3);
            info!(
                "毛细时间步上限: {:.3} ms (dt={:.3} ms)",
                diagnostics.capillary_dt_limit * 1.0e3,
                s.solver.dt * 1.0e3
            );
            if s.solver.dt > diagnostics.capillary_dt_limit {
                warn!("dt 超过毛细稳定时间步上限，表面张力计算可能不稳定");
            }
            info!(
                "Rayleigh n=2 模态: f={:.2} Hz, T={:.1} ms (t_end={:.0} ms)",
                diagnostics.rayleigh_frequency(),
                diagnostics.rayleigh_period() * 1.0e3,
                s.solver.t_end * 1.0e3
            );

            let particles = droplet.generate();
            let header = LatticeHeader::Droplet {
                nx: droplet.nx(),
                ny: droplet.ny(),
                spacing: l0,
                equivalent_radius: diagnostics.equivalent_radius,
                rayleigh_period: diagnostics.rayleigh_period(),
            };
            write_artifacts(outdir, &header, &particles, &config)
        }
    }
    .with_context(|| format!("无法写出文件到 {}", outdir.display()))?;

    info!("Generated particles: {}", artifacts.summary);
    for path in artifacts.paths() {
        info!("  -> {}", path.display());
    }
    info!("运行求解器: ./mps_sim {}", artifacts.control_file.display());

    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mps_config::ScenarioKind;
    use tempfile::tempdir;

    #[test]
    fn test_run_default_scenarios() {
        let expected = [
            (ScenarioKind::DamBreak2d, 1928),
            (ScenarioKind::DamBreak3d, 147 + 2667),
            (ScenarioKind::Droplet, 1600),
        ];
        for (kind, total) in expected {
            let dir = tempdir().unwrap();
            let artifacts = run_scenario(&Scenario::default_for(kind), dir.path()).unwrap();
            assert_eq!(artifacts.summary.total, total, "{kind}");
            for path in artifacts.paths() {
                assert!(path.is_file(), "{}", path.display());
            }
        }
    }

    #[test]
    fn test_execute_from_file() {
        let dir = tempdir().unwrap();
        let scenario_path = dir.path().join("scenario.json");
        std::fs::write(
            &scenario_path,
            r#"{"kind": "dambreak2d", "wall_layers": 2, "dummy_layers": 1}"#,
        )
        .unwrap();
        let outdir = dir.path().join("case");

        execute(GenerateArgs {
            scenario: scenario_path,
            outdir: Some(outdir.clone()),
        })
        .unwrap();

        let lattice = mps_io::read_lattice(&outdir.join("particles.txt")).unwrap();
        let summary = lattice.summary();
        assert_eq!((summary.fluid, summary.wall, summary.dummy), (648, 296, 154));
    }

    #[test]
    fn test_invalid_scenario_rejected() {
        let dir = tempdir().unwrap();
        let scenario = Scenario::from_json(r#"{"kind": "dambreak2d", "l0": 0.0}"#).unwrap();
        assert!(run_scenario(&scenario, dir.path()).is_err());
        assert!(!dir.path().join("particles.txt").exists());
    }

    #[test]
    fn test_oversized_lattice_rejected() {
        let dir = tempdir().unwrap();
        for json in [
            r#"{"kind": "dambreak2d", "l0": 1e-7}"#,
            r#"{"kind": "dambreak2d", "l0": 1e-300}"#,
            r#"{"kind": "dambreak3d", "l0": 1e-300}"#,
            r#"{"kind": "droplet", "nx": 100000, "ny": 100000}"#,
        ] {
            let scenario = Scenario::from_json(json).unwrap();
            let err = run_scenario(&scenario, dir.path()).unwrap_err();
            assert!(format!("{err:#}").contains("遍历盒"), "{json}: {err:#}");
        }
        assert!(!dir.path().join("particles.txt").exists());
    }
}

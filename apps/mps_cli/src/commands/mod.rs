// apps/mps_cli/src/commands/mod.rs

//! 子命令实现

pub mod dambreak2d;
pub mod dambreak3d;
pub mod defaults;
pub mod droplet;
pub mod generate;
pub mod inspect;
pub mod validate;

use clap::Args;
use mps_config::{PlanarSolverSettings, PpeFormulation, PressureSolver, SurfaceDetection};

/// 解析开关量（0/1/true/false/on/off）
pub fn parse_flag(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(format!("无效的开关值 '{other}'，期望 0 或 1")),
    }
}

/// 二维求解器公共参数
///
/// 未给出的项取算例默认值（溃坝与液滴的默认值不同）。
#[derive(Args, Debug, Clone, Default)]
pub struct PlanarSolverArgs {
    /// 密度 [kg/m³]（默认 1000）
    #[arg(long)]
    pub density: Option<f64>,

    /// 运动黏性系数 [m²/s]（溃坝默认 0，液滴默认 1e-6）
    #[arg(long)]
    pub viscosity: Option<f64>,

    /// 时间步长 [s]（溃坝默认 5e-4，液滴默认 1e-4）
    #[arg(long)]
    pub dt: Option<f64>,

    /// 结束时间 [s]（溃坝默认 2.0，液滴默认 5.0）
    #[arg(long)]
    pub t_end: Option<f64>,

    /// 输出间隔 [步]（默认 100）
    #[arg(long)]
    pub output_interval: Option<i64>,

    /// 线性求解器：0/cg、1/iccg（默认 iccg）
    #[arg(long)]
    pub solver_type: Option<PressureSolver>,

    /// PPE 定式化：0/density_invariant、1/weakly_compressible（默认 0）
    #[arg(long)]
    pub ppe_type: Option<PpeFormulation>,

    /// Natsui 型 PPE 对角系数 c（默认 1.01）
    #[arg(long)]
    pub c_ppe: Option<f64>,

    /// Natsui 型 PPE 密度修正权重 γ（默认 0.01）
    #[arg(long)]
    pub gamma_ppe: Option<f64>,

    /// 自由表面判定：0/number_density、1/neighbor_count（默认 0）
    #[arg(long)]
    pub surface_detection_method: Option<SurfaceDetection>,

    /// 近邻粒子数法阈值（默认 0.85）
    #[arg(long)]
    pub surface_count_threshold: Option<f64>,

    /// 表面张力系数 σ [N/m]（溃坝默认 0.073，液滴默认 0.0728）
    #[arg(long)]
    pub sigma: Option<f64>,

    /// 表面张力影响半径倍率（默认 3.2）
    #[arg(long)]
    pub surface_tension_re_ratio: Option<f64>,

    /// 求解器输出目录（写入参数文件）
    #[arg(long)]
    pub output_dir: Option<String>,
}

impl PlanarSolverArgs {
    /// 将给出的项覆盖到设置上
    pub fn apply(&self, settings: &mut PlanarSolverSettings) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }
        set(&mut settings.density, &self.density);
        set(&mut settings.viscosity, &self.viscosity);
        set(&mut settings.dt, &self.dt);
        set(&mut settings.t_end, &self.t_end);
        set(&mut settings.output_interval, &self.output_interval);
        set(&mut settings.solver_type, &self.solver_type);
        set(&mut settings.ppe_type, &self.ppe_type);
        set(&mut settings.c_ppe, &self.c_ppe);
        set(&mut settings.gamma_ppe, &self.gamma_ppe);
        set(&mut settings.surface_detection_method, &self.surface_detection_method);
        set(&mut settings.surface_count_threshold, &self.surface_count_threshold);
        set(&mut settings.surface_tension_coeff, &self.sigma);
        set(&mut settings.surface_tension_re_ratio, &self.surface_tension_re_ratio);
        set(&mut settings.output_dir, &self.output_dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Ok(true));
        assert_eq!(parse_flag("False"), Ok(false));
        assert!(parse_flag("2").is_err());
    }

    #[test]
    fn test_apply_overrides_only_given() {
        let mut settings = PlanarSolverSettings::droplet();
        let args = PlanarSolverArgs {
            dt: Some(2.0e-5),
            solver_type: Some(PressureSolver::Cg),
            ..Default::default()
        };
        args.apply(&mut settings);
        assert_eq!(settings.dt, 2.0e-5);
        assert_eq!(settings.solver_type, PressureSolver::Cg);
        assert_eq!(settings.viscosity, 1.0e-6);
        assert_eq!(settings.output_dir, "output/droplet");
    }
}

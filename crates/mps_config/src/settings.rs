// crates/mps_config/src/settings.rs

//! 求解器设置
//!
//! 用户可调的物性、时间与求解器参数。所有字段带 serde 默认值，
//! 算例文件中可只写需要修改的项。

use serde::{Deserialize, Serialize};

use crate::defaults::{self, droplet};
use crate::error::ConfigError;
use crate::options::{PpeFormulation, PressureSolver, SurfaceDetection};

/// 二维求解器设置（溃坝与液滴共用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarSolverSettings {
    /// 密度 [kg/m³]
    #[serde(default = "default_density")]
    pub density: f64,

    /// 运动黏性系数 [m²/s]
    #[serde(default)]
    pub viscosity: f64,

    /// 重力 y 分量 [m/s²]
    #[serde(default = "default_gravity_y")]
    pub gravity_y: f64,

    /// 时间步长 [s]
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// 结束时间 [s]
    #[serde(default = "default_t_end")]
    pub t_end: f64,

    /// 输出间隔 [步]
    #[serde(default = "default_output_interval")]
    pub output_interval: i64,

    /// 线性求解器
    #[serde(default)]
    pub solver_type: PressureSolver,

    /// λ 使用解析解（否则由初始粒子布置计算）
    #[serde(default)]
    pub use_analytical_lambda: bool,

    /// 负压截断
    #[serde(default = "default_true")]
    pub clamp_negative_pressure: bool,

    /// PPE 定式化
    #[serde(default)]
    pub ppe_type: PpeFormulation,

    /// Natsui 型 PPE 对角系数 c
    #[serde(default = "default_c_ppe")]
    pub c_ppe: f64,

    /// Natsui 型 PPE 密度修正权重 γ
    #[serde(default = "default_gamma_ppe")]
    pub gamma_ppe: f64,

    /// 自由表面判定方法
    #[serde(default)]
    pub surface_detection_method: SurfaceDetection,

    /// 近邻粒子数法阈值（仅 neighbor_count 使用）
    #[serde(default = "default_surface_count_threshold")]
    pub surface_count_threshold: f64,

    /// 粒子间碰撞恢复系数 e
    #[serde(default = "default_restitution_coeff")]
    pub restitution_coeff: f64,

    /// 碰撞判定距离系数（col_dist = ratio · l0）
    #[serde(default = "default_collision_distance_ratio")]
    pub collision_distance_ratio: f64,

    /// 表面张力开关
    #[serde(default)]
    pub surface_tension_enabled: bool,

    /// 表面张力系数 σ [N/m]
    #[serde(default = "default_surface_tension_coeff")]
    pub surface_tension_coeff: f64,

    /// 表面张力影响半径倍率（re_st = ratio · l0）
    #[serde(default = "default_surface_tension_re_ratio")]
    pub surface_tension_re_ratio: f64,

    /// 求解器输出目录
    #[serde(default = "default_planar_output_dir")]
    pub output_dir: String,
}

fn default_density() -> f64 { defaults::DENSITY }
fn default_gravity_y() -> f64 { defaults::GRAVITY_Y }
fn default_dt() -> f64 { defaults::DT }
fn default_t_end() -> f64 { defaults::T_END }
fn default_output_interval() -> i64 { defaults::OUTPUT_INTERVAL }
fn default_true() -> bool { true }
fn default_c_ppe() -> f64 { defaults::C_PPE }
fn default_gamma_ppe() -> f64 { defaults::GAMMA_PPE }
fn default_surface_count_threshold() -> f64 { defaults::SURFACE_COUNT_THRESHOLD }
fn default_restitution_coeff() -> f64 { defaults::RESTITUTION_COEFF }
fn default_collision_distance_ratio() -> f64 { defaults::COLLISION_DISTANCE_RATIO }
fn default_surface_tension_coeff() -> f64 { defaults::SURFACE_TENSION_COEFF }
fn default_surface_tension_re_ratio() -> f64 { defaults::SURFACE_TENSION_RE_RATIO }
fn default_planar_output_dir() -> String { defaults::dambreak2d::OUTPUT_DIR.to_string() }

impl Default for PlanarSolverSettings {
    fn default() -> Self {
        Self {
            density: default_density(),
            viscosity: 0.0,
            gravity_y: default_gravity_y(),
            dt: default_dt(),
            t_end: default_t_end(),
            output_interval: default_output_interval(),
            solver_type: PressureSolver::default(),
            use_analytical_lambda: false,
            clamp_negative_pressure: true,
            ppe_type: PpeFormulation::default(),
            c_ppe: default_c_ppe(),
            gamma_ppe: default_gamma_ppe(),
            surface_detection_method: SurfaceDetection::default(),
            surface_count_threshold: default_surface_count_threshold(),
            restitution_coeff: default_restitution_coeff(),
            collision_distance_ratio: default_collision_distance_ratio(),
            surface_tension_enabled: false,
            surface_tension_coeff: default_surface_tension_coeff(),
            surface_tension_re_ratio: default_surface_tension_re_ratio(),
            output_dir: default_planar_output_dir(),
        }
    }
}

impl PlanarSolverSettings {
    /// 无重力液滴振荡的默认设置
    pub fn droplet() -> Self {
        Self {
            viscosity: droplet::VISCOSITY,
            gravity_y: 0.0,
            dt: droplet::DT,
            t_end: droplet::T_END,
            surface_tension_enabled: true,
            surface_tension_coeff: droplet::SIGMA,
            output_dir: droplet::OUTPUT_DIR.to_string(),
            ..Self::default()
        }
    }

    /// 类型与范围检查
    ///
    /// 只拒绝无法写出的值；数值合理性由求解器负责。
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("density", self.density)?;
        check_finite("viscosity", self.viscosity)?;
        check_finite("gravity_y", self.gravity_y)?;
        check_finite("dt", self.dt)?;
        check_finite("t_end", self.t_end)?;
        check_finite("c_ppe", self.c_ppe)?;
        check_finite("gamma_ppe", self.gamma_ppe)?;
        check_finite("surface_count_threshold", self.surface_count_threshold)?;
        check_finite("restitution_coeff", self.restitution_coeff)?;
        check_finite("collision_distance_ratio", self.collision_distance_ratio)?;
        check_finite("surface_tension_coeff", self.surface_tension_coeff)?;
        check_finite("surface_tension_re_ratio", self.surface_tension_re_ratio)?;
        check_output_dir(&self.output_dir)
    }
}

/// 三维求解器设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialSolverSettings {
    /// 密度 [kg/m³]
    #[serde(default = "default_density")]
    pub density: f64,

    /// 运动黏性系数 [m²/s]
    #[serde(default = "default_spatial_viscosity")]
    pub viscosity: f64,

    /// 重力 y 分量 [m/s²]
    #[serde(default = "default_gravity_y")]
    pub gravity_y: f64,

    /// 时间步长 [s]
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// 结束时间 [s]
    #[serde(default = "default_t_end")]
    pub t_end: f64,

    /// 输出间隔 [步]
    #[serde(default = "default_output_interval")]
    pub output_interval: i64,

    /// 求解器输出目录
    #[serde(default = "default_spatial_output_dir")]
    pub output_dir: String,
}

fn default_spatial_viscosity() -> f64 { defaults::dambreak3d::VISCOSITY }
fn default_spatial_output_dir() -> String { defaults::dambreak3d::OUTPUT_DIR.to_string() }

impl Default for SpatialSolverSettings {
    fn default() -> Self {
        Self {
            density: default_density(),
            viscosity: default_spatial_viscosity(),
            gravity_y: default_gravity_y(),
            dt: default_dt(),
            t_end: default_t_end(),
            output_interval: default_output_interval(),
            output_dir: default_spatial_output_dir(),
        }
    }
}

impl SpatialSolverSettings {
    /// 类型与范围检查
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("density", self.density)?;
        check_finite("viscosity", self.viscosity)?;
        check_finite("gravity_y", self.gravity_y)?;
        check_finite("dt", self.dt)?;
        check_finite("t_end", self.t_end)?;
        check_output_dir(&self.output_dir)
    }
}

fn check_finite(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid_value(key, value, "必须为有限数值"))
    }
}

/// 参数文件按空白分隔，目录名中不能含空白
fn check_output_dir(dir: &str) -> Result<(), ConfigError> {
    if dir.is_empty() {
        return Err(ConfigError::Missing("output_dir".to_string()));
    }
    if dir.chars().any(char::is_whitespace) {
        return Err(ConfigError::invalid_value("output_dir", dir, "不能包含空白字符"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_defaults() {
        let s = PlanarSolverSettings::default();
        assert_eq!(s.density, 1000.0);
        assert_eq!(s.viscosity, 0.0);
        assert_eq!(s.solver_type, PressureSolver::Iccg);
        assert!(s.clamp_negative_pressure);
        assert!(!s.surface_tension_enabled);
        assert_eq!(s.output_dir, "output/dambreak");
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_droplet_defaults() {
        let s = PlanarSolverSettings::droplet();
        assert_eq!(s.gravity_y, 0.0);
        assert!(s.surface_tension_enabled);
        assert_eq!(s.surface_tension_coeff, 0.0728);
        assert_eq!(s.dt, 1.0e-4);
        assert_eq!(s.output_dir, "output/droplet");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: PlanarSolverSettings =
            serde_json::from_str(r#"{"dt": 0.001, "solver_type": "cg"}"#).unwrap();
        assert_eq!(s.dt, 0.001);
        assert_eq!(s.solver_type, PressureSolver::Cg);
        assert_eq!(s.c_ppe, 1.01);
        assert!(s.clamp_negative_pressure);
    }

    #[test]
    fn test_spatial_defaults() {
        let s = SpatialSolverSettings::default();
        assert_eq!(s.viscosity, 1.0e-6);
        assert_eq!(s.output_dir, "output");
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_rejects_whitespace_output_dir() {
        let mut s = SpatialSolverSettings::default();
        s.output_dir = "my output".to_string();
        assert!(s.validate().is_err());
        s.output_dir.clear();
        assert!(matches!(s.validate(), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn test_out_of_range_passes_through() {
        let mut s = PlanarSolverSettings::default();
        s.restitution_coeff = 5.0;
        s.dt = -1.0;
        assert!(s.validate().is_ok());
        s.dt = f64::NAN;
        assert!(s.validate().is_err());
    }
}

// crates/mps_config/src/schema.rs

//! 求解器参数表
//!
//! 将几何参数、求解器设置与固定数值常量映射为求解器读取的
//! 有序键值表。键名、顺序与类型是与外部求解器约定的固定格式，
//! 由本模块的分节布局表统一定义。
//!
//! 除类型外不做取值检查，越界值原样写出。

use std::fmt;

use mps_core::{DropletParameters, PlanarGeometry, SpatialGeometry};

use crate::defaults::fixed;
use crate::error::ConfigError;
use crate::format;
use crate::options::CodedOption;
use crate::settings::{PlanarSolverSettings, SpatialSolverSettings};

/// 参数值
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// 实数，最短往返表示
    Real(f64),
    /// 整数（含枚举编码与开关）
    Integer(i64),
    /// 定点小数
    Fixed {
        /// 数值
        value: f64,
        /// 小数位数
        decimals: usize,
    },
    /// 按固定文本写出的常量
    Literal {
        /// 数值
        value: f64,
        /// 写出文本
        text: &'static str,
    },
    /// 文本
    Text(String),
}

impl ParamValue {
    /// 开关量按 0/1 写出
    pub fn flag(on: bool) -> Self {
        Self::Integer(i64::from(on))
    }

    /// 枚举选项按编码写出
    pub fn coded<T: CodedOption>(option: T) -> Self {
        Self::Integer(option.code())
    }

    /// 零写作整数 `0`，其余同 [`ParamValue::Real`]
    pub fn real_or_zero(value: f64) -> Self {
        if value == 0.0 {
            Self::Integer(0)
        } else {
            Self::Real(value)
        }
    }

    /// 数值视图
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Real(v) | Self::Fixed { value: v, .. } | Self::Literal { value: v, .. } => {
                Some(*v)
            }
            Self::Integer(v) => Some(*v as f64),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(v) => f.write_str(&format::real_repr(*v)),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Fixed { value, decimals } => f.write_str(&format::fixed(*value, *decimals)),
            Self::Literal { text, .. } => f.write_str(text),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// 参数项
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    /// 键
    pub key: &'static str,
    /// 值
    pub value: ParamValue,
}

/// 参数分节
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSection {
    /// 节标题（写为注释行）
    pub title: &'static str,
    /// 节内参数项
    pub entries: Vec<ConfigEntry>,
}

/// 完整参数表
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfiguration {
    /// 文件标题
    pub title: &'static str,
    /// 有序分节
    pub sections: Vec<ConfigSection>,
}

impl SolverConfiguration {
    /// 按键查找
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries().find(|e| e.key == key).map(|e| &e.value)
    }

    /// 全部参数项（按文件顺序）
    pub fn entries(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }

    /// 全部键（按文件顺序）
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries().map(|e| e.key)
    }

    /// 参数项总数
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 分节布局
#[derive(Debug, Clone, Copy)]
pub struct SectionLayout {
    /// 节标题
    pub title: &'static str,
    /// 节内键顺序
    pub keys: &'static [&'static str],
}

const PLANAR_PARTICLE: &[&str] = &[
    "particle_distance",
    "influence_ratio_lap",
    "influence_ratio_n",
    "max_neighbors",
    "wall_layers",
    "dummy_layers",
];
const PLANAR_MATERIAL: &[&str] = &["density", "viscosity", "gravity_x", "gravity_y"];
const TIME: &[&str] = &["dt", "t_end", "output_interval"];
const PLANAR_PRESSURE: &[&str] = &[
    "solver_type",
    "use_analytical_lambda",
    "cg_max_iter",
    "cg_tolerance",
    "relaxation_coeff",
    "clamp_negative_pressure",
    "ppe_type",
    "c_ppe",
    "gamma_ppe",
];
const PLANAR_SURFACE: &[&str] = &[
    "surface_threshold",
    "surface_detection_method",
    "surface_count_threshold",
];
const COLLISION: &[&str] = &["restitution_coeff", "collision_distance_ratio"];
const SURFACE_TENSION: &[&str] = &[
    "surface_tension_enabled",
    "surface_tension_coeff",
    "surface_tension_re_ratio",
];
const PLANAR_DOMAIN: &[&str] = &["domain_x_min", "domain_x_max", "domain_y_min", "domain_y_max"];
const OUTPUT: &[&str] = &["output_dir"];

const SPATIAL_PARTICLE: &[&str] = &[
    "particle_distance",
    "influence_ratio",
    "max_neighbors",
    "wall_layers",
];
const SPATIAL_MATERIAL: &[&str] = &["density", "viscosity", "gravity_x", "gravity_y", "gravity_z"];
const SPATIAL_PRESSURE: &[&str] = &["cg_max_iter", "cg_tolerance", "relaxation_coeff"];
const SPATIAL_SURFACE: &[&str] = &["surface_threshold"];
const WALL: &[&str] = &["wall_repulsion_coeff", "wall_restitution"];
const SPATIAL_DOMAIN: &[&str] = &[
    "domain_x_min",
    "domain_x_max",
    "domain_y_min",
    "domain_y_max",
    "domain_z_min",
    "domain_z_max",
];

/// 二维参数表布局
pub static PLANAR_LAYOUT: [SectionLayout; 9] = [
    SectionLayout { title: "Particle", keys: PLANAR_PARTICLE },
    SectionLayout { title: "Material", keys: PLANAR_MATERIAL },
    SectionLayout { title: "Time", keys: TIME },
    SectionLayout { title: "Pressure solver", keys: PLANAR_PRESSURE },
    SectionLayout { title: "Free surface", keys: PLANAR_SURFACE },
    SectionLayout { title: "Collision model", keys: COLLISION },
    SectionLayout { title: "Surface tension", keys: SURFACE_TENSION },
    SectionLayout { title: "Domain", keys: PLANAR_DOMAIN },
    SectionLayout { title: "Output", keys: OUTPUT },
];

/// 液滴参数表布局（键与二维相同，仅计算域节标题不同）
pub static DROPLET_LAYOUT: [SectionLayout; 9] = [
    SectionLayout { title: "Particle", keys: PLANAR_PARTICLE },
    SectionLayout { title: "Material", keys: PLANAR_MATERIAL },
    SectionLayout { title: "Time", keys: TIME },
    SectionLayout { title: "Pressure solver", keys: PLANAR_PRESSURE },
    SectionLayout { title: "Free surface", keys: PLANAR_SURFACE },
    SectionLayout { title: "Collision model", keys: COLLISION },
    SectionLayout { title: "Surface tension", keys: SURFACE_TENSION },
    SectionLayout { title: "Domain: large enough for free droplet", keys: PLANAR_DOMAIN },
    SectionLayout { title: "Output", keys: OUTPUT },
];

/// 三维参数表布局
pub static SPATIAL_LAYOUT: [SectionLayout; 8] = [
    SectionLayout { title: "Particle", keys: SPATIAL_PARTICLE },
    SectionLayout { title: "Material", keys: SPATIAL_MATERIAL },
    SectionLayout { title: "Time", keys: TIME },
    SectionLayout { title: "Pressure solver", keys: SPATIAL_PRESSURE },
    SectionLayout { title: "Free surface", keys: SPATIAL_SURFACE },
    SectionLayout { title: "Wall", keys: WALL },
    SectionLayout { title: "Domain", keys: SPATIAL_DOMAIN },
    SectionLayout { title: "Output", keys: OUTPUT },
];

/// 二维参数文件标题
pub const PLANAR_TITLE: &str = "MPS 2D Simulation Parameters";
/// 液滴参数文件标题
pub const DROPLET_TITLE: &str = "MPS 2D Droplet Oscillation Parameters";
/// 三维参数文件标题
pub const SPATIAL_TITLE: &str = "MPS 3D Simulation Parameters";

/// 布局中的全部键（按文件顺序）
pub fn layout_keys(layout: &'static [SectionLayout]) -> impl Iterator<Item = &'static str> {
    layout.iter().flat_map(|s| s.keys.iter().copied())
}

/// 按布局表逐键取值组装参数表
fn assemble(
    title: &'static str,
    layout: &'static [SectionLayout],
    value_of: impl Fn(&str) -> Option<ParamValue>,
) -> Result<SolverConfiguration, ConfigError> {
    let sections = layout
        .iter()
        .map(|section| {
            let entries = section
                .keys
                .iter()
                .map(|&key| {
                    value_of(key)
                        .map(|value| ConfigEntry { key, value })
                        .ok_or_else(|| ConfigError::Missing(key.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ConfigSection {
                title: section.title,
                entries,
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;
    Ok(SolverConfiguration { title, sections })
}

/// 二维溃坝与液滴共用的取值
///
/// 粒子层数、计算域与重力由调用方给出，其余取自设置与固定常量。
struct PlanarValues<'a> {
    spacing: f64,
    wall_layers: u32,
    dummy_layers: u32,
    density: f64,
    gravity_y: f64,
    surface_tension_enabled: bool,
    surface_tension_coeff: f64,
    domain: [ParamValue; 4],
    settings: &'a PlanarSolverSettings,
}

impl PlanarValues<'_> {
    fn value_of(&self, key: &str) -> Option<ParamValue> {
        use ParamValue::{Integer, Real, Text};
        let s = self.settings;
        let value = match key {
            "particle_distance" => Real(self.spacing),
            "influence_ratio_lap" => Real(fixed::INFLUENCE_RATIO_LAP),
            "influence_ratio_n" => Real(fixed::INFLUENCE_RATIO_N),
            "max_neighbors" => Integer(fixed::MAX_NEIGHBORS),
            "wall_layers" => Integer(i64::from(self.wall_layers)),
            "dummy_layers" => Integer(i64::from(self.dummy_layers)),
            "density" => Real(self.density),
            "viscosity" => ParamValue::real_or_zero(s.viscosity),
            "gravity_x" => Real(fixed::GRAVITY_X),
            "gravity_y" => Real(self.gravity_y),
            "dt" => Real(s.dt),
            "t_end" => Real(s.t_end),
            "output_interval" => Integer(s.output_interval),
            "solver_type" => ParamValue::coded(s.solver_type),
            "use_analytical_lambda" => ParamValue::flag(s.use_analytical_lambda),
            "cg_max_iter" => Integer(fixed::CG_MAX_ITER),
            "cg_tolerance" => cg_tolerance(),
            "relaxation_coeff" => Real(fixed::RELAXATION_COEFF),
            "clamp_negative_pressure" => ParamValue::flag(s.clamp_negative_pressure),
            "ppe_type" => ParamValue::coded(s.ppe_type),
            "c_ppe" => Real(s.c_ppe),
            "gamma_ppe" => Real(s.gamma_ppe),
            "surface_threshold" => Real(fixed::SURFACE_THRESHOLD),
            "surface_detection_method" => ParamValue::coded(s.surface_detection_method),
            "surface_count_threshold" => Real(s.surface_count_threshold),
            "restitution_coeff" => Real(s.restitution_coeff),
            "collision_distance_ratio" => Real(s.collision_distance_ratio),
            "surface_tension_enabled" => ParamValue::flag(self.surface_tension_enabled),
            "surface_tension_coeff" => Real(self.surface_tension_coeff),
            "surface_tension_re_ratio" => Real(s.surface_tension_re_ratio),
            "domain_x_min" => self.domain[0].clone(),
            "domain_x_max" => self.domain[1].clone(),
            "domain_y_min" => self.domain[2].clone(),
            "domain_y_max" => self.domain[3].clone(),
            "output_dir" => Text(s.output_dir.clone()),
            _ => return None,
        };
        Some(value)
    }
}

/// CG 收敛判定值
fn cg_tolerance() -> ParamValue {
    ParamValue::Literal {
        value: fixed::CG_TOLERANCE,
        text: fixed::CG_TOLERANCE_TEXT,
    }
}

/// 二维溃坝参数表
pub fn planar_configuration(
    geometry: &PlanarGeometry,
    settings: &PlanarSolverSettings,
) -> Result<SolverConfiguration, ConfigError> {
    let domain = geometry.domain();
    let values = PlanarValues {
        spacing: geometry.spacing(),
        wall_layers: geometry.wall_layers(),
        dummy_layers: geometry.dummy_layers(),
        density: settings.density,
        gravity_y: settings.gravity_y,
        surface_tension_enabled: settings.surface_tension_enabled,
        surface_tension_coeff: settings.surface_tension_coeff,
        domain: [
            ParamValue::Real(0.0),
            ParamValue::Real(domain.x),
            ParamValue::Real(0.0),
            ParamValue::Real(domain.y),
        ],
        settings,
    };
    assemble(PLANAR_TITLE, &PLANAR_LAYOUT, |key| values.value_of(key))
}

/// 液滴参数表
///
/// 无壁面与虚粒子、无重力、表面张力开启；计算域关于原点对称，
/// 以六位小数写出。密度与表面张力系数取自液滴参数。
pub fn droplet_configuration(
    droplet: &DropletParameters,
    settings: &PlanarSolverSettings,
) -> Result<SolverConfiguration, ConfigError> {
    let half = droplet.diagnostics().domain_half_width;
    let bound = |value: f64| ParamValue::Fixed { value, decimals: 6 };
    let values = PlanarValues {
        spacing: droplet.spacing(),
        wall_layers: 0,
        dummy_layers: 0,
        density: droplet.density(),
        gravity_y: 0.0,
        surface_tension_enabled: true,
        surface_tension_coeff: droplet.sigma(),
        domain: [bound(-half), bound(half), bound(-half), bound(half)],
        settings,
    };
    assemble(DROPLET_TITLE, &DROPLET_LAYOUT, |key| values.value_of(key))
}

/// 三维壁面斥力系数 |g_y| / (2 l0)
pub fn wall_repulsion_coeff(gravity_y: f64, spacing: f64) -> f64 {
    gravity_y.abs() / (2.0 * spacing)
}

/// 三维溃坝参数表
pub fn spatial_configuration(
    geometry: &SpatialGeometry,
    settings: &SpatialSolverSettings,
) -> Result<SolverConfiguration, ConfigError> {
    use ParamValue::{Integer, Real, Text};
    let l0 = geometry.spacing();
    let domain = geometry.domain();
    let value_of = |key: &str| -> Option<ParamValue> {
        let value = match key {
            "particle_distance" => Real(l0),
            "influence_ratio" => Real(fixed::INFLUENCE_RATIO_N),
            "max_neighbors" => Integer(fixed::MAX_NEIGHBORS),
            "wall_layers" => Integer(i64::from(geometry.wall_layers())),
            "density" => Real(settings.density),
            "viscosity" => Real(settings.viscosity),
            "gravity_x" => Real(fixed::GRAVITY_X),
            "gravity_y" => Real(settings.gravity_y),
            "gravity_z" => Real(fixed::GRAVITY_Z),
            "dt" => Real(settings.dt),
            "t_end" => Real(settings.t_end),
            "output_interval" => Integer(settings.output_interval),
            "cg_max_iter" => Integer(fixed::CG_MAX_ITER),
            "cg_tolerance" => cg_tolerance(),
            "relaxation_coeff" => Real(fixed::RELAXATION_COEFF),
            "surface_threshold" => Real(fixed::SURFACE_THRESHOLD),
            "wall_repulsion_coeff" => ParamValue::Fixed {
                value: wall_repulsion_coeff(settings.gravity_y, l0),
                decimals: 1,
            },
            "wall_restitution" => Real(fixed::WALL_RESTITUTION),
            "domain_x_min" | "domain_y_min" | "domain_z_min" => Real(0.0),
            "domain_x_max" => Real(domain.x),
            "domain_y_max" => Real(domain.y),
            "domain_z_max" => Real(domain.z),
            "output_dir" => Text(settings.output_dir.clone()),
            _ => return None,
        };
        Some(value)
    };
    assemble(SPATIAL_TITLE, &SPATIAL_LAYOUT, value_of)
}

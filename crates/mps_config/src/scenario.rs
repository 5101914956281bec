// crates/mps_config/src/scenario.rs

//! 算例文件
//!
//! JSON 描述的一次完整生成：几何、粒子层数、输出目录与求解器设置。
//! 通过 `kind` 字段区分算例类型，未给出的字段取默认值。
//!
//! ```json
//! {
//!   "kind": "dambreak2d",
//!   "l0": 0.004,
//!   "solver": { "dt": 2.5e-4, "solver_type": "cg" }
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use glam::{DVec2, DVec3};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use mps_core::{DropletParameters, PlanarGeometry, SpatialGeometry};

use crate::defaults::{dambreak2d, dambreak3d, droplet};
use crate::error::ConfigError;
use crate::schema::{self, SolverConfiguration};
use crate::settings::{PlanarSolverSettings, SpatialSolverSettings};

/// 算例类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    /// 二维溃坝
    DamBreak2d,
    /// 三维溃坝
    DamBreak3d,
    /// 二维液滴振荡
    Droplet,
}

impl ScenarioKind {
    /// 全部类型
    pub const ALL: [ScenarioKind; 3] = [Self::DamBreak2d, Self::DamBreak3d, Self::Droplet];

    /// 名称（与 JSON `kind` 字段一致）
    pub fn name(self) -> &'static str {
        match self {
            Self::DamBreak2d => "dambreak2d",
            Self::DamBreak3d => "dambreak3d",
            Self::Droplet => "droplet",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == lower)
            .ok_or_else(|| {
                ConfigError::invalid_value("kind", s, "期望 dambreak2d、dambreak3d 或 droplet")
            })
    }
}

/// 二维溃坝算例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamBreak2dScenario {
    /// 计算域 [m]
    pub domain: DVec2,
    /// 水柱 [m]
    pub water: DVec2,
    /// 粒子间距 [m]
    pub l0: f64,
    /// 壁面粒子层数
    pub wall_layers: i64,
    /// 虚粒子层数
    pub dummy_layers: i64,
    /// 文件输出目录
    pub outdir: String,
    /// 求解器设置
    pub solver: PlanarSolverSettings,
}

impl Default for DamBreak2dScenario {
    fn default() -> Self {
        Self {
            domain: DVec2::new(dambreak2d::DOMAIN_X, dambreak2d::DOMAIN_Y),
            water: DVec2::new(dambreak2d::WATER_X, dambreak2d::WATER_Y),
            l0: dambreak2d::L0,
            wall_layers: dambreak2d::WALL_LAYERS,
            dummy_layers: dambreak2d::DUMMY_LAYERS,
            outdir: dambreak2d::OUTDIR.to_string(),
            solver: PlanarSolverSettings::default(),
        }
    }
}

impl DamBreak2dScenario {
    /// 几何参数
    pub fn geometry(&self) -> Result<PlanarGeometry, ConfigError> {
        Ok(PlanarGeometry::new(
            self.l0,
            self.domain,
            self.water,
            self.wall_layers,
            self.dummy_layers,
        )?)
    }

    /// 求解器参数表
    pub fn configuration(&self) -> Result<SolverConfiguration, ConfigError> {
        schema::planar_configuration(&self.geometry()?, &self.solver)
    }
}

/// 三维溃坝算例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamBreak3dScenario {
    /// 计算域 [m]
    pub domain: DVec3,
    /// 水柱 [m]
    pub water: DVec3,
    /// 粒子间距 [m]
    pub l0: f64,
    /// 壁面粒子层数
    pub wall_layers: i64,
    /// 文件输出目录
    pub outdir: String,
    /// 求解器设置
    pub solver: SpatialSolverSettings,
}

impl Default for DamBreak3dScenario {
    fn default() -> Self {
        Self {
            domain: DVec3::new(dambreak3d::DOMAIN_X, dambreak3d::DOMAIN_Y, dambreak3d::DOMAIN_Z),
            water: DVec3::new(dambreak3d::WATER_X, dambreak3d::WATER_Y, dambreak3d::WATER_Z),
            l0: dambreak3d::L0,
            wall_layers: dambreak3d::WALL_LAYERS,
            outdir: dambreak3d::OUTDIR.to_string(),
            solver: SpatialSolverSettings::default(),
        }
    }
}

impl DamBreak3dScenario {
    /// 几何参数
    pub fn geometry(&self) -> Result<SpatialGeometry, ConfigError> {
        Ok(SpatialGeometry::new(self.l0, self.domain, self.water, self.wall_layers)?)
    }

    /// 求解器参数表
    pub fn configuration(&self) -> Result<SolverConfiguration, ConfigError> {
        schema::spatial_configuration(&self.geometry()?, &self.solver)
    }
}

/// 液滴振荡算例
///
/// 密度取 `solver.density`，表面张力系数取 `solver.surface_tension_coeff`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropletScenario {
    /// 粒子间距 [m]
    pub l0: f64,
    /// x 方向粒子数
    pub nx: usize,
    /// y 方向粒子数
    pub ny: usize,
    /// 文件输出目录
    pub outdir: String,
    /// 求解器设置（缺省项取液滴默认值）
    #[serde(deserialize_with = "droplet_solver")]
    pub solver: PlanarSolverSettings,
}

impl Default for DropletScenario {
    fn default() -> Self {
        Self {
            l0: droplet::L0,
            nx: droplet::NX,
            ny: droplet::NY,
            outdir: droplet::OUTDIR.to_string(),
            solver: PlanarSolverSettings::droplet(),
        }
    }
}

impl DropletScenario {
    /// 液滴参数
    pub fn parameters(&self) -> Result<DropletParameters, ConfigError> {
        Ok(DropletParameters::new(
            self.l0,
            self.nx,
            self.ny,
            self.solver.density,
            self.solver.surface_tension_coeff,
        )?)
    }

    /// 求解器参数表
    pub fn configuration(&self) -> Result<SolverConfiguration, ConfigError> {
        schema::droplet_configuration(&self.parameters()?, &self.solver)
    }
}

/// 在液滴默认设置上覆盖给出的字段
fn droplet_solver<'de, D>(deserializer: D) -> Result<PlanarSolverSettings, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = serde_json::Value::deserialize(deserializer)?;
    let overrides = overrides
        .as_object()
        .ok_or_else(|| de::Error::custom("solver 必须为 JSON 对象"))?;
    let mut merged =
        serde_json::to_value(PlanarSolverSettings::droplet()).map_err(de::Error::custom)?;
    if let Some(base) = merged.as_object_mut() {
        for (key, value) in overrides {
            base.insert(key.clone(), value.clone());
        }
    }
    serde_json::from_value(merged).map_err(de::Error::custom)
}

/// 算例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Scenario {
    /// 二维溃坝
    DamBreak2d(DamBreak2dScenario),
    /// 三维溃坝
    DamBreak3d(DamBreak3dScenario),
    /// 二维液滴振荡
    Droplet(DropletScenario),
}

impl Scenario {
    /// 指定类型的默认算例
    pub fn default_for(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::DamBreak2d => Self::DamBreak2d(DamBreak2dScenario::default()),
            ScenarioKind::DamBreak3d => Self::DamBreak3d(DamBreak3dScenario::default()),
            ScenarioKind::Droplet => Self::Droplet(DropletScenario::default()),
        }
    }

    /// 算例类型
    pub fn kind(&self) -> ScenarioKind {
        match self {
            Self::DamBreak2d(_) => ScenarioKind::DamBreak2d,
            Self::DamBreak3d(_) => ScenarioKind::DamBreak3d,
            Self::Droplet(_) => ScenarioKind::Droplet,
        }
    }

    /// 文件输出目录
    pub fn outdir(&self) -> &str {
        match self {
            Self::DamBreak2d(s) => &s.outdir,
            Self::DamBreak3d(s) => &s.outdir,
            Self::Droplet(s) => &s.outdir,
        }
    }

    /// 从 JSON 文件加载
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 从 JSON 文本解析
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 保存为格式化 JSON
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// 格式化 JSON 文本
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 校验几何与求解器设置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.outdir().is_empty() {
            return Err(ConfigError::Missing("outdir".to_string()));
        }
        match self {
            Self::DamBreak2d(s) => {
                s.geometry()?;
                s.solver.validate()
            }
            Self::DamBreak3d(s) => {
                s.geometry()?;
                s.solver.validate()
            }
            Self::Droplet(s) => {
                s.parameters()?;
                s.solver.validate()
            }
        }
    }

    /// 求解器参数表
    pub fn configuration(&self) -> Result<SolverConfiguration, ConfigError> {
        match self {
            Self::DamBreak2d(s) => s.configuration(),
            Self::DamBreak3d(s) => s.configuration(),
            Self::Droplet(s) => s.configuration(),
        }
    }
}

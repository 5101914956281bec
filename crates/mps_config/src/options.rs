// crates/mps_config/src/options.rs

//! 求解器枚举选项
//!
//! JSON 中按名称序列化，参数文件中按整数编码写出。
//! 解析时同时接受名称与编码。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// 压力泊松方程线性求解器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PressureSolver {
    /// 共轭梯度法
    Cg,
    /// 不完全 Cholesky 预条件共轭梯度法
    #[default]
    Iccg,
}

/// 压力泊松方程定式化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PpeFormulation {
    /// 传统粒子数密度型
    #[default]
    DensityInvariant,
    /// Natsui 弱可压缩型
    WeaklyCompressible,
}

/// 自由表面判定方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceDetection {
    /// 粒子数密度阈值
    #[default]
    NumberDensity,
    /// 近邻粒子数阈值
    NeighborCount,
}

/// 整数编码的求解器选项
pub trait CodedOption: Sized + Copy + 'static {
    /// 参数键
    const KEY: &'static str;
    /// 全部取值
    const VARIANTS: &'static [Self];

    /// 整数编码
    fn code(self) -> i64;

    /// 名称
    fn name(self) -> &'static str;

    /// 由编码解析
    fn from_code(code: i64) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.code() == code)
    }

    /// 由名称或编码解析
    fn parse_option(s: &str) -> Result<Self, ConfigError> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::from_code(code)
                .ok_or_else(|| ConfigError::invalid_value(Self::KEY, trimmed, "未知的编码"));
        }
        let lower = trimmed.to_lowercase().replace('-', "_");
        Self::VARIANTS
            .iter()
            .copied()
            .find(|v| v.name() == lower)
            .ok_or_else(|| ConfigError::invalid_value(Self::KEY, trimmed, "未知的名称"))
    }
}

impl CodedOption for PressureSolver {
    const KEY: &'static str = "solver_type";
    const VARIANTS: &'static [Self] = &[Self::Cg, Self::Iccg];

    fn code(self) -> i64 {
        match self {
            Self::Cg => 0,
            Self::Iccg => 1,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Cg => "cg",
            Self::Iccg => "iccg",
        }
    }
}

impl CodedOption for PpeFormulation {
    const KEY: &'static str = "ppe_type";
    const VARIANTS: &'static [Self] = &[Self::DensityInvariant, Self::WeaklyCompressible];

    fn code(self) -> i64 {
        match self {
            Self::DensityInvariant => 0,
            Self::WeaklyCompressible => 1,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::DensityInvariant => "density_invariant",
            Self::WeaklyCompressible => "weakly_compressible",
        }
    }
}

impl CodedOption for SurfaceDetection {
    const KEY: &'static str = "surface_detection_method";
    const VARIANTS: &'static [Self] = &[Self::NumberDensity, Self::NeighborCount];

    fn code(self) -> i64 {
        match self {
            Self::NumberDensity => 0,
            Self::NeighborCount => 1,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::NumberDensity => "number_density",
            Self::NeighborCount => "neighbor_count",
        }
    }
}

macro_rules! impl_display_from_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.name())
                }
            }

            impl FromStr for $ty {
                type Err = ConfigError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::parse_option(s)
                }
            }
        )*
    };
}

impl_display_from_str!(PressureSolver, PpeFormulation, SurfaceDetection);

// crates/mps_core/src/error.rs

//! 核心层错误类型
//!
//! 几何参数在格点遍历开始之前即完成校验，任何非法输入都直接返回错误，
//! 分类器本身不会产生错误（规则表对每个格点都是全函数）。
//!
//! # 示例
//!
//! ```
//! use mps_core::error::{MpsError, MpsResult};
//!
//! fn check_spacing(l0: f64) -> MpsResult<()> {
//!     MpsError::check_positive("spacing", l0)
//! }
//!
//! assert!(check_spacing(0.01).is_ok());
//! assert!(check_spacing(-0.01).is_err());
//! ```

use thiserror::Error;

use crate::lattice::MAX_LATTICE_SITES;

/// 核心层结果类型
pub type MpsResult<T> = Result<T, MpsError>;

/// 核心层错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MpsError {
    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数值必须为正
    #[error("参数必须为正数: {field}={value}")]
    NonPositive {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
    },

    /// 数值非有限
    #[error("参数不是有限数值: {field}={value}")]
    NonFinite {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
    },

    /// 层数为负
    #[error("层数不能为负: {field}={value}")]
    NegativeLayers {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: i64,
    },

    /// 流体块超出计算域
    #[error("流体块超出计算域: {axis} 轴流体尺寸 {fluid} > 计算域尺寸 {domain}")]
    ExtentExceedsDomain {
        /// 坐标轴名称
        axis: &'static str,
        /// 流体块尺寸
        fluid: f64,
        /// 计算域尺寸
        domain: f64,
    },

    /// 遍历盒过大
    #[error("遍历盒格点数约 {sites:.3e}，超过上限 {limit:.0e}；请增大粒子间距或减小计算域")]
    LatticeTooLarge {
        /// 估计格点数
        sites: f64,
        /// 上限
        limit: f64,
    },

    /// 未知粒子类型编码
    #[error("未知的粒子类型编码: {code}")]
    UnknownParticleType {
        /// 类型编码
        code: i64,
    },
}

impl MpsError {
    /// 创建无效输入错误
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 检查数值为有限正数
    pub fn check_positive(field: &'static str, value: f64) -> MpsResult<()> {
        if !value.is_finite() {
            return Err(Self::NonFinite { field, value });
        }
        if value <= 0.0 {
            return Err(Self::NonPositive { field, value });
        }
        Ok(())
    }

    /// 检查层数非负并转换为 `u32`
    pub fn check_layers(field: &'static str, value: i64) -> MpsResult<u32> {
        if value < 0 {
            return Err(Self::NegativeLayers { field, value });
        }
        u32::try_from(value)
            .map_err(|_| Self::invalid_input(format!("{field}={value} 超出允许的层数范围")))
    }

    /// 检查估计格点数不超过 [`MAX_LATTICE_SITES`]（非有限值同样拒绝）
    pub fn check_lattice_size(sites: f64) -> MpsResult<()> {
        if sites.is_finite() && sites <= MAX_LATTICE_SITES {
            return Ok(());
        }
        Err(Self::LatticeTooLarge {
            sites,
            limit: MAX_LATTICE_SITES,
        })
    }

    /// 检查流体块尺寸不超过计算域
    pub fn check_within_domain(axis: &'static str, fluid: f64, domain: f64) -> MpsResult<()> {
        if fluid > domain {
            return Err(Self::ExtentExceedsDomain {
                axis,
                fluid,
                domain,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_positive() {
        assert!(MpsError::check_positive("spacing", 0.008).is_ok());
        assert_eq!(
            MpsError::check_positive("spacing", 0.0),
            Err(MpsError::NonPositive {
                field: "spacing",
                value: 0.0
            })
        );
        assert!(matches!(
            MpsError::check_positive("spacing", f64::NAN),
            Err(MpsError::NonFinite { .. })
        ));
        assert!(matches!(
            MpsError::check_positive("spacing", f64::INFINITY),
            Err(MpsError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_check_layers() {
        assert_eq!(MpsError::check_layers("wall_layers", 0), Ok(0));
        assert_eq!(MpsError::check_layers("wall_layers", 4), Ok(4));
        assert!(matches!(
            MpsError::check_layers("wall_layers", -1),
            Err(MpsError::NegativeLayers { value: -1, .. })
        ));
        assert!(MpsError::check_layers("wall_layers", i64::MAX).is_err());
    }

    #[test]
    fn test_check_lattice_size() {
        assert!(MpsError::check_lattice_size(1.0e6).is_ok());
        assert!(MpsError::check_lattice_size(MAX_LATTICE_SITES).is_ok());
        assert!(matches!(
            MpsError::check_lattice_size(2.0e9),
            Err(MpsError::LatticeTooLarge { .. })
        ));
        assert!(MpsError::check_lattice_size(f64::INFINITY).is_err());
        assert!(MpsError::check_lattice_size(f64::NAN).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = MpsError::ExtentExceedsDomain {
            axis: "x",
            fluid: 0.5,
            domain: 0.4,
        };
        let msg = err.to_string();
        assert!(msg.contains("x"));
        assert!(msg.contains("0.5"));
    }
}

// crates/mps_config/src/error.rs

//! 配置层错误类型

use mps_core::MpsError;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 缺失配置
    #[error("缺失配置: {0}")]
    Missing(String),

    /// 几何参数错误
    #[error("几何参数错误: {0}")]
    Geometry(#[from] MpsError),
}

impl ConfigError {
    /// 创建无效值错误
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid_value("solver_type", "gmres", "期望 cg 或 iccg");
        assert!(err.to_string().contains("solver_type"));
        assert!(err.to_string().contains("gmres"));
    }

    #[test]
    fn test_geometry_error_conversion() {
        let err: ConfigError = MpsError::NonPositive {
            field: "spacing",
            value: 0.0,
        }
        .into();
        assert!(matches!(err, ConfigError::Geometry(_)));
    }
}

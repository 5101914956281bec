// crates/mps_io/src/error.rs

//! IO 错误类型定义
//!
//! 所有文件操作错误都携带文件路径；格式错误携带行号。

use std::path::Path;

use mps_core::MpsError;
use thiserror::Error;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 文件读写失败
    #[error("文件读写失败: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 解析错误
    #[error("文件解析错误: {file}:{line} - {message}")]
    ParseError {
        file: String,
        line: usize,
        message: String,
    },

    /// 粒子数声明与数据行数不一致
    #[error("粒子数不一致: {file}, 声明 {declared}, 实际 {actual}")]
    CountMismatch {
        file: String,
        declared: usize,
        actual: usize,
    },

    /// CSV 读取错误
    #[error("CSV 错误: {file}: {message}")]
    Csv { file: String, message: String },

    /// 缺少列
    #[error("缺少列 '{column}': {file}")]
    MissingColumn { file: String, column: String },

    /// 缺少键
    #[error("缺少键 '{key}': {file}")]
    MissingKey { file: String, key: String },

    /// 核心层错误转换
    #[error("核心层错误: {0}")]
    Core(#[from] MpsError),
}

impl IoError {
    /// 创建带路径的 IO 错误
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// 创建解析错误
    pub fn parse(file: &Path, line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.display().to_string(),
            line,
            message: message.into(),
        }
    }

    /// 创建 CSV 错误
    pub fn csv(file: &Path, err: impl std::fmt::Display) -> Self {
        Self::Csv {
            file: file.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// 将 `std::io::Error` 映射为带路径的错误
pub(crate) fn at(path: &Path) -> impl FnOnce(std::io::Error) -> IoError + '_ {
    move |source| IoError::io(path, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_carries_path() {
        let err = IoError::io(
            Path::new("out/particles.txt"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("out/particles.txt"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = IoError::parse(Path::new("params.txt"), 12, "缺少值");
        assert_eq!(err.to_string(), "文件解析错误: params.txt:12 - 缺少值");
    }

    #[test]
    fn test_core_conversion() {
        let err: IoError = MpsError::UnknownParticleType { code: 2 }.into();
        assert!(matches!(err, IoError::Core(_)));
    }
}

// crates/mps_io/src/param_file.rs

//! 求解器参数文件
//!
//! 每行 `key value`，`#` 开头为注释。分节标题写为注释行。

use std::fs;
use std::path::Path;

use mps_config::SolverConfiguration;
use tracing::debug;

use crate::error::{at, IoError, IoResult};

/// 键名列宽
const KEY_WIDTH: usize = 20;

/// 渲染参数文件文本
pub fn render_params(config: &SolverConfiguration) -> String {
    let mut text = format!("# {}\n", config.title);
    for section in &config.sections {
        text.push_str(&format!("#\n# {}\n", section.title));
        for entry in &section.entries {
            text.push_str(&format!("{:<width$} {}\n", entry.key, entry.value, width = KEY_WIDTH));
        }
    }
    text
}

/// 写出参数文件
pub fn write_params(path: &Path, config: &SolverConfiguration) -> IoResult<()> {
    fs::write(path, render_params(config)).map_err(at(path))?;
    debug!("写出参数文件 {}: {} 项", path.display(), config.len());
    Ok(())
}

/// 已读取的参数表（保持文件顺序）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamTable {
    entries: Vec<(String, String)>,
}

impl ParamTable {
    /// 按键取文本值；重复键取最后一次出现的值
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 是否包含键
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// 按键取实数值
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// 按键取整数值
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// 全部键（按文件顺序）
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// 参数项数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 读取参数文件
pub fn read_params(path: &Path) -> IoResult<ParamTable> {
    let content = fs::read_to_string(path).map_err(at(path))?;
    parse_params(&content, path)
}

/// 解析参数文件文本
pub fn parse_params(content: &str, path: &Path) -> IoResult<ParamTable> {
    let mut entries = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            return Err(IoError::parse(path, index + 1, format!("缺少值: '{line}'")));
        };
        entries.push((key.to_string(), value.to_string()));
    }
    Ok(ParamTable { entries })
}

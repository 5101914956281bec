// crates/mps_io/src/control.rs

//! 计算控制文件
//!
//! 指明粒子文件与参数文件的位置。相对路径以控制文件所在目录为基准。

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{at, IoError, IoResult};

/// 控制文件名
pub const CONTROL_FILE_NAME: &str = "cal.txt";
/// 粒子文件名
pub const PARTICLE_FILE_NAME: &str = "particles.txt";
/// 参数文件名
pub const PARAM_FILE_NAME: &str = "params.txt";

const PARTICLE_KEY: &str = "particle_file";
const PARAM_KEY: &str = "param_file";

/// 计算控制清单
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlManifest {
    /// 粒子文件
    pub particle_file: PathBuf,
    /// 参数文件
    pub param_file: PathBuf,
}

impl Default for ControlManifest {
    fn default() -> Self {
        Self {
            particle_file: PathBuf::from(PARTICLE_FILE_NAME),
            param_file: PathBuf::from(PARAM_FILE_NAME),
        }
    }
}

impl ControlManifest {
    /// 渲染控制文件文本
    pub fn render(&self, title: &str) -> String {
        format!(
            "# {title}\n{PARTICLE_KEY}  {}\n{PARAM_KEY}     {}\n",
            self.particle_file.display(),
            self.param_file.display()
        )
    }

    /// 写出控制文件
    pub fn write(&self, path: &Path, title: &str) -> IoResult<()> {
        fs::write(path, self.render(title)).map_err(at(path))?;
        debug!("写出控制文件 {}", path.display());
        Ok(())
    }

    /// 读取控制文件，返回解析后的路径
    ///
    /// 未知键记录警告后忽略；缺少任一文件键时报错。
    pub fn read(path: &Path) -> IoResult<Self> {
        let content = fs::read_to_string(path).map_err(at(path))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));

        let mut particle_file = None;
        let mut param_file = None;
        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                return Err(IoError::parse(path, index + 1, format!("缺少值: '{line}'")));
            };
            match key {
                PARTICLE_KEY => particle_file = Some(resolve(base, value)),
                PARAM_KEY => param_file = Some(resolve(base, value)),
                other => warn!("{}:{} 未知键 '{}' 已忽略", path.display(), index + 1, other),
            }
        }

        let missing = |key: &str| IoError::MissingKey {
            file: path.display().to_string(),
            key: key.to_string(),
        };
        Ok(Self {
            particle_file: particle_file.ok_or_else(|| missing(PARTICLE_KEY))?,
            param_file: param_file.ok_or_else(|| missing(PARAM_KEY))?,
        })
    }
}

/// 相对路径以 `base` 为基准，绝对路径保持不变
fn resolve(base: &Path, value: &str) -> PathBuf {
    let candidate = Path::new(value);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base.join(candidate)
    }
}

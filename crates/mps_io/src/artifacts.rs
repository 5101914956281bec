// crates/mps_io/src/artifacts.rs

//! 求解器输入文件组写出
//!
//! 在输出目录中依次写出粒子文件、参数文件与计算控制文件。
//! 任一步失败立即返回，不重试。

use std::fs;
use std::path::{Path, PathBuf};

use mps_config::SolverConfiguration;
use mps_core::{Particle, ParticleSummary};
use tracing::debug;

use crate::control::{ControlManifest, CONTROL_FILE_NAME, PARAM_FILE_NAME, PARTICLE_FILE_NAME};
use crate::error::{at, IoResult};
use crate::lattice_file::{write_lattice, LatticeHeader, LatticeVector};
use crate::param_file::write_params;

/// 已写出的文件
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSet {
    /// 粒子文件
    pub particle_file: PathBuf,
    /// 参数文件
    pub param_file: PathBuf,
    /// 计算控制文件
    pub control_file: PathBuf,
    /// 粒子计数
    pub summary: ParticleSummary,
}

impl ArtifactSet {
    /// 按写出顺序列出路径
    pub fn paths(&self) -> [&Path; 3] {
        [&self.particle_file, &self.param_file, &self.control_file]
    }
}

/// 写出一组求解器输入文件
///
/// 输出目录不存在时自动创建。
pub fn write_artifacts<V: LatticeVector>(
    outdir: &Path,
    header: &LatticeHeader,
    particles: &[Particle<V>],
    config: &SolverConfiguration,
) -> IoResult<ArtifactSet> {
    fs::create_dir_all(outdir).map_err(at(outdir))?;

    let particle_file = outdir.join(PARTICLE_FILE_NAME);
    let summary = write_lattice(&particle_file, header, particles)?;

    let param_file = outdir.join(PARAM_FILE_NAME);
    write_params(&param_file, config)?;

    let control_file = outdir.join(CONTROL_FILE_NAME);
    ControlManifest::default().write(&control_file, header.control_title())?;

    debug!("{} 中写出 3 个文件", outdir.display());
    Ok(ArtifactSet {
        particle_file,
        param_file,
        control_file,
        summary,
    })
}

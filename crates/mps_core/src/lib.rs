// crates/mps_core/src/lib.rs

//! MPS 初始粒子布置核心层
//!
//! 由几何参数生成带区域标签的格点粒子，供外部 MPS 求解器读取。
//! 本层是纯计算，不做任何文件读写。
//!
//! # 模块概览
//!
//! - [`geometry`]: 几何参数（二维 / 三维），构造时校验
//! - [`lattice`]: 格点索引、遍历盒与坐标映射
//! - [`tolerance`]: 边界判定容差
//! - [`particle`]: 粒子与区域类型
//! - [`classifier`]: 二维三层、三维两层格点分类器
//! - [`droplet`]: 无重力液滴算例的粒子块
//! - [`summary`]: 粒子集合统计
//! - [`error`]: 错误类型
//!
//! # 层级架构
//!
//! ```text
//! mps_cli     ─> 命令行
//! mps_io      ─> 文件写出 / 读取
//! mps_config  ─> 求解器配置契约
//! mps_core    ─> 几何、分类器、统计 (本层)
//! ```

#![warn(clippy::all)]

pub mod classifier;
pub mod droplet;
pub mod error;
pub mod geometry;
pub mod lattice;
pub mod particle;
pub mod summary;
pub mod tolerance;

pub use classifier::{LatticeClassifier, ThreeTierPlanar, TwoTierSpatial};
pub use droplet::{DropletDiagnostics, DropletParameters};
pub use error::{MpsError, MpsResult};
pub use geometry::{PlanarGeometry, SpatialGeometry};
pub use particle::{Particle, Particle2, Particle3, ParticleKind};
pub use summary::ParticleSummary;

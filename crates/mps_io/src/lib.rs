// crates/mps_io/src/lib.rs

//! MPS 文件读写
//!
//! 写出求解器输入文件组（粒子文件、参数文件、计算控制文件），
//! 读回这些文件用于校验，并读取求解器输出帧。
//!
//! # 模块
//!
//! - [`artifacts`]: 文件组写出
//! - [`lattice_file`]: 粒子文件
//! - [`param_file`]: 参数文件
//! - [`control`]: 计算控制文件
//! - [`frame`]: 求解器输出帧

#![warn(clippy::all)]

pub mod artifacts;
pub mod control;
pub mod dimension;
pub mod error;
pub mod frame;
pub mod lattice_file;
pub mod param_file;

pub use artifacts::{write_artifacts, ArtifactSet};
pub use control::ControlManifest;
pub use dimension::Dimension;
pub use error::{IoError, IoResult};
pub use frame::{frame_path, list_frames, read_frame, Frame, FrameRecord};
pub use lattice_file::{read_lattice, write_lattice, LatticeFile, LatticeHeader, LatticeParticles};
pub use param_file::{read_params, write_params, ParamTable};

// crates/mps_config/src/lib.rs

//! MPS 配置层
//!
//! 提供求解器参数文件的固定键值契约、求解器设置及其默认值、
//! 枚举编码选项与 JSON 算例文件。
//!
//! # 模块
//!
//! - [`schema`]: 参数表布局与组装
//! - [`settings`]: 二维/三维求解器设置
//! - [`scenario`]: 算例文件加载、校验与保存
//! - [`options`]: 整数编码的求解器选项
//! - [`format`]: 数值文本格式
//! - [`defaults`]: 默认值与固定常量

#![warn(clippy::all)]

pub mod defaults;
pub mod error;
pub mod format;
pub mod options;
pub mod scenario;
pub mod schema;
pub mod settings;

pub use error::ConfigError;
pub use options::{CodedOption, PpeFormulation, PressureSolver, SurfaceDetection};
pub use scenario::{
    DamBreak2dScenario, DamBreak3dScenario, DropletScenario, Scenario, ScenarioKind,
};
pub use schema::{ConfigEntry, ConfigSection, ParamValue, SolverConfiguration};
pub use settings::{PlanarSolverSettings, SpatialSolverSettings};

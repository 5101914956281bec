// apps/mps_cli/src/commands/validate.rs

//! 文件组验证命令
//!
//! 读回计算控制文件所指向的粒子文件与参数文件，检查二者是否一致。

use anyhow::{bail, Result};
use clap::Args;
use mps_config::defaults::fixed;
use mps_config::schema::{layout_keys, PLANAR_LAYOUT, SPATIAL_LAYOUT};
use mps_config::{CodedOption, PpeFormulation, PressureSolver, SurfaceDetection};
use mps_io::{read_lattice, read_params, ControlManifest, Dimension, LatticeFile, ParamTable};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// 粒子间距一致性的相对容差
const SPACING_TOLERANCE: f64 = 1.0e-6;

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 计算控制文件路径
    #[arg(short, long, default_value = "cal.txt")]
    pub cal: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== MPS 文件组验证 ===");
    let result = validate_case(&args.cal);
    print_validation_result(&result, args.strict)
}

fn validate_case(cal: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("\n检查计算控制文件: {}", cal.display());
    let manifest = match ControlManifest::read(cal) {
        Ok(m) => m,
        Err(e) => {
            result.add_error(e.to_string());
            return result;
        }
    };

    println!("检查粒子文件: {}", manifest.particle_file.display());
    let lattice = match read_lattice(&manifest.particle_file) {
        Ok(l) => Some(l),
        Err(e) => {
            result.add_error(e.to_string());
            None
        }
    };

    println!("检查参数文件: {}", manifest.param_file.display());
    let params = match read_params(&manifest.param_file) {
        Ok(p) => Some(p),
        Err(e) => {
            result.add_error(e.to_string());
            None
        }
    };

    if let Some(lattice) = &lattice {
        let summary = lattice.summary();
        println!("  {} 粒子: {}", lattice.dimension(), summary);
        if summary.fluid == 0 {
            result.add_warning("粒子文件中没有流体粒子");
        }
    }

    if let Some(params) = &params {
        let dimension = lattice
            .as_ref()
            .map(LatticeFile::dimension)
            .unwrap_or(Dimension::Planar);
        check_keys(params, dimension, &mut result);
        if dimension == Dimension::Planar {
            check_options(params, &mut result);
        }
    }

    if let (Some(lattice), Some(params)) = (&lattice, &params) {
        check_spacing(lattice, params, &mut result);
        check_boundary_thickness(lattice, params, &mut result);
    }

    result
}

/// 固定键齐全，未知键给出警告
fn check_keys(params: &ParamTable, dimension: Dimension, result: &mut ValidationResult) {
    let expected: Vec<&str> = match dimension {
        Dimension::Planar => layout_keys(&PLANAR_LAYOUT).collect(),
        Dimension::Spatial => layout_keys(&SPATIAL_LAYOUT).collect(),
    };

    for key in &expected {
        if !params.contains(key) {
            result.add_error(format!("参数文件缺少键: {key}"));
        }
    }

    let known: HashSet<&str> = expected.into_iter().collect();
    for key in params.keys() {
        if !known.contains(key) {
            result.add_warning(format!("参数文件含未知键: {key}"));
        }
    }
}

/// 整数编码选项可解析
fn check_options(params: &ParamTable, result: &mut ValidationResult) {
    check_option::<PressureSolver>(params, result);
    check_option::<PpeFormulation>(params, result);
    check_option::<SurfaceDetection>(params, result);
}

fn check_option<T: CodedOption>(params: &ParamTable, result: &mut ValidationResult) {
    if let Some(raw) = params.get(T::KEY) {
        if let Err(e) = T::parse_option(raw) {
            result.add_error(e.to_string());
        }
    }
}

/// particle_distance 与粒子文件的格点间距一致
fn check_spacing(lattice: &LatticeFile, params: &ParamTable, result: &mut ValidationResult) {
    let Some(declared) = params.get_f64("particle_distance") else {
        return;
    };
    let Some(measured) = lattice.lattice_spacing() else {
        result.add_warning("无法由粒子文件推断粒子间距");
        return;
    };
    if (declared - measured).abs() > SPACING_TOLERANCE * declared.abs() {
        result.add_error(format!(
            "particle_distance = {declared} 与粒子文件的格点间距 {measured} 不一致"
        ));
    }
}

/// 边界层数不少于影响半径覆盖的格点数
fn check_boundary_thickness(
    lattice: &LatticeFile,
    params: &ParamTable,
    result: &mut ValidationResult,
) {
    if lattice.summary().boundary() == 0 {
        return;
    }

    let wall = params.get_i64("wall_layers").unwrap_or(0);
    let (layers, ratio) = match lattice.dimension() {
        Dimension::Planar => {
            let dummy = params.get_i64("dummy_layers").unwrap_or(0);
            let lap = params
                .get_f64("influence_ratio_lap")
                .unwrap_or(fixed::INFLUENCE_RATIO_LAP);
            let n = params
                .get_f64("influence_ratio_n")
                .unwrap_or(fixed::INFLUENCE_RATIO_N);
            (wall + dummy, lap.max(n))
        }
        Dimension::Spatial => {
            let ratio = params
                .get_f64("influence_ratio")
                .unwrap_or(fixed::INFLUENCE_RATIO_N);
            (wall, ratio)
        }
    };

    let required = ratio.floor() as i64;
    if layers < required {
        result.add_warning(format!(
            "边界层数 {layers} 少于影响半径所需的 {required} 层，壁面附近粒子数密度将偏低"
        ));
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    let success = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if success {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}

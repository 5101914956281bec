// crates/mps_io/src/lattice_file.rs

//! 粒子初始配置文件
//!
//! 文件由 `#` 注释头、粒子数行、列注释与数据行组成：
//!
//! ```text
//! # MPS 2D Dam Break - Initial Particle Configuration
//! # Domain: 0.584 x 0.292 m
//! # Water column: 0.146 x 0.292 m
//! # Particle distance: 0.008 m
//! # Fluid: 648, Wall: 608, Dummy: 672, Total: 1928
//! 1928
//! # x y vx vy type
//! -5.60000000e-02 -5.60000000e-02 0.00000000e+00 0.00000000e+00 3
//! ```
//!
//! 求解器将第一个非注释行视为粒子数，其后的非注释行逐行为粒子。

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use glam::{DVec2, DVec3};
use mps_config::format::{real_repr, scientific};
use mps_core::{MpsError, Particle, Particle2, Particle3, ParticleKind, ParticleSummary};
use tracing::debug;

use crate::dimension::Dimension;
use crate::error::{at, IoError, IoResult};

/// 数据行实数的有效位数
pub const MANTISSA_DIGITS: usize = 8;

/// 粒子文件头
#[derive(Debug, Clone, PartialEq)]
pub enum LatticeHeader {
    /// 二维溃坝
    DamBreak2d {
        domain: DVec2,
        water: DVec2,
        spacing: f64,
    },
    /// 三维溃坝
    DamBreak3d {
        domain: DVec3,
        water: DVec3,
        spacing: f64,
    },
    /// 二维液滴振荡
    Droplet {
        nx: usize,
        ny: usize,
        spacing: f64,
        /// 等效圆半径 [m]
        equivalent_radius: f64,
        /// Rayleigh n=2 周期 [s]
        rayleigh_period: f64,
    },
}

impl LatticeHeader {
    /// 维数
    pub fn dimension(&self) -> Dimension {
        match self {
            Self::DamBreak2d { .. } | Self::Droplet { .. } => Dimension::Planar,
            Self::DamBreak3d { .. } => Dimension::Spatial,
        }
    }

    /// 粒子文件标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::DamBreak2d { .. } => "MPS 2D Dam Break - Initial Particle Configuration",
            Self::DamBreak3d { .. } => "MPS 3D Dam Break - Initial Particle Configuration",
            Self::Droplet { .. } => "MPS 2D Droplet Oscillation - Initial Particle Configuration",
        }
    }

    /// 计算控制文件标题
    pub fn control_title(&self) -> &'static str {
        match self {
            Self::DamBreak2d { .. } => "MPS 2D Calculation Control File",
            Self::DamBreak3d { .. } => "MPS 3D Calculation Control File",
            Self::Droplet { .. } => "MPS 2D Droplet Oscillation Control File",
        }
    }

    /// 注释头（不含 `# ` 前缀）
    pub fn comment_lines(&self, summary: &ParticleSummary) -> Vec<String> {
        let mut lines = vec![self.title().to_string()];
        match self {
            Self::DamBreak2d {
                domain,
                water,
                spacing,
            } => {
                lines.push(format!(
                    "Domain: {} x {} m",
                    real_repr(domain.x),
                    real_repr(domain.y)
                ));
                lines.push(format!(
                    "Water column: {} x {} m",
                    real_repr(water.x),
                    real_repr(water.y)
                ));
                lines.push(format!("Particle distance: {} m", real_repr(*spacing)));
                lines.push(format!(
                    "Fluid: {}, Wall: {}, Dummy: {}, Total: {}",
                    summary.fluid, summary.wall, summary.dummy, summary.total
                ));
            }
            Self::DamBreak3d {
                domain,
                water,
                spacing,
            } => {
                lines.push(format!(
                    "Domain: {} x {} x {} m",
                    real_repr(domain.x),
                    real_repr(domain.y),
                    real_repr(domain.z)
                ));
                lines.push(format!(
                    "Water column: {} x {} x {} m",
                    real_repr(water.x),
                    real_repr(water.y),
                    real_repr(water.z)
                ));
                lines.push(format!("Particle distance: {} m", real_repr(*spacing)));
                lines.push(format!(
                    "Fluid: {}, Wall: {}, Total: {}",
                    summary.fluid, summary.wall, summary.total
                ));
            }
            Self::Droplet {
                nx,
                ny,
                spacing,
                equivalent_radius,
                rayleigh_period,
            } => {
                lines.push(format!(
                    "Square block: nx={nx}, ny={ny}, l0={} m",
                    real_repr(*spacing)
                ));
                lines.push(format!("Equivalent circle radius: {equivalent_radius:.6} m"));
                lines.push(format!(
                    "Rayleigh n=2 period: {:.2} ms",
                    rayleigh_period * 1.0e3
                ));
            }
        }
        lines
    }
}

/// 可写入粒子文件的矢量
pub trait LatticeVector: Copy + Default {
    /// 维数
    const DIMENSION: Dimension;

    /// 写出各分量，每个分量后跟一个空格
    fn write_components<W: Write>(self, out: &mut W) -> io::Result<()>;

    /// 由字段构造
    fn from_fields(fields: &[f64]) -> Self;
}

impl LatticeVector for DVec2 {
    const DIMENSION: Dimension = Dimension::Planar;

    fn write_components<W: Write>(self, out: &mut W) -> io::Result<()> {
        write!(
            out,
            "{} {} ",
            scientific(self.x, MANTISSA_DIGITS),
            scientific(self.y, MANTISSA_DIGITS)
        )
    }

    fn from_fields(fields: &[f64]) -> Self {
        DVec2::new(fields[0], fields[1])
    }
}

impl LatticeVector for DVec3 {
    const DIMENSION: Dimension = Dimension::Spatial;

    fn write_components<W: Write>(self, out: &mut W) -> io::Result<()> {
        write!(
            out,
            "{} {} {} ",
            scientific(self.x, MANTISSA_DIGITS),
            scientific(self.y, MANTISSA_DIGITS),
            scientific(self.z, MANTISSA_DIGITS)
        )
    }

    fn from_fields(fields: &[f64]) -> Self {
        DVec3::new(fields[0], fields[1], fields[2])
    }
}

/// 将粒子文件写入任意输出流
pub fn write_lattice_to<W, V>(
    out: &mut W,
    header: &LatticeHeader,
    particles: &[Particle<V>],
) -> io::Result<ParticleSummary>
where
    W: Write,
    V: LatticeVector,
{
    let summary = ParticleSummary::from_particles(particles);
    for line in header.comment_lines(&summary) {
        writeln!(out, "# {line}")?;
    }
    writeln!(out, "{}", summary.total)?;
    writeln!(out, "{}", V::DIMENSION.lattice_columns())?;
    for p in particles {
        p.position.write_components(out)?;
        p.velocity.write_components(out)?;
        writeln!(out, "{}", p.kind.code())?;
    }
    Ok(summary)
}

/// 写出粒子文件
pub fn write_lattice<V: LatticeVector>(
    path: &Path,
    header: &LatticeHeader,
    particles: &[Particle<V>],
) -> IoResult<ParticleSummary> {
    if header.dimension() != V::DIMENSION {
        return Err(MpsError::invalid_input(format!(
            "文件头维数 {} 与粒子维数 {} 不一致",
            header.dimension(),
            V::DIMENSION
        ))
        .into());
    }
    let file = File::create(path).map_err(at(path))?;
    let mut out = BufWriter::new(file);
    let summary = write_lattice_to(&mut out, header, particles).map_err(at(path))?;
    out.flush().map_err(at(path))?;
    debug!("写出粒子文件 {}: {}", path.display(), summary);
    Ok(summary)
}

/// 已读取的粒子
#[derive(Debug, Clone, PartialEq)]
pub enum LatticeParticles {
    /// 二维粒子
    Planar(Vec<Particle2>),
    /// 三维粒子
    Spatial(Vec<Particle3>),
}

/// 已读取的粒子文件
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeFile {
    /// 注释行（去掉 `#` 与首尾空白）
    pub comments: Vec<String>,
    /// 声明的粒子数
    pub declared: usize,
    /// 粒子
    pub particles: LatticeParticles,
}

impl LatticeFile {
    /// 维数
    pub fn dimension(&self) -> Dimension {
        match &self.particles {
            LatticeParticles::Planar(_) => Dimension::Planar,
            LatticeParticles::Spatial(_) => Dimension::Spatial,
        }
    }

    /// 各类粒子计数
    pub fn summary(&self) -> ParticleSummary {
        match &self.particles {
            LatticeParticles::Planar(p) => ParticleSummary::from_particles(p),
            LatticeParticles::Spatial(p) => ParticleSummary::from_particles(p),
        }
    }

    /// 由 x 坐标推断的格点间距
    ///
    /// 取相邻不同 x 坐标之差的最小值；所有粒子 x 相同时返回 `None`。
    pub fn lattice_spacing(&self) -> Option<f64> {
        let mut xs: Vec<f64> = match &self.particles {
            LatticeParticles::Planar(p) => p.iter().map(|p| p.position.x).collect(),
            LatticeParticles::Spatial(p) => p.iter().map(|p| p.position.x).collect(),
        };
        xs.sort_by(f64::total_cmp);
        xs.windows(2)
            .map(|w| w[1] - w[0])
            .filter(|gap| *gap > SAME_COORDINATE)
            .min_by(f64::total_cmp)
    }
}

/// 视为同一坐标的差值上限
const SAME_COORDINATE: f64 = 1.0e-12;

/// 读取粒子文件
///
/// 维数由第一条数据行的字段数确定（5 为二维，7 为三维），
/// 后续数据行字段数必须一致。类型编码只接受 0、1、3。
pub fn read_lattice(path: &Path) -> IoResult<LatticeFile> {
    let content = fs::read_to_string(path).map_err(at(path))?;
    parse_lattice(&content, path)
}

/// 解析粒子文件文本
pub fn parse_lattice(content: &str, path: &Path) -> IoResult<LatticeFile> {
    let mut comments = Vec::new();
    let mut declared = None;
    let mut dimension = None;
    let mut planar = Vec::new();
    let mut spatial = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            comments.push(comment.trim().to_string());
            continue;
        }

        let Some(_) = declared else {
            let count = line.parse::<usize>().map_err(|_| {
                IoError::parse(path, line_no, format!("粒子数行无效: '{line}'"))
            })?;
            declared = Some(count);
            continue;
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        let dim = match dimension {
            Some(d) => d,
            None => {
                let d = Dimension::from_lattice_fields(fields.len()).ok_or_else(|| {
                    IoError::parse(path, line_no, format!("无法识别的字段数 {}", fields.len()))
                })?;
                dimension = Some(d);
                d
            }
        };
        if fields.len() != dim.lattice_fields() {
            return Err(IoError::parse(
                path,
                line_no,
                format!("期望 {} 个字段, 实际 {}", dim.lattice_fields(), fields.len()),
            ));
        }

        let (reals, code) = fields.split_at(fields.len() - 1);
        let values = reals
            .iter()
            .map(|s| {
                s.parse::<f64>()
                    .map_err(|_| IoError::parse(path, line_no, format!("无效实数 '{s}'")))
            })
            .collect::<IoResult<Vec<f64>>>()?;
        let code = code[0]
            .parse::<i64>()
            .map_err(|_| IoError::parse(path, line_no, format!("无效类型编码 '{}'", code[0])))?;
        let kind = ParticleKind::from_code(code)
            .map_err(|e| IoError::parse(path, line_no, e.to_string()))?;

        let n = dim.components();
        match dim {
            Dimension::Planar => planar.push(Particle {
                position: DVec2::from_fields(&values[..n]),
                velocity: DVec2::from_fields(&values[n..]),
                kind,
            }),
            Dimension::Spatial => spatial.push(Particle {
                position: DVec3::from_fields(&values[..n]),
                velocity: DVec3::from_fields(&values[n..]),
                kind,
            }),
        }
    }

    let declared = declared.ok_or_else(|| IoError::parse(path, 0, "缺少粒子数行"))?;
    let particles = match dimension {
        Some(Dimension::Spatial) => LatticeParticles::Spatial(spatial),
        _ => LatticeParticles::Planar(planar),
    };
    let actual = match &particles {
        LatticeParticles::Planar(p) => p.len(),
        LatticeParticles::Spatial(p) => p.len(),
    };
    if actual != declared {
        return Err(IoError::CountMismatch {
            file: path.display().to_string(),
            declared,
            actual,
        });
    }

    Ok(LatticeFile {
        comments,
        declared,
        particles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_2d() -> LatticeHeader {
        LatticeHeader::DamBreak2d {
            domain: DVec2::new(0.584, 0.292),
            water: DVec2::new(0.146, 0.292),
            spacing: 0.008,
        }
    }

    fn render<V: LatticeVector>(header: &LatticeHeader, particles: &[Particle<V>]) -> String {
        let mut buf = Vec::new();
        write_lattice_to(&mut buf, header, particles).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_planar_layout() {
        let particles = vec![
            Particle::at_rest(DVec2::new(0.008, 0.008), ParticleKind::Fluid),
            Particle::at_rest(DVec2::new(-0.056, 0.0), ParticleKind::Dummy),
        ];
        let text = render(&header_2d(), &particles);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# MPS 2D Dam Break - Initial Particle Configuration");
        assert_eq!(lines[1], "# Domain: 0.584 x 0.292 m");
        assert_eq!(lines[2], "# Water column: 0.146 x 0.292 m");
        assert_eq!(lines[3], "# Particle distance: 0.008 m");
        assert_eq!(lines[4], "# Fluid: 1, Wall: 0, Dummy: 1, Total: 2");
        assert_eq!(lines[5], "2");
        assert_eq!(lines[6], "# x y vx vy type");
        assert_eq!(
            lines[7],
            "8.00000000e-03 8.00000000e-03 0.00000000e+00 0.00000000e+00 0"
        );
        assert_eq!(
            lines[8],
            "-5.60000000e-02 0.00000000e+00 0.00000000e+00 0.00000000e+00 3"
        );
    }

    #[test]
    fn test_spatial_layout() {
        let header = LatticeHeader::DamBreak3d {
            domain: DVec3::new(0.4, 0.3, 0.2),
            water: DVec3::new(0.1, 0.2, 0.2),
            spacing: 0.025,
        };
        let particles = vec![Particle::at_rest(DVec3::new(0.0, -0.025, 0.05), ParticleKind::Wall)];
        let text = render(&header, &particles);
        assert!(text.contains("# Domain: 0.4 x 0.3 x 0.2 m\n"));
        assert!(text.contains("# Fluid: 0, Wall: 1, Total: 1\n"));
        assert!(text.contains("# x y z vx vy vz type\n"));
        assert!(text.ends_with(
            "0.00000000e+00 -2.50000000e-02 5.00000000e-02 0.00000000e+00 0.00000000e+00 0.00000000e+00 1\n"
        ));
    }

    #[test]
    fn test_droplet_header() {
        let header = LatticeHeader::Droplet {
            nx: 40,
            ny: 40,
            spacing: 0.002,
            equivalent_radius: 0.045135166,
            rayleigh_period: 0.2876,
        };
        let lines = header.comment_lines(&ParticleSummary::default());
        assert_eq!(lines[1], "Square block: nx=40, ny=40, l0=0.002 m");
        assert_eq!(lines[2], "Equivalent circle radius: 0.045135 m");
        assert_eq!(lines[3], "Rayleigh n=2 period: 287.60 ms");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_parse_written_file() {
        let particles = vec![
            Particle::at_rest(DVec2::new(0.0, 0.0), ParticleKind::Wall),
            Particle::at_rest(DVec2::new(0.008, 0.008), ParticleKind::Fluid),
            Particle::at_rest(DVec2::new(0.024, 0.008), ParticleKind::Fluid),
        ];
        let text = render(&header_2d(), &particles);
        let file = parse_lattice(&text, Path::new("particles.txt")).unwrap();
        assert_eq!(file.dimension(), Dimension::Planar);
        assert_eq!(file.declared, 3);
        assert_eq!(file.summary().fluid, 2);
        assert_eq!(file.comments.len(), 6);
        let spacing = file.lattice_spacing().unwrap();
        assert!((spacing - 0.008).abs() < 1e-12);
    }

    #[test]
    fn test_count_mismatch() {
        let text = "# header\n3\n# x y vx vy type\n0.0 0.0 0.0 0.0 0\n";
        let err = parse_lattice(text, Path::new("p.txt")).unwrap_err();
        assert!(matches!(
            err,
            IoError::CountMismatch {
                declared: 3,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_reserved_type_code() {
        let text = "1\n0.0 0.0 0.0 0.0 2\n";
        let err = parse_lattice(text, Path::new("p.txt")).unwrap_err();
        assert!(matches!(err, IoError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_rejects_mixed_dimensions() {
        let text = "2\n0.0 0.0 0.0 0.0 0\n0.0 0.0 0.0 0.0 0.0 0.0 1\n";
        assert!(parse_lattice(text, Path::new("p.txt")).is_err());
    }

    #[test]
    fn test_missing_count_line() {
        let text = "# only comments\n";
        assert!(matches!(
            parse_lattice(text, Path::new("p.txt")),
            Err(IoError::ParseError { .. })
        ));
    }
}

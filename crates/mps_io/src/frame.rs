// crates/mps_io/src/frame.rs

//! 求解器输出帧读取
//!
//! 求解器每隔若干步写出 `output_NNNNNN.csv`（六位补零步号）。
//! 首行为列名，二维列为 `x,y,vx,vy,pressure,type`，
//! 三维列为 `x,y,z,vx,vy,vz,pressure,type`。

use std::fs;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use glam::DVec3;
use mps_core::{ParticleKind, ParticleSummary};
use tracing::debug;

use crate::dimension::Dimension;
use crate::error::{at, IoError, IoResult};

const FRAME_PREFIX: &str = "output_";
const FRAME_EXTENSION: &str = ".csv";

/// 指定步号的帧文件路径
pub fn frame_path(dir: &Path, step: u64) -> PathBuf {
    dir.join(format!("{FRAME_PREFIX}{step:06}{FRAME_EXTENSION}"))
}

/// 由文件名解析步号
fn frame_step(file_name: &str) -> Option<u64> {
    let digits = file_name
        .strip_prefix(FRAME_PREFIX)?
        .strip_suffix(FRAME_EXTENSION)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// 列出目录中的帧文件，按步号升序
///
/// 不符合 `output_<数字>.csv` 命名的文件被忽略。
pub fn list_frames(dir: &Path) -> IoResult<Vec<(u64, PathBuf)>> {
    let mut frames = Vec::new();
    for entry in fs::read_dir(dir).map_err(at(dir))? {
        let entry = entry.map_err(at(dir))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let step = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(frame_step);
        if let Some(step) = step {
            frames.push((step, path));
        }
    }
    frames.sort_by_key(|(step, _)| *step);
    debug!("{} 中找到 {} 帧", dir.display(), frames.len());
    Ok(frames)
}

/// 帧中的一个粒子（二维时 z 分量为零）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRecord {
    /// 位置 [m]
    pub position: DVec3,
    /// 速度 [m/s]
    pub velocity: DVec3,
    /// 压力 [Pa]
    pub pressure: f64,
    /// 区域类型
    pub kind: ParticleKind,
}

/// 一帧输出
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// 维数
    pub dimension: Dimension,
    /// 粒子记录
    pub records: Vec<FrameRecord>,
}

impl Frame {
    /// 各类粒子计数
    pub fn summary(&self) -> ParticleSummary {
        ParticleSummary::from_kinds(self.records.iter().map(|r| r.kind))
    }

    /// 流体粒子压力范围；无流体粒子时为 `None`
    pub fn fluid_pressure_range(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .filter(|r| r.kind == ParticleKind::Fluid)
            .map(|r| r.pressure)
            .fold(None, |range, p| match range {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
    }
}

/// 列索引
struct Columns {
    dimension: Dimension,
    /// 二维时 z 分量无对应列
    position: [Option<usize>; 3],
    velocity: [Option<usize>; 3],
    pressure: usize,
    kind: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord, path: &Path) -> IoResult<Self> {
        let find = |name: &str| -> IoResult<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| IoError::MissingColumn {
                    file: path.display().to_string(),
                    column: name.to_string(),
                })
        };
        let has = |name: &str| headers.iter().any(|h| h == name);
        let dimension = if has("z") || has("vz") {
            Dimension::Spatial
        } else {
            Dimension::Planar
        };

        let (position, velocity) = match dimension {
            Dimension::Planar => {
                let (x, y, vx, vy) = (find("x")?, find("y")?, find("vx")?, find("vy")?);
                ([Some(x), Some(y), None], [Some(vx), Some(vy), None])
            }
            Dimension::Spatial => (
                [Some(find("x")?), Some(find("y")?), Some(find("z")?)],
                [Some(find("vx")?), Some(find("vy")?), Some(find("vz")?)],
            ),
        };
        Ok(Self {
            dimension,
            position,
            velocity,
            pressure: find("pressure")?,
            kind: find("type")?,
        })
    }

    fn parse(&self, record: &StringRecord, path: &Path, line: usize) -> IoResult<FrameRecord> {
        let real = |index: usize| -> IoResult<f64> {
            let field = record
                .get(index)
                .ok_or_else(|| IoError::parse(path, line, format!("缺少第 {} 列", index + 1)))?;
            field
                .parse::<f64>()
                .map_err(|_| IoError::parse(path, line, format!("无效实数 '{field}'")))
        };
        let component = |index: Option<usize>| index.map_or(Ok(0.0), real);
        let vector = |idx: [Option<usize>; 3]| -> IoResult<DVec3> {
            Ok(DVec3::new(component(idx[0])?, component(idx[1])?, component(idx[2])?))
        };

        let code_field = record
            .get(self.kind)
            .ok_or_else(|| IoError::parse(path, line, "缺少 type 列"))?;
        // 类型列可能以实数写出
        let code = code_field
            .parse::<i64>()
            .or_else(|_| match code_field.parse::<f64>() {
                Ok(v) if v.fract() == 0.0 => Ok(v as i64),
                _ => Err(()),
            })
            .map_err(|_| IoError::parse(path, line, format!("无效类型编码 '{code_field}'")))?;
        let kind = ParticleKind::from_code(code)
            .map_err(|e| IoError::parse(path, line, e.to_string()))?;

        Ok(FrameRecord {
            position: vector(self.position)?,
            velocity: vector(self.velocity)?,
            pressure: real(self.pressure)?,
            kind,
        })
    }
}

/// 读取一帧
pub fn read_frame(path: &Path) -> IoResult<Frame> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| IoError::csv(path, e))?;

    let headers = reader.headers().map_err(|e| IoError::csv(path, e))?.clone();
    let columns = Columns::resolve(&headers, path)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| IoError::csv(path, e))?;
        // 行号从 1 开始，首行为列名
        records.push(columns.parse(&record, path, row + 2)?);
    }

    debug!(
        "读取帧 {}: {} 个粒子 ({})",
        path.display(),
        records.len(),
        columns.dimension
    );
    Ok(Frame {
        dimension: columns.dimension,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_frame_path() {
        let path = frame_path(Path::new("output/dambreak"), 1200);
        assert_eq!(path, Path::new("output/dambreak/output_001200.csv"));
    }

    #[test]
    fn test_frame_step_parsing() {
        assert_eq!(frame_step("output_000100.csv"), Some(100));
        assert_eq!(frame_step("output_1234567.csv"), Some(1234567));
        assert_eq!(frame_step("output_.csv"), None);
        assert_eq!(frame_step("output_00a1.csv"), None);
        assert_eq!(frame_step("output_000100.vtk"), None);
        assert_eq!(frame_step("summary.csv"), None);
    }

    #[test]
    fn test_list_frames_sorted() {
        let dir = tempdir().unwrap();
        for step in [300u64, 0, 100] {
            fs::write(frame_path(dir.path(), step), "x,y,vx,vy,pressure,type\n").unwrap();
        }
        fs::write(dir.path().join("notes.csv"), "").unwrap();
        fs::write(dir.path().join("output_000200.vtk"), "").unwrap();

        let frames = list_frames(dir.path()).unwrap();
        let steps: Vec<u64> = frames.iter().map(|(s, _)| *s).collect();
        assert_eq!(steps, vec![0, 100, 300]);
    }

    #[test]
    fn test_read_planar_frame() {
        let dir = tempdir().unwrap();
        let path = frame_path(dir.path(), 100);
        fs::write(
            &path,
            "x,y,vx,vy,pressure,type\n\
             0.008,0.008,0.1,-0.2,1500.5,0\n\
             0.016,0.008,0.0,0.0,-20.0,0\n\
             0.0,0.0,0.0,0.0,0.0,1\n\
             -0.008,-0.008,0.0,0.0,0.0,3\n",
        )
        .unwrap();

        let frame = read_frame(&path).unwrap();
        assert_eq!(frame.dimension, Dimension::Planar);
        assert_eq!(frame.records.len(), 4);
        assert_eq!(frame.records[0].velocity, DVec3::new(0.1, -0.2, 0.0));

        let summary = frame.summary();
        assert_eq!((summary.fluid, summary.wall, summary.dummy), (2, 1, 1));
        assert_eq!(frame.fluid_pressure_range(), Some((-20.0, 1500.5)));
    }

    #[test]
    fn test_read_spatial_frame() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output_000000.csv");
        fs::write(
            &path,
            "x,y,z,vx,vy,vz,pressure,type\n0.1,0.2,0.3,0.0,0.0,-1.0,10.0,0\n0.0,0.0,0.0,0.0,0.0,0.0,0.0,1\n",
        )
        .unwrap();

        let frame = read_frame(&path).unwrap();
        assert_eq!(frame.dimension, Dimension::Spatial);
        assert_eq!(frame.records[0].position, DVec3::new(0.1, 0.2, 0.3));
        assert_eq!(frame.records[0].velocity.z, -1.0);
    }

    #[test]
    fn test_missing_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output_000000.csv");
        fs::write(&path, "x,y,vx,vy,type\n0,0,0,0,0\n").unwrap();
        let err = read_frame(&path).unwrap_err();
        assert!(matches!(err, IoError::MissingColumn { ref column, .. } if column == "pressure"));
    }

    #[test]
    fn test_rejects_unknown_type() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output_000000.csv");
        fs::write(&path, "x,y,vx,vy,pressure,type\n0,0,0,0,0,2\n").unwrap();
        assert!(matches!(
            read_frame(&path),
            Err(IoError::ParseError { line: 2, .. })
        ));
    }

    #[test]
    fn test_no_fluid_pressure_range() {
        let frame = Frame {
            dimension: Dimension::Planar,
            records: vec![],
        };
        assert_eq!(frame.fluid_pressure_range(), None);
    }
}

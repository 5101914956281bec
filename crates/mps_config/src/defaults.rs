// crates/mps_config/src/defaults.rs

//! 默认值
//!
//! 算例文件与命令行共用的默认参数，以及参数文件中的固定数值常量。

/// 二维溃坝（特征长度 L = 0.146 m，计算域 4L × 2L，水柱 L × 2L）
pub mod dambreak2d {
    pub const DOMAIN_X: f64 = 0.584;
    pub const DOMAIN_Y: f64 = 0.292;
    pub const WATER_X: f64 = 0.146;
    pub const WATER_Y: f64 = 0.292;
    pub const L0: f64 = 0.008;
    pub const WALL_LAYERS: i64 = 4;
    pub const DUMMY_LAYERS: i64 = 4;
    pub const OUTDIR: &str = "examples/dambreak";
    pub const OUTPUT_DIR: &str = "output/dambreak";
}

/// 三维溃坝
pub mod dambreak3d {
    pub const DOMAIN_X: f64 = 0.4;
    pub const DOMAIN_Y: f64 = 0.3;
    pub const DOMAIN_Z: f64 = 0.2;
    pub const WATER_X: f64 = 0.10;
    pub const WATER_Y: f64 = 0.20;
    pub const WATER_Z: f64 = 0.20;
    pub const L0: f64 = 0.025;
    pub const WALL_LAYERS: i64 = 3;
    pub const VISCOSITY: f64 = 1.0e-6;
    pub const OUTDIR: &str = ".";
    pub const OUTPUT_DIR: &str = "output";
}

/// 液滴振荡
pub mod droplet {
    pub const L0: f64 = 0.002;
    pub const NX: usize = 40;
    pub const NY: usize = 40;
    pub const VISCOSITY: f64 = 1.0e-6;
    pub const SIGMA: f64 = 0.0728;
    pub const DT: f64 = 1.0e-4;
    pub const T_END: f64 = 5.0;
    pub const OUTDIR: &str = "examples/droplet";
    pub const OUTPUT_DIR: &str = "output/droplet";
}

/// 物性与时间
pub const DENSITY: f64 = 1000.0;
pub const GRAVITY_Y: f64 = -9.81;
pub const DT: f64 = 5.0e-4;
pub const T_END: f64 = 2.0;
pub const OUTPUT_INTERVAL: i64 = 100;

/// 压力求解
pub const C_PPE: f64 = 1.01;
pub const GAMMA_PPE: f64 = 0.01;

/// 自由表面与碰撞
pub const SURFACE_COUNT_THRESHOLD: f64 = 0.85;
pub const RESTITUTION_COEFF: f64 = 0.2;
pub const COLLISION_DISTANCE_RATIO: f64 = 0.5;

/// 表面张力
pub const SURFACE_TENSION_COEFF: f64 = 0.073;
pub const SURFACE_TENSION_RE_RATIO: f64 = 3.2;

/// 参数文件中的固定常量
pub mod fixed {
    /// 拉普拉斯模型影响半径倍率
    pub const INFLUENCE_RATIO_LAP: f64 = 4.0;
    /// 粒子数密度影响半径倍率（三维仅此一个）
    pub const INFLUENCE_RATIO_N: f64 = 2.1;
    pub const MAX_NEIGHBORS: i64 = 512;
    pub const CG_MAX_ITER: i64 = 10000;
    pub const CG_TOLERANCE: f64 = 1.0e-8;
    /// 参数文件中 CG 收敛判定值的写法
    pub const CG_TOLERANCE_TEXT: &str = "1.0e-8";
    pub const RELAXATION_COEFF: f64 = 0.2;
    /// n/n0 低于此值判为自由表面
    pub const SURFACE_THRESHOLD: f64 = 0.97;
    pub const WALL_RESTITUTION: f64 = 0.2;
    pub const GRAVITY_X: f64 = 0.0;
    pub const GRAVITY_Z: f64 = 0.0;
}

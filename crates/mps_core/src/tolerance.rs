// crates/mps_core/src/tolerance.rs

//! 边界判定容差
//!
//! 格点坐标由 `index * spacing` 计算，恰好落在流体块或计算域边界上的格点
//! 可能因舍入误差略微越界。这里集中定义绝对容差以及基于它的比较函数，
//! 供二维、三维分类器共享。判定规则本身不在此处。

/// 边界判定的绝对容差 [m]
///
/// 必须远小于任何实际使用的粒子间距，否则会错误地包含下一排格点。
pub const BOUNDARY_EPS: f64 = 1.0e-10;

/// `value <= bound`（容差向外放宽）
#[inline]
pub fn at_most(value: f64, bound: f64) -> bool {
    value <= bound + BOUNDARY_EPS
}

/// `value < bound`（容差向内收紧）
#[inline]
pub fn strictly_below(value: f64, bound: f64) -> bool {
    value < bound - BOUNDARY_EPS
}

/// `value >= bound`（容差向内放宽）
#[inline]
pub fn at_least(value: f64, bound: f64) -> bool {
    value >= bound - BOUNDARY_EPS
}

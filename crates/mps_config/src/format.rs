// crates/mps_config/src/format.rs

//! 数值文本格式
//!
//! 求解器读取的文本文件沿用 C 风格指数记法：指数带符号且至少两位。

/// 最短往返表示
///
/// |x| < 1e-4 或 |x| >= 1e16 时使用指数记法，其余为小数，
/// 整数值保留 `.0`。
pub fn real_repr(value: f64) -> String {
    normalize_exponent(&format!("{value:?}"))
}

/// 固定有效位数的指数记法，等价于 C 的 `%.{precision}e`
pub fn scientific(value: f64, precision: usize) -> String {
    normalize_exponent(&format!("{value:.precision$e}"))
}

/// 定点小数
pub fn fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

fn normalize_exponent(text: &str) -> String {
    match text.split_once('e') {
        None => text.to_string(),
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_repr() {
        assert_eq!(real_repr(1000.0), "1000.0");
        assert_eq!(real_repr(0.008), "0.008");
        assert_eq!(real_repr(0.0005), "0.0005");
        assert_eq!(real_repr(1.0e-6), "1e-06");
        assert_eq!(real_repr(1.0e-8), "1e-08");
        assert_eq!(real_repr(-9.81), "-9.81");
        assert_eq!(real_repr(0.0), "0.0");
        assert_eq!(real_repr(0.146 * 4.0), "0.584");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(scientific(0.008, 8), "8.00000000e-03");
        assert_eq!(scientific(0.0, 8), "0.00000000e+00");
        assert_eq!(scientific(-0.039, 8), "-3.90000000e-02");
        assert_eq!(scientific(123.5, 2), "1.24e+02");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(fixed(196.2, 1), "196.2");
        assert_eq!(fixed(-0.5, 6), "-0.500000");
    }
}

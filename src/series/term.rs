//! Single term of the scaled Leibniz series

/// Term `n` (zero-based) of `4 * (1 - 1/3 + 1/5 - ...)`
///
/// Even `n` is positive, odd `n` negative; the magnitude `4 / (2n + 1)`
/// strictly decreases.
pub fn leibniz_term(n: u64) -> f64 {
    let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
    4.0 * (sign / (2.0 * n as f64 + 1.0))
}

//! Vector primitives on the build's native lane type.
//!
//! These are thin wrappers that monomorphize the generic kernels in
//! [`crate::stats::core`] and the elementwise module on
//! [`NativeLane`]. Empty inputs return `0.0` (reductions) or leave the output
//! untouched (elementwise).
//!
//! # Examples
//!
//! ```
//! use quantstream::stats::{vector_add, vector_sum, vector_variance};
//!
//! let a = [1.0, 2.0, 3.0, 4.0];
//! let b = [4.0, 3.0, 2.0, 1.0];
//! let mut out = [0.0; 4];
//! vector_add(&a, &b, &mut out);
//!
//! assert_eq!(out, [5.0; 4]);
//! assert_eq!(vector_sum(&a), 10.0);
//! assert_eq!(vector_variance(&a), 1.25);
//! ```

use crate::simd::NativeLane;
use crate::stats::core::{self, Sign};
use crate::stats::elementwise;

// ============================================================================
// Elementwise
// ============================================================================

#[inline]
pub fn vector_add(a: &[f64], b: &[f64], out: &mut [f64]) {
    elementwise::add::<NativeLane>(a, b, out);
}

#[inline]
pub fn vector_sub(a: &[f64], b: &[f64], out: &mut [f64]) {
    elementwise::sub::<NativeLane>(a, b, out);
}

#[inline]
pub fn vector_mul(a: &[f64], b: &[f64], out: &mut [f64]) {
    elementwise::mul::<NativeLane>(a, b, out);
}

#[inline]
pub fn vector_div(a: &[f64], b: &[f64], out: &mut [f64]) {
    elementwise::div::<NativeLane>(a, b, out);
}

#[inline]
pub fn vector_add_scalar(a: &[f64], scalar: f64, out: &mut [f64]) {
    elementwise::add_scalar::<NativeLane>(a, scalar, out);
}

#[inline]
pub fn vector_mul_scalar(a: &[f64], scalar: f64, out: &mut [f64]) {
    elementwise::mul_scalar::<NativeLane>(a, scalar, out);
}

// ============================================================================
// Reductions
// ============================================================================

#[inline]
pub fn vector_sum(data: &[f64]) -> f64 {
    core::sum::<NativeLane>(data)
}

#[inline]
pub fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    core::dot::<NativeLane>(a, b)
}

#[inline]
pub fn vector_mean(data: &[f64]) -> f64 {
    core::mean::<NativeLane>(data)
}

/// Population variance
#[inline]
pub fn vector_variance(data: &[f64]) -> f64 {
    core::variance::<NativeLane>(data)
}

#[inline]
pub fn vector_stddev(data: &[f64]) -> f64 {
    core::stddev::<NativeLane>(data)
}

#[inline]
pub fn vector_min(data: &[f64]) -> f64 {
    core::min::<NativeLane>(data)
}

#[inline]
pub fn vector_max(data: &[f64]) -> f64 {
    core::max::<NativeLane>(data)
}

#[inline]
pub fn vector_conditional_sum(data: &[f64], sign: Sign) -> f64 {
    core::conditional_sum::<NativeLane>(data, sign)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NumericBuffer;

    #[test]
    fn test_null_view_is_silent() {
        let view = unsafe { NumericBuffer::from_raw_parts(std::ptr::null(), 16) };
        assert_eq!(vector_sum(&view), 0.0);
        assert_eq!(vector_mean(&view), 0.0);
        assert_eq!(vector_stddev(&view), 0.0);
        assert_eq!(vector_max(&view), 0.0);
        assert_eq!(dot_product(&view, &view), 0.0);

        let mut out = [1.0, 2.0];
        vector_sub(&view, &view, &mut out);
        assert_eq!(out, [1.0, 2.0]);
    }

    #[test]
    fn test_mixed_lengths() {
        let a = [1.0, 2.0, 3.0];
        let b = [10.0, 20.0, 30.0, 40.0, 50.0];
        let mut out = [0.0; 5];
        vector_add(&a, &b, &mut out);
        assert_eq!(out, [11.0, 22.0, 33.0, 0.0, 0.0]);
    }

    #[test]
    fn test_conditional_sums() {
        let diffs = [1.0, -1.0, 2.0, -3.0, 0.5];
        assert_eq!(vector_conditional_sum(&diffs, Sign::Positive), 3.5);
        assert_eq!(vector_conditional_sum(&diffs, Sign::Negative), 4.0);
    }
}

//! Elementwise kernels writing into a caller-provided output buffer.
//!
//! All functions process the common prefix of their buffers; an empty input
//! or output is a no-op.

use crate::numeric::Numeric;
use crate::stats::chunked::{map, zip_map, Map, ZipMap};

struct Add;
struct Sub;
struct Mul;
struct Div;
struct AddScalar(f64);
struct MulScalar(f64);

impl ZipMap for Add {
    #[inline(always)]
    fn apply<T: Numeric>(&self, a: T, b: T) -> T {
        a + b
    }
}

impl ZipMap for Sub {
    #[inline(always)]
    fn apply<T: Numeric>(&self, a: T, b: T) -> T {
        a - b
    }
}

impl ZipMap for Mul {
    #[inline(always)]
    fn apply<T: Numeric>(&self, a: T, b: T) -> T {
        a * b
    }
}

impl ZipMap for Div {
    #[inline(always)]
    fn apply<T: Numeric>(&self, a: T, b: T) -> T {
        a / b
    }
}

impl Map for AddScalar {
    #[inline(always)]
    fn apply<T: Numeric>(&self, x: T) -> T {
        x + T::splat(self.0)
    }
}

impl Map for MulScalar {
    #[inline(always)]
    fn apply<T: Numeric>(&self, x: T) -> T {
        x * T::splat(self.0)
    }
}

/// `out[i] = a[i] + b[i]`
#[inline]
pub fn add<T: Numeric>(a: &[f64], b: &[f64], out: &mut [f64]) {
    zip_map::<T, _>(a, b, out, &Add);
}

/// `out[i] = a[i] - b[i]`
#[inline]
pub fn sub<T: Numeric>(a: &[f64], b: &[f64], out: &mut [f64]) {
    zip_map::<T, _>(a, b, out, &Sub);
}

/// `out[i] = a[i] * b[i]`
#[inline]
pub fn mul<T: Numeric>(a: &[f64], b: &[f64], out: &mut [f64]) {
    zip_map::<T, _>(a, b, out, &Mul);
}

/// `out[i] = a[i] / b[i]` (IEEE semantics for zero divisors)
#[inline]
pub fn div<T: Numeric>(a: &[f64], b: &[f64], out: &mut [f64]) {
    zip_map::<T, _>(a, b, out, &Div);
}

/// `out[i] = a[i] + scalar`
#[inline]
pub fn add_scalar<T: Numeric>(a: &[f64], scalar: f64, out: &mut [f64]) {
    map::<T, _>(a, out, &AddScalar(scalar));
}

/// `out[i] = a[i] * scalar`
#[inline]
pub fn mul_scalar<T: Numeric>(a: &[f64], scalar: f64, out: &mut [f64]) {
    map::<T, _>(a, out, &MulScalar(scalar));
}

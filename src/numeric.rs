//! Lane types for scalar and SIMD kernels
//!
//! This module provides a unified interface over one "lane group" of f64 values:
//! a plain `f64` (1 lane), `F64x2` (SSE2 or NEON, 2 lanes) and `F64x4`
//! (AVX, 4 lanes). Every primitive in [`crate::stats`] is written once against
//! [`Numeric`] and monomorphized on the lane type, so the lane width is a
//! compile-time constant inside every hot loop.

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Implements the arithmetic operator traits for a SIMD newtype by forwarding
/// to the given intrinsics.
macro_rules! impl_lane_ops {
    ($ty:ident, add = $add:path, sub = $sub:path, mul = $mul:path, div = $div:path) => {
        impl ::std::ops::Add for $ty {
            type Output = Self;
            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                // SAFETY: the intrinsic's target feature is enabled for this build.
                $ty(unsafe { $add(self.0, rhs.0) })
            }
        }

        impl ::std::ops::Sub for $ty {
            type Output = Self;
            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                // SAFETY: see `add`.
                $ty(unsafe { $sub(self.0, rhs.0) })
            }
        }

        impl ::std::ops::Mul for $ty {
            type Output = Self;
            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                // SAFETY: see `add`.
                $ty(unsafe { $mul(self.0, rhs.0) })
            }
        }

        impl ::std::ops::Div for $ty {
            type Output = Self;
            #[inline(always)]
            fn div(self, rhs: Self) -> Self {
                // SAFETY: see `add`.
                $ty(unsafe { $div(self.0, rhs.0) })
            }
        }

        impl ::std::ops::AddAssign for $ty {
            #[inline(always)]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl ::std::ops::SubAssign for $ty {
            #[inline(always)]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl ::std::ops::MulAssign for $ty {
            #[inline(always)]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }
    };
}

#[cfg(target_arch = "x86_64")]
mod x86;
#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
pub use x86::F64x2;
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
pub use x86::F64x4;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon;
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub use neon::F64x2;

/// One group of f64 lanes processed by a single instruction
///
/// Kernels are generic over this trait; the chunked traversal instantiates
/// them with the native lane type for full chunks and with `f64` for the
/// remainder.
pub trait Numeric:
    Copy
    + Default
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + Neg<Output = Self>
    + Sized
    + 'static
{
    /// Number of f64 lanes (1 for scalar, 2 for `F64x2`, 4 for `F64x4`)
    const LANES: usize;

    /// Broadcast a scalar into every lane
    fn splat(value: f64) -> Self;

    /// All lanes zero
    #[inline(always)]
    fn zero() -> Self {
        Self::default()
    }

    /// Load `LANES` values from the front of `chunk`
    ///
    /// # Panics
    ///
    /// Panics if `chunk.len() < LANES`.
    fn load(chunk: &[f64]) -> Self;

    /// Store all lanes into the front of `out`
    ///
    /// # Panics
    ///
    /// Panics if `out.len() < LANES`.
    fn store(self, out: &mut [f64]);

    /// Square root
    fn sqrt(self) -> Self;

    /// Absolute value
    fn abs(self) -> Self;

    /// Lane-wise maximum
    fn max(self, other: Self) -> Self;

    /// Lane-wise minimum
    fn min(self, other: Self) -> Self;

    /// Horizontal sum across all lanes
    fn reduce_sum(self) -> f64;

    /// Horizontal maximum across all lanes
    fn reduce_max(self) -> f64;

    /// Horizontal minimum across all lanes
    fn reduce_min(self) -> f64;
}

// ============================================================================
// Scalar f64 implementation
// ============================================================================

impl Numeric for f64 {
    const LANES: usize = 1;

    #[inline(always)]
    fn splat(value: f64) -> Self {
        value
    }

    #[inline(always)]
    fn load(chunk: &[f64]) -> Self {
        chunk[0]
    }

    #[inline(always)]
    fn store(self, out: &mut [f64]) {
        out[0] = self;
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline(always)]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline(always)]
    fn max(self, other: Self) -> Self {
        f64::max(self, other)
    }

    #[inline(always)]
    fn min(self, other: Self) -> Self {
        f64::min(self, other)
    }

    #[inline(always)]
    fn reduce_sum(self) -> f64 {
        self
    }

    #[inline(always)]
    fn reduce_max(self) -> f64 {
        self
    }

    #[inline(always)]
    fn reduce_min(self) -> f64 {
        self
    }
}

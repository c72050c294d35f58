//! x86_64 lane types: `F64x2` over SSE2 and `F64x4` over AVX.
//!
//! Each type only exists when its target feature is enabled at compile time,
//! which is what makes the `unsafe` intrinsic calls below sound.

#[cfg(any(target_feature = "sse2", target_feature = "avx"))]
use std::arch::x86_64::*;
#[cfg(any(target_feature = "sse2", target_feature = "avx"))]
use std::fmt;

#[cfg(any(target_feature = "sse2", target_feature = "avx"))]
use super::Numeric;

// ============================================================================
// SSE2: 2 x f64
// ============================================================================

/// Two f64 lanes in an SSE2 register
#[cfg(target_feature = "sse2")]
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F64x2(__m128d);

#[cfg(target_feature = "sse2")]
impl_lane_ops!(F64x2, add = _mm_add_pd, sub = _mm_sub_pd, mul = _mm_mul_pd, div = _mm_div_pd);

#[cfg(target_feature = "sse2")]
impl F64x2 {
    #[inline(always)]
    pub fn from_array(values: [f64; 2]) -> Self {
        Self::load(&values)
    }

    #[inline(always)]
    pub fn to_array(self) -> [f64; 2] {
        let mut out = [0.0; 2];
        self.store(&mut out);
        out
    }
}

#[cfg(target_feature = "sse2")]
impl Default for F64x2 {
    #[inline(always)]
    fn default() -> Self {
        // SAFETY: sse2 is enabled for this build.
        F64x2(unsafe { _mm_setzero_pd() })
    }
}

#[cfg(target_feature = "sse2")]
impl std::ops::Neg for F64x2 {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        // Flip the sign bit
        F64x2(unsafe { _mm_xor_pd(self.0, _mm_set1_pd(-0.0)) })
    }
}

#[cfg(target_feature = "sse2")]
impl fmt::Debug for F64x2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("F64x2").field(&self.to_array()).finish()
    }
}

#[cfg(target_feature = "sse2")]
impl Numeric for F64x2 {
    const LANES: usize = 2;

    #[inline(always)]
    fn splat(value: f64) -> Self {
        F64x2(unsafe { _mm_set1_pd(value) })
    }

    #[inline(always)]
    fn load(chunk: &[f64]) -> Self {
        assert!(chunk.len() >= 2);
        // SAFETY: bounds checked above, unaligned load.
        F64x2(unsafe { _mm_loadu_pd(chunk.as_ptr()) })
    }

    #[inline(always)]
    fn store(self, out: &mut [f64]) {
        assert!(out.len() >= 2);
        // SAFETY: bounds checked above, unaligned store.
        unsafe { _mm_storeu_pd(out.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        F64x2(unsafe { _mm_sqrt_pd(self.0) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        // Clear the sign bit
        F64x2(unsafe { _mm_andnot_pd(_mm_set1_pd(-0.0), self.0) })
    }

    #[inline(always)]
    fn max(self, other: Self) -> Self {
        F64x2(unsafe { _mm_max_pd(self.0, other.0) })
    }

    #[inline(always)]
    fn min(self, other: Self) -> Self {
        F64x2(unsafe { _mm_min_pd(self.0, other.0) })
    }

    #[inline(always)]
    fn reduce_sum(self) -> f64 {
        let [a, b] = self.to_array();
        a + b
    }

    #[inline(always)]
    fn reduce_max(self) -> f64 {
        let [a, b] = self.to_array();
        a.max(b)
    }

    #[inline(always)]
    fn reduce_min(self) -> f64 {
        let [a, b] = self.to_array();
        a.min(b)
    }
}

// ============================================================================
// AVX: 4 x f64
// ============================================================================

/// Four f64 lanes in an AVX register
#[cfg(target_feature = "avx")]
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F64x4(__m256d);

#[cfg(target_feature = "avx")]
impl_lane_ops!(
    F64x4,
    add = _mm256_add_pd,
    sub = _mm256_sub_pd,
    mul = _mm256_mul_pd,
    div = _mm256_div_pd
);

#[cfg(target_feature = "avx")]
impl F64x4 {
    #[inline(always)]
    pub fn from_array(values: [f64; 4]) -> Self {
        Self::load(&values)
    }

    #[inline(always)]
    pub fn to_array(self) -> [f64; 4] {
        let mut out = [0.0; 4];
        self.store(&mut out);
        out
    }
}

#[cfg(target_feature = "avx")]
impl Default for F64x4 {
    #[inline(always)]
    fn default() -> Self {
        // SAFETY: avx is enabled for this build.
        F64x4(unsafe { _mm256_setzero_pd() })
    }
}

#[cfg(target_feature = "avx")]
impl std::ops::Neg for F64x4 {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        F64x4(unsafe { _mm256_xor_pd(self.0, _mm256_set1_pd(-0.0)) })
    }
}

#[cfg(target_feature = "avx")]
impl fmt::Debug for F64x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("F64x4").field(&self.to_array()).finish()
    }
}

#[cfg(target_feature = "avx")]
impl Numeric for F64x4 {
    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: f64) -> Self {
        F64x4(unsafe { _mm256_set1_pd(value) })
    }

    #[inline(always)]
    fn load(chunk: &[f64]) -> Self {
        assert!(chunk.len() >= 4);
        // SAFETY: bounds checked above, unaligned load.
        F64x4(unsafe { _mm256_loadu_pd(chunk.as_ptr()) })
    }

    #[inline(always)]
    fn store(self, out: &mut [f64]) {
        assert!(out.len() >= 4);
        // SAFETY: bounds checked above, unaligned store.
        unsafe { _mm256_storeu_pd(out.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        F64x4(unsafe { _mm256_sqrt_pd(self.0) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        F64x4(unsafe { _mm256_andnot_pd(_mm256_set1_pd(-0.0), self.0) })
    }

    #[inline(always)]
    fn max(self, other: Self) -> Self {
        F64x4(unsafe { _mm256_max_pd(self.0, other.0) })
    }

    #[inline(always)]
    fn min(self, other: Self) -> Self {
        F64x4(unsafe { _mm256_min_pd(self.0, other.0) })
    }

    #[inline(always)]
    fn reduce_sum(self) -> f64 {
        let [a, b, c, d] = self.to_array();
        (a + b) + (c + d)
    }

    #[inline(always)]
    fn reduce_max(self) -> f64 {
        let [a, b, c, d] = self.to_array();
        a.max(b).max(c.max(d))
    }

    #[inline(always)]
    fn reduce_min(self) -> f64 {
        let [a, b, c, d] = self.to_array();
        a.min(b).min(c.min(d))
    }
}

//! aarch64 lane type: `F64x2` over NEON.

use std::arch::aarch64::*;
use std::fmt;

use super::Numeric;

/// Two f64 lanes in a NEON register
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct F64x2(float64x2_t);

impl_lane_ops!(F64x2, add = vaddq_f64, sub = vsubq_f64, mul = vmulq_f64, div = vdivq_f64);

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

impl Default for F64x2 {
    #[inline(always)]
    fn default() -> Self {
        Self::splat(0.0)
    }
}

impl std::ops::Neg for F64x2 {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        F64x2(unsafe { vnegq_f64(self.0) })
    }
}

impl fmt::Debug for F64x2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("F64x2").field(&self.to_array()).finish()
    }
}

impl Numeric for F64x2 {
    const LANES: usize = 2;

    #[inline(always)]
    fn splat(value: f64) -> Self {
        F64x2(unsafe { vdupq_n_f64(value) })
    }

    #[inline(always)]
    fn load(chunk: &[f64]) -> Self {
        assert!(chunk.len() >= 2);
        // SAFETY: bounds checked above; vld1q has no alignment requirement beyond f64.
        F64x2(unsafe { vld1q_f64(chunk.as_ptr()) })
    }

    #[inline(always)]
    fn store(self, out: &mut [f64]) {
        assert!(out.len() >= 2);
        // SAFETY: bounds checked above.
        unsafe { vst1q_f64(out.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        F64x2(unsafe { vsqrtq_f64(self.0) })
    }

    #[inline(always)]
    fn abs(self) -> Self {
        F64x2(unsafe { vabsq_f64(self.0) })
    }

    #[inline(always)]
    fn max(self, other: Self) -> Self {
        F64x2(unsafe { vmaxq_f64(self.0, other.0) })
    }

    #[inline(always)]
    fn min(self, other: Self) -> Self {
        F64x2(unsafe { vminq_f64(self.0, other.0) })
    }

    #[inline(always)]
    fn reduce_sum(self) -> f64 {
        unsafe { vaddvq_f64(self.0) }
    }

    #[inline(always)]
    fn reduce_max(self) -> f64 {
        unsafe { vmaxvq_f64(self.0) }
    }

    #[inline(always)]
    fn reduce_min(self) -> f64 {
        unsafe { vminvq_f64(self.0) }
    }
}

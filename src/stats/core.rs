// src/stats/core.rs

use crate::numeric::Numeric;
use crate::stats::chunked::{fold, zip_fold, Fold, ZipFold};

/// Which side of zero [`conditional_sum`] accumulates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Σ max(0, x)
    Positive,
    /// Σ max(0, -x)
    Negative,
}

struct Sum;

impl Fold for Sum {
    const IDENTITY: f64 = 0.0;

    #[inline(always)]
    fn step<T: Numeric>(&self, acc: T, x: T) -> T {
        acc + x
    }

    #[inline(always)]
    fn horizontal<T: Numeric>(acc: T) -> f64 {
        acc.reduce_sum()
    }

    #[inline(always)]
    fn merge(vector: f64, tail: f64) -> f64 {
        vector + tail
    }
}

struct Dot;

impl ZipFold for Dot {
    const IDENTITY: f64 = 0.0;

    #[inline(always)]
    fn step<T: Numeric>(&self, acc: T, a: T, b: T) -> T {
        acc + a * b
    }

    #[inline(always)]
    fn horizontal<T: Numeric>(acc: T) -> f64 {
        acc.reduce_sum()
    }

    #[inline(always)]
    fn merge(vector: f64, tail: f64) -> f64 {
        vector + tail
    }
}

/// Σ (x - mean)²
struct SquaredDeviation {
    mean: f64,
}

impl Fold for SquaredDeviation {
    const IDENTITY: f64 = 0.0;

    #[inline(always)]
    fn step<T: Numeric>(&self, acc: T, x: T) -> T {
        let diff = x - T::splat(self.mean);
        acc + diff * diff
    }

    #[inline(always)]
    fn horizontal<T: Numeric>(acc: T) -> f64 {
        acc.reduce_sum()
    }

    #[inline(always)]
    fn merge(vector: f64, tail: f64) -> f64 {
        vector + tail
    }
}

struct Max;

impl Fold for Max {
    const IDENTITY: f64 = f64::NEG_INFINITY;

    #[inline(always)]
    fn step<T: Numeric>(&self, acc: T, x: T) -> T {
        acc.max(x)
    }

    #[inline(always)]
    fn horizontal<T: Numeric>(acc: T) -> f64 {
        acc.reduce_max()
    }

    #[inline(always)]
    fn merge(vector: f64, tail: f64) -> f64 {
        vector.max(tail)
    }
}

struct Min;

impl Fold for Min {
    const IDENTITY: f64 = f64::INFINITY;

    #[inline(always)]
    fn step<T: Numeric>(&self, acc: T, x: T) -> T {
        acc.min(x)
    }

    #[inline(always)]
    fn horizontal<T: Numeric>(acc: T) -> f64 {
        acc.reduce_min()
    }

    #[inline(always)]
    fn merge(vector: f64, tail: f64) -> f64 {
        vector.min(tail)
    }
}

/// Branchless Σ max(0, ±x)
struct ConditionalSum {
    sign: Sign,
}

impl Fold for ConditionalSum {
    const IDENTITY: f64 = 0.0;

    #[inline(always)]
    fn step<T: Numeric>(&self, acc: T, x: T) -> T {
        let x = match self.sign {
            Sign::Positive => x,
            Sign::Negative => -x,
        };
        acc + x.max(T::zero())
    }

    #[inline(always)]
    fn horizontal<T: Numeric>(acc: T) -> f64 {
        acc.reduce_sum()
    }

    #[inline(always)]
    fn merge(vector: f64, tail: f64) -> f64 {
        vector + tail
    }
}

#[inline]
pub fn sum<T: Numeric>(data: &[f64]) -> f64 {
    fold::<T, _>(data, &Sum)
}

/// Σ a[i]·b[i] over the common prefix of both buffers
#[inline]
pub fn dot<T: Numeric>(a: &[f64], b: &[f64]) -> f64 {
    zip_fold::<T, _>(a, b, &Dot)
}

#[inline]
pub fn mean<T: Numeric>(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    sum::<T>(data) / data.len() as f64
}

/// Σ (x - mean)² around a precomputed mean
#[inline]
pub fn sum_squared_deviations<T: Numeric>(data: &[f64], mean: f64) -> f64 {
    fold::<T, _>(data, &SquaredDeviation { mean })
}

/// Population variance (divisor `len`), two-pass
#[inline]
pub fn variance<T: Numeric>(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean::<T>(data);
    sum_squared_deviations::<T>(data, m) / data.len() as f64
}

#[inline]
pub fn stddev<T: Numeric>(data: &[f64]) -> f64 {
    variance::<T>(data).sqrt()
}

#[inline]
pub fn max<T: Numeric>(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    fold::<T, _>(data, &Max)
}

#[inline]
pub fn min<T: Numeric>(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    fold::<T, _>(data, &Min)
}

/// Returns min and max; both 0.0 for empty input
#[inline]
pub fn minmax<T: Numeric>(data: &[f64]) -> (f64, f64) {
    (min::<T>(data), max::<T>(data))
}

/// Σ max(0, x) for [`Sign::Positive`], Σ max(0, -x) for [`Sign::Negative`]
#[inline]
pub fn conditional_sum<T: Numeric>(data: &[f64], sign: Sign) -> f64 {
    fold::<T, _>(data, &ConditionalSum { sign })
}

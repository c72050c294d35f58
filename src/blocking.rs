//! Cache-blocking strategy for large window reductions.
//!
//! Large windows, or long series whose windows are swept repeatedly, are
//! reduced in fixed-size blocks that stay resident in L1/L2. Per-block
//! partial results are merged with the pairwise update of Chan et al., so the
//! blocked and direct paths agree up to floating-point reassociation.
//!
//! The choice is made once per call through [`BlockingPolicy::traversal`];
//! the returned [`Traversal`] is then applied to every window.
//!
//! # Examples
//!
//! ```
//! use quantstream::blocking::{BlockingPolicy, Traversal};
//!
//! let policy = BlockingPolicy::default();
//! assert_eq!(policy.traversal(20, 5_000), Traversal::Direct);
//! assert!(matches!(policy.traversal(1_001, 5_000), Traversal::Blocked { .. }));
//! ```

use crate::numeric::Numeric;
use crate::stats::core::{mean, sum, sum_squared_deviations, variance};

/// Windows strictly larger than this are blocked
pub const WINDOW_BLOCKING_THRESHOLD: usize = 1000;

/// Series strictly longer than this are blocked
pub const LENGTH_BLOCKING_THRESHOLD: usize = 100_000;

/// 512 f64 = 4 KiB per block
pub const DEFAULT_BLOCK_LEN: usize = 512;

/// When to switch window reductions to the blocked traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockingPolicy {
    pub window_threshold: usize,
    pub length_threshold: usize,
    /// Elements per block; zero is treated as one
    pub block_len: usize,
}

impl BlockingPolicy {
    /// Policy that always reduces windows directly
    pub const fn never() -> Self {
        Self {
            window_threshold: usize::MAX,
            length_threshold: usize::MAX,
            block_len: DEFAULT_BLOCK_LEN,
        }
    }

    /// Policy that always reduces windows in blocks
    pub const fn always() -> Self {
        Self {
            window_threshold: 0,
            length_threshold: 0,
            block_len: DEFAULT_BLOCK_LEN,
        }
    }

    #[inline]
    pub fn should_block(&self, window: usize, total_len: usize) -> bool {
        window > self.window_threshold || total_len > self.length_threshold
    }

    /// Decide the traversal for `window`-sized reductions over a series of
    /// `total_len` elements.
    pub fn traversal(&self, window: usize, total_len: usize) -> Traversal {
        let traversal = if self.should_block(window, total_len) {
            Traversal::Blocked {
                block_len: self.block_len.max(1),
            }
        } else {
            Traversal::Direct
        };
        tracing::trace!(
            window,
            total_len,
            block_len = self.block_len,
            ?traversal,
            "selected window traversal"
        );
        traversal
    }
}

impl Default for BlockingPolicy {
    fn default() -> Self {
        Self {
            window_threshold: WINDOW_BLOCKING_THRESHOLD,
            length_threshold: LENGTH_BLOCKING_THRESHOLD,
            block_len: DEFAULT_BLOCK_LEN,
        }
    }
}

/// How a single window is reduced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// One pass over the whole window
    Direct,
    /// Fixed-size blocks merged pairwise
    Blocked { block_len: usize },
}

impl Traversal {
    /// Σ window
    #[inline]
    pub fn sum<T: Numeric>(self, window: &[f64]) -> f64 {
        match self {
            Traversal::Direct => sum::<T>(window),
            Traversal::Blocked { block_len } => {
                window.chunks(block_len.max(1)).map(sum::<T>).sum()
            }
        }
    }

    /// Population variance of the window; 0.0 when empty
    #[inline]
    pub fn variance<T: Numeric>(self, window: &[f64]) -> f64 {
        match self {
            Traversal::Direct => variance::<T>(window),
            Traversal::Blocked { block_len } => {
                let merged = window
                    .chunks(block_len.max(1))
                    .map(BlockMoments::of::<T>)
                    .fold(BlockMoments::EMPTY, BlockMoments::merge);
                merged.variance()
            }
        }
    }

    #[inline]
    pub fn stddev<T: Numeric>(self, window: &[f64]) -> f64 {
        self.variance::<T>(window).sqrt()
    }
}

/// (count, mean, M2) of one block
#[derive(Debug, Clone, Copy)]
struct BlockMoments {
    count: f64,
    mean: f64,
    m2: f64,
}

impl BlockMoments {
    const EMPTY: Self = Self {
        count: 0.0,
        mean: 0.0,
        m2: 0.0,
    };

    #[inline(always)]
    fn of<T: Numeric>(block: &[f64]) -> Self {
        let m = mean::<T>(block);
        Self {
            count: block.len() as f64,
            mean: m,
            m2: sum_squared_deviations::<T>(block, m),
        }
    }

    /// Chan's pairwise combination
    #[inline(always)]
    fn merge(self, other: Self) -> Self {
        let count = self.count + other.count;
        if count == 0.0 {
            return Self::EMPTY;
        }
        let delta = other.mean - self.mean;
        Self {
            count,
            mean: self.mean + delta * other.count / count,
            m2: self.m2 + other.m2 + delta * delta * self.count * other.count / count,
        }
    }

    #[inline(always)]
    fn variance(self) -> f64 {
        if self.count == 0.0 {
            return 0.0;
        }
        (self.m2 / self.count).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::NativeLane;
    use approx::assert_relative_eq;

    fn series(len: usize) -> Vec<f64> {
        (0..len).map(|i| ((i as f64) * 0.013).cos() * 0.02 + 0.001).collect()
    }

    #[test]
    fn test_thresholds() {
        let policy = BlockingPolicy::default();
        assert!(!policy.should_block(1000, 100_000));
        assert!(policy.should_block(1001, 10));
        assert!(policy.should_block(5, 100_001));
    }

    #[test]
    fn test_pinned_policies() {
        assert_eq!(BlockingPolicy::never().traversal(1 << 20, 1 << 30), Traversal::Direct);
        assert_eq!(
            BlockingPolicy::always().traversal(1, 1),
            Traversal::Blocked { block_len: DEFAULT_BLOCK_LEN }
        );
    }

    #[test]
    fn test_zero_block_len_is_clamped() {
        let policy = BlockingPolicy { block_len: 0, ..BlockingPolicy::always() };
        assert_eq!(policy.traversal(10, 10), Traversal::Blocked { block_len: 1 });
    }

    #[test]
    fn test_blocked_matches_direct() {
        let data = series(3001);
        let blocked = Traversal::Blocked { block_len: DEFAULT_BLOCK_LEN };

        assert_relative_eq!(
            blocked.sum::<NativeLane>(&data),
            Traversal::Direct.sum::<NativeLane>(&data),
            max_relative = 1e-9
        );
        assert_relative_eq!(
            blocked.variance::<NativeLane>(&data),
            Traversal::Direct.variance::<NativeLane>(&data),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_uneven_blocks() {
        // Blocks of 3 over 10 values leave a final block of 1
        let data: Vec<f64> = (1..=10).map(f64::from).collect();
        let blocked = Traversal::Blocked { block_len: 3 };
        assert_eq!(blocked.sum::<f64>(&data), 55.0);
        assert_relative_eq!(blocked.variance::<f64>(&data), 8.25, epsilon = 1e-12);
        assert_relative_eq!(blocked.stddev::<f64>(&data), 8.25_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_empty_window() {
        let blocked = Traversal::Blocked { block_len: 4 };
        assert_eq!(blocked.sum::<NativeLane>(&[]), 0.0);
        assert_eq!(blocked.variance::<NativeLane>(&[]), 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_policy_is_serializable() {
        fn assert_serde<T: serde::Serialize + serde::de::DeserializeOwned>() {}
        assert_serde::<BlockingPolicy>();
    }
}

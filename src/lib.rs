//! # quantstream
//!
//! Vectorized streaming statistics over borrowed `f64` time series.
//!
//! ## Design Philosophy
//!
//! - **f64 only**: Financial precision is non-negotiable
//! - **Zero-copy**: inputs are borrowed views, never copied or mutated
//! - **SIMD by lane width**: AVX (4), SSE / NEON (2) or scalar (1), chosen at build time
//! - **Numerically stable**: rolling variance tracks M2, never Σx²
//!
//! ## Modules
//!
//! - `simd`: Backend selection and host capability probing
//! - `numeric`: Lane types (`f64`, `F64x2`, `F64x4`) behind the `Numeric` trait
//! - `core`: Borrowed buffer views and the ring buffer
//! - `stats`: Reductions, elementwise kernels, online rolling moments
//! - `blocking`: Cache-blocking policy for large windows
//! - `ta`: SMA, EMA, RSI and rolling volatility
//!
//! ## Example
//!
//! ```rust
//! use quantstream::prelude::*;
//!
//! let prices = [100.0, 101.5, 100.8, 102.3, 103.0, 102.1, 104.2];
//!
//! let averages = sma(&prices, 3).unwrap();
//! assert_eq!(averages.len(), 5);
//!
//! let vol = rolling_volatility(&prices, 4).unwrap();
//! assert_eq!(vol.len(), 3);
//!
//! println!("{} backend, {} lanes", simd_backend(), LANE_WIDTH);
//! ```

pub mod blocking;
pub mod core;
pub mod error;
pub mod numeric;
pub mod simd;
pub mod stats;
pub mod ta;

pub use error::{Result, StatsError};

/// Common imports
pub mod prelude {
    // Backend
    pub use crate::simd::{backend, simd_backend, Backend, NativeLane, LANE_WIDTH};

    // Numeric traits
    pub use crate::numeric::Numeric;

    // Buffers
    pub use crate::core::{NumericBuffer, NumericBufferMut, RollingBuffer};

    // Errors
    pub use crate::error::{Result, StatsError};

    // Primitives
    pub use crate::stats::{
        dot_product, vector_add, vector_add_scalar, vector_conditional_sum, vector_div,
        vector_max, vector_mean, vector_min, vector_mul, vector_mul_scalar, vector_stddev,
        vector_sub, vector_sum, vector_variance, Sign,
    };

    // Rolling moments
    pub use crate::stats::{rolling_stddev, rolling_variance, RollingStdDev, WindowMoments};

    // Blocking
    pub use crate::blocking::{BlockingPolicy, Traversal};

    // Technical Analysis
    pub use crate::ta::{
        ema, ema_with_smoothing, log_returns, rolling_volatility, rolling_volatility_streaming,
        rolling_volatility_with, rsi, sma, Ewma, WilderRsi,
    };
}

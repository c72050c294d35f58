//! Vector reductions, elementwise kernels and online rolling moments
//!
//! Every primitive is written once against [`Numeric`](crate::numeric::Numeric)
//! and traversed by [`chunked`]. The `vector_*` functions fix the lane type
//! to [`NativeLane`](crate::simd::NativeLane); the generic forms in
//! [`core`] and [`elementwise`] take it as a type parameter.
//!
//! # Examples
//!
//! ```
//! use quantstream::stats::{self, vector_mean, Sign};
//!
//! let returns = [0.01, -0.02, 0.015, -0.005];
//! assert!((vector_mean(&returns) - 0.0).abs() < 1e-15);
//!
//! // Same kernel, forced to one lane
//! let gains = stats::core::conditional_sum::<f64>(&returns, Sign::Positive);
//! assert!((gains - 0.025).abs() < 1e-15);
//! ```

pub mod chunked;
pub mod core;
pub mod elementwise;
mod rolling;
pub mod vector;

pub use self::core::Sign;
pub use rolling::{rolling_stddev, rolling_variance, RollingStdDev, WindowMoments};
pub use vector::*;

//! Error types for the rolling-window engine.

use thiserror::Error;

/// Caller contract violations.
///
/// Insufficient data is not an error: window algorithms return an empty
/// output instead. Primitive reductions never fail.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StatsError {
    /// Window size below the algorithm minimum
    #[error("invalid window size: {window} (must be at least {min})")]
    InvalidWindow {
        /// Requested window size.
        window: usize,
        /// Smallest accepted window size.
        min: usize,
    },

    /// Smoothing factor outside the open interval (0, 1)
    #[error("smoothing factor must lie strictly inside (0, 1), got {alpha}")]
    InvalidSmoothing {
        /// Rejected smoothing factor.
        alpha: f64,
    },

    /// Non-positive (or NaN) price where a logarithm is required
    #[error("price at index {index} must be positive for log returns, got {price}")]
    NonPositivePrice {
        /// Position of the offending price in the input buffer.
        index: usize,
        /// The offending price.
        price: f64,
    },
}

impl StatsError {
    /// Whether this is a mathematical domain violation rather than a bad parameter
    #[must_use]
    pub fn is_domain_error(&self) -> bool {
        matches!(self, StatsError::NonPositivePrice { .. })
    }

    /// Checks `window >= min`.
    pub(crate) fn check_window(window: usize, min: usize) -> Result<()> {
        if window < min {
            tracing::debug!(window, min, "rejected window size");
            return Err(StatsError::InvalidWindow { window, min });
        }
        Ok(())
    }

    /// Checks `0 < alpha < 1`; NaN is rejected.
    pub(crate) fn check_smoothing(alpha: f64) -> Result<()> {
        if !(alpha > 0.0 && alpha < 1.0) {
            tracing::debug!(alpha, "rejected smoothing factor");
            return Err(StatsError::InvalidSmoothing { alpha });
        }
        Ok(())
    }
}

/// Crate result alias
pub type Result<T> = std::result::Result<T, StatsError>;

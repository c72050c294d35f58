use crate::blocking::BlockingPolicy;
use crate::error::{Result, StatsError};
use crate::simd::NativeLane;
use crate::stats::{vector_conditional_sum, vector_div, vector_sub, RollingStdDev, Sign};

/// Trading days used to annualize daily volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

// ============================================================================
// EMA
// ============================================================================

/// Exponential Moving Average state
///
/// The first value seeds the average; every later value `x` updates it to
/// `x·α + ema·(1−α)`.
///
/// # Examples
///
/// ```
/// use quantstream::ta::Ewma;
///
/// let mut ema = Ewma::new(0.5).unwrap();
/// assert_eq!(ema.update(10.0), 10.0);
/// assert_eq!(ema.update(11.0), 10.5);
/// assert_eq!(ema.value(), Some(10.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ewma {
    value: f64,
    alpha: f64,
    initialized: bool,
}

impl Ewma {
    /// Create with smoothing factor `alpha`
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidSmoothing`] unless `0 < alpha < 1`.
    #[inline]
    pub fn new(alpha: f64) -> Result<Self> {
        StatsError::check_smoothing(alpha)?;
        Ok(Self {
            value: 0.0,
            alpha,
            initialized: false,
        })
    }

    /// Create from a period, with alpha = 2 / (period + 1)
    ///
    /// A period of 1 derives alpha = 1 and is rejected like any other
    /// out-of-range smoothing factor.
    #[inline]
    pub fn from_period(period: usize) -> Result<Self> {
        StatsError::check_window(period, 1)?;
        Self::new(2.0 / (period as f64 + 1.0))
    }

    #[inline(always)]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[inline(always)]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Update with new value
    #[inline(always)]
    pub fn update(&mut self, value: f64) -> f64 {
        if !self.initialized {
            self.value = value;
            self.initialized = true;
        } else {
            self.value = value * self.alpha + self.value * (1.0 - self.alpha);
        }
        self.value
    }

    /// Current average, `None` before the first update
    #[inline(always)]
    pub fn value(&self) -> Option<f64> {
        self.initialized.then_some(self.value)
    }

    #[inline]
    pub fn reset(&mut self) {
        self.value = 0.0;
        self.initialized = false;
    }
}

// ============================================================================
// RSI
// ============================================================================

/// Wilder-smoothed Relative Strength Index state
///
/// The first `period` price changes seed the average gain and loss as plain
/// means. Each later change updates them with Wilder's smoothing
/// `avg = (avg·(period−1) + x) / period`.
///
/// # Examples
///
/// ```
/// use quantstream::ta::WilderRsi;
///
/// let mut rsi = WilderRsi::new(2).unwrap();
/// assert_eq!(rsi.push(10.0), None);
/// assert_eq!(rsi.push(11.0), None);
/// assert_eq!(rsi.push(12.0), Some(100.0));
/// assert_eq!(rsi.push(11.0), Some(50.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(align(64))]
pub struct WilderRsi {
    period: usize,
    avg_gain: f64,
    avg_loss: f64,
    prev_price: Option<f64>,
    seeded: usize,
}

impl WilderRsi {
    /// # Errors
    ///
    /// [`StatsError::InvalidWindow`] if `period` is zero.
    #[inline]
    pub fn new(period: usize) -> Result<Self> {
        StatsError::check_window(period, 1)?;
        Ok(Self {
            period,
            avg_gain: 0.0,
            avg_loss: 0.0,
            prev_price: None,
            seeded: 0,
        })
    }

    /// Resume from precomputed average gain and loss
    ///
    /// The returned state accepts further changes through
    /// [`update_change`](Self::update_change).
    #[inline]
    pub fn from_averages(period: usize, avg_gain: f64, avg_loss: f64) -> Result<Self> {
        let mut state = Self::new(period)?;
        state.avg_gain = avg_gain;
        state.avg_loss = avg_loss;
        state.seeded = period;
        Ok(state)
    }

    /// Feed the next price; returns the RSI once `period` changes have been seen.
    #[inline]
    pub fn push(&mut self, price: f64) -> Option<f64> {
        let prev = self.prev_price.replace(price)?;
        let change = price - prev;

        if self.is_seeded() {
            return Some(self.update_change(change));
        }

        self.avg_gain += change.max(0.0);
        self.avg_loss += (-change).max(0.0);
        self.seeded += 1;
        if !self.is_seeded() {
            return None;
        }

        let period = self.period as f64;
        self.avg_gain /= period;
        self.avg_loss /= period;
        Some(self.value())
    }

    /// Apply one price change to seeded averages and return the new RSI.
    #[inline(always)]
    pub fn update_change(&mut self, change: f64) -> f64 {
        debug_assert!(self.is_seeded(), "averages not seeded");
        let period = self.period as f64;
        let keep = period - 1.0;
        self.avg_gain = (self.avg_gain * keep + change.max(0.0)) / period;
        self.avg_loss = (self.avg_loss * keep + (-change).max(0.0)) / period;
        self.value()
    }

    /// RSI of the current averages
    ///
    /// 100 when there are no losses, 50 when both averages are zero.
    #[inline(always)]
    pub fn value(&self) -> f64 {
        if self.avg_loss == 0.0 {
            return if self.avg_gain == 0.0 { 50.0 } else { 100.0 };
        }
        let rs = self.avg_gain / self.avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }

    #[inline(always)]
    pub fn is_seeded(&self) -> bool {
        self.seeded >= self.period
    }

    #[inline(always)]
    pub fn averages(&self) -> (f64, f64) {
        (self.avg_gain, self.avg_loss)
    }

    #[inline]
    pub fn reset(&mut self) {
        self.avg_gain = 0.0;
        self.avg_loss = 0.0;
        self.prev_price = None;
        self.seeded = 0;
    }
}

// ============================================================================
// Batch entry points
// ============================================================================

/// Simple moving average of every length-`window` window
///
/// The first window sum is a vector reduction; later windows slide it with
/// `sum += in − out`. Returns `len − window + 1` values, or an empty vector
/// when `data` is shorter than the window.
///
/// # Errors
///
/// [`StatsError::InvalidWindow`] if `window` is zero.
///
/// # Complexity
///
/// O(N) total, O(1) per output after the seed window
pub fn sma(data: &[f64], window: usize) -> Result<Vec<f64>> {
    StatsError::check_window(window, 1)?;
    if data.len() < window {
        return Ok(Vec::new());
    }

    let traversal = BlockingPolicy::default().traversal(window, data.len());
    let w = window as f64;
    let mut sum = traversal.sum::<NativeLane>(&data[..window]);

    let mut out = Vec::with_capacity(data.len() - window + 1);
    out.push(sum / w);
    for (&incoming, &outgoing) in data[window..].iter().zip(data) {
        sum += incoming - outgoing;
        out.push(sum / w);
    }
    Ok(out)
}

/// Exponential moving average with alpha = 2 / (window + 1)
///
/// # Errors
///
/// [`StatsError::InvalidWindow`] if `window` is zero,
/// [`StatsError::InvalidSmoothing`] if `window` is one.
pub fn ema(data: &[f64], window: usize) -> Result<Vec<f64>> {
    let state = Ewma::from_period(window)?;
    Ok(run_ema(state, data))
}

/// Exponential moving average with an explicit smoothing factor
///
/// Output has the same length as `data`; `ema[0] = data[0]`.
///
/// # Errors
///
/// [`StatsError::InvalidSmoothing`] unless `0 < alpha < 1`.
pub fn ema_with_smoothing(data: &[f64], alpha: f64) -> Result<Vec<f64>> {
    let state = Ewma::new(alpha)?;
    Ok(run_ema(state, data))
}

fn run_ema(mut state: Ewma, data: &[f64]) -> Vec<f64> {
    data.iter().map(|&x| state.update(x)).collect()
}

/// Wilder-smoothed RSI in `[0, 100]`
///
/// Returns `len − window` values, or an empty vector with fewer than
/// `window + 1` prices.
///
/// # Errors
///
/// [`StatsError::InvalidWindow`] if `window` is zero.
pub fn rsi(prices: &[f64], window: usize) -> Result<Vec<f64>> {
    StatsError::check_window(window, 1)?;
    if prices.len() <= window {
        return Ok(Vec::new());
    }

    let mut changes = vec![0.0; prices.len() - 1];
    vector_sub(&prices[1..], prices, &mut changes);

    let seed = &changes[..window];
    let w = window as f64;
    let mut state = WilderRsi::from_averages(
        window,
        vector_conditional_sum(seed, Sign::Positive) / w,
        vector_conditional_sum(seed, Sign::Negative) / w,
    )?;

    let mut out = Vec::with_capacity(prices.len() - window);
    out.push(state.value());
    out.extend(changes[window..].iter().map(|&change| state.update_change(change)));
    Ok(out)
}

/// `ln(p[i+1] / p[i])` for every adjacent pair of prices
///
/// # Errors
///
/// [`StatsError::NonPositivePrice`] for the first price that is not strictly
/// positive (NaN included).
pub fn log_returns(prices: &[f64]) -> Result<Vec<f64>> {
    check_prices(prices)?;
    if prices.len() < 2 {
        return Ok(Vec::new());
    }

    let mut returns = vec![0.0; prices.len() - 1];
    vector_div(&prices[1..], prices, &mut returns);
    for r in &mut returns {
        *r = r.ln();
    }
    Ok(returns)
}

fn check_prices(prices: &[f64]) -> Result<()> {
    match prices.iter().position(|&p| !(p > 0.0)) {
        Some(index) => {
            let price = prices[index];
            tracing::debug!(index, price, "rejected non-positive price");
            Err(StatsError::NonPositivePrice { index, price })
        }
        None => Ok(()),
    }
}

/// Annualized rolling volatility of log returns
///
/// Each window of `window` consecutive log returns yields its population
/// standard deviation times √252. Returns `len − window` values, or an empty
/// vector when there are no more prices than the window.
///
/// # Errors
///
/// [`StatsError::InvalidWindow`] if `window < 2`,
/// [`StatsError::NonPositivePrice`] if any price is not strictly positive.
///
/// # Examples
///
/// ```
/// use quantstream::ta::rolling_volatility;
///
/// let prices = [100.0, 101.0, 100.5, 102.0, 101.0, 103.0];
/// let vol = rolling_volatility(&prices, 3).unwrap();
/// assert_eq!(vol.len(), 3);
/// assert!(vol.iter().all(|v| *v > 0.0));
/// ```
pub fn rolling_volatility(prices: &[f64], window: usize) -> Result<Vec<f64>> {
    rolling_volatility_with(prices, window, &BlockingPolicy::default())
}

/// [`rolling_volatility`] with an explicit blocking policy
pub fn rolling_volatility_with(
    prices: &[f64],
    window: usize,
    policy: &BlockingPolicy,
) -> Result<Vec<f64>> {
    let Some(returns) = volatility_returns(prices, window)? else {
        return Ok(Vec::new());
    };

    let annualization = TRADING_DAYS_PER_YEAR.sqrt();
    let traversal = policy.traversal(window, prices.len());
    Ok(returns
        .windows(window)
        .map(|w| traversal.stddev::<NativeLane>(w) * annualization)
        .collect())
}

/// [`rolling_volatility`] through the online tracker, O(1) per window
///
/// Agrees with the two-pass result up to floating-point tolerance.
pub fn rolling_volatility_streaming(prices: &[f64], window: usize) -> Result<Vec<f64>> {
    let Some(returns) = volatility_returns(prices, window)? else {
        return Ok(Vec::new());
    };

    let annualization = TRADING_DAYS_PER_YEAR.sqrt();
    let mut tracker = RollingStdDev::new(window)?;
    Ok(returns
        .iter()
        .filter_map(|&r| tracker.push(r))
        .map(|sd| sd * annualization)
        .collect())
}

/// Validated log returns, `None` when too short for a single window
fn volatility_returns(prices: &[f64], window: usize) -> Result<Option<Vec<f64>>> {
    StatsError::check_window(window, 2)?;
    let returns = log_returns(prices)?;
    if prices.len() <= window {
        return Ok(None);
    }
    Ok(Some(returns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sma_basic() {
        let data: Vec<f64> = (1..=7).map(f64::from).collect();
        assert_eq!(sma(&data, 3).unwrap(), vec![2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(sma(&data, 7).unwrap(), vec![4.0]);
        assert_eq!(sma(&data, 1).unwrap(), data);
    }

    #[test]
    fn test_sma_edges() {
        assert!(sma(&[1.0, 2.0], 3).unwrap().is_empty());
        assert!(sma(&[], 1).unwrap().is_empty());
        assert_eq!(sma(&[1.0], 0), Err(StatsError::InvalidWindow { window: 0, min: 1 }));
    }

    #[test]
    fn test_ema_alpha_half() {
        let data = [10.0, 11.0, 12.0, 11.0, 10.0, 11.0, 12.0, 13.0];
        let out = ema_with_smoothing(&data, 0.5).unwrap();
        assert_eq!(
            out,
            vec![10.0, 10.5, 11.25, 11.125, 10.5625, 10.78125, 11.390625, 12.1953125]
        );
    }

    #[test]
    fn test_ema_from_window() {
        // window 3 derives alpha 0.5
        let data = [10.0, 11.0, 12.0];
        assert_eq!(ema(&data, 3).unwrap(), ema_with_smoothing(&data, 0.5).unwrap());
        assert!(ema(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn test_ema_invalid() {
        assert!(matches!(ema(&[1.0], 0), Err(StatsError::InvalidWindow { .. })));
        assert!(matches!(ema(&[1.0], 1), Err(StatsError::InvalidSmoothing { .. })));
        assert!(ema_with_smoothing(&[1.0], 0.0).is_err());
        assert!(ema_with_smoothing(&[], 1.0).is_err());
        assert!(ema_with_smoothing(&[1.0], f64::NAN).is_err());
    }

    #[test]
    fn test_ewma_reset() {
        let mut state = Ewma::from_period(3).unwrap();
        assert_eq!(state.value(), None);
        state.update(4.0);
        assert!(state.is_initialized());
        state.reset();
        assert_eq!(state.update(8.0), 8.0);
    }

    #[test]
    fn test_rsi_increasing_is_100() {
        let prices: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi(&prices, 14).unwrap(), vec![100.0]);
    }

    #[test]
    fn test_rsi_decreasing_is_0() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let out = rsi(&prices, 5).unwrap();
        assert_eq!(out.len(), 15);
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_rsi_flat_is_neutral() {
        let out = rsi(&[5.0; 10], 3).unwrap();
        assert!(out.iter().all(|&v| v == 50.0));
    }

    #[test]
    fn test_rsi_known_values() {
        // changes: +1, -1, +2, -1 ; window 2
        let prices = [10.0, 11.0, 10.0, 12.0, 11.0];
        let out = rsi(&prices, 2).unwrap();
        assert_eq!(out.len(), 3);
        // seed: gain 0.5, loss 0.5
        assert_relative_eq!(out[0], 50.0);
        // gain (0.5 + 2) / 2 = 1.25, loss 0.5 / 2 = 0.25
        assert_relative_eq!(out[1], 100.0 - 100.0 / 6.0, epsilon = 1e-12);
        // gain 0.625, loss (0.25 + 1) / 2 = 0.625
        assert_relative_eq!(out[2], 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rsi_edges() {
        assert!(rsi(&[1.0, 2.0, 3.0], 3).unwrap().is_empty());
        assert!(rsi(&[1.0, 2.0], 0).is_err());
    }

    #[test]
    fn test_rsi_streaming_matches_batch() {
        let prices: Vec<f64> = (0..60).map(|i| 50.0 + ((i * 7) % 11) as f64 - (i % 4) as f64).collect();
        let batch = rsi(&prices, 14).unwrap();

        let mut state = WilderRsi::new(14).unwrap();
        let streamed: Vec<f64> = prices.iter().filter_map(|&p| state.push(p)).collect();

        assert_eq!(streamed.len(), batch.len());
        for (s, b) in streamed.iter().zip(&batch) {
            assert_relative_eq!(*s, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_log_returns() {
        let returns = log_returns(&[1.0, std::f64::consts::E, 1.0]).unwrap();
        assert_relative_eq!(returns[0], 1.0, epsilon = 1e-15);
        assert_relative_eq!(returns[1], -1.0, epsilon = 1e-15);
        assert!(log_returns(&[5.0]).unwrap().is_empty());
        assert_eq!(
            log_returns(&[1.0, 0.0, 2.0]),
            Err(StatsError::NonPositivePrice { index: 1, price: 0.0 })
        );
    }

    #[test]
    fn test_volatility_errors() {
        let prices = [100.0, 101.0, 102.0, 103.0];
        assert!(matches!(
            rolling_volatility(&prices, 0),
            Err(StatsError::InvalidWindow { window: 0, min: 2 })
        ));
        assert!(rolling_volatility(&prices, 1).is_err());

        let err = rolling_volatility(&[100.0, -1.0, 102.0, 103.0], 2).unwrap_err();
        assert!(err.is_domain_error());
        assert!(rolling_volatility(&[100.0, 0.0, 102.0, 103.0], 2).unwrap_err().is_domain_error());
        // Bad prices are reported even when the series is too short for a window
        assert!(rolling_volatility(&[0.0, 1.0], 5).is_err());
    }

    #[test]
    fn test_volatility_lengths() {
        let prices = [100.0, 101.0, 99.0, 102.0, 103.0];
        assert_eq!(rolling_volatility(&prices, 2).unwrap().len(), 3);
        assert_eq!(rolling_volatility(&prices, 4).unwrap().len(), 1);
        assert!(rolling_volatility(&prices, 5).unwrap().is_empty());
        assert!(rolling_volatility_streaming(&prices, 5).unwrap().is_empty());
    }

    #[test]
    fn test_volatility_known_value() {
        // Constant growth has zero volatility
        let prices: Vec<f64> = (0..10).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        for v in rolling_volatility(&prices, 4).unwrap() {
            assert!(v.abs() < 1e-9);
        }

        // Returns alternate ±r, so each window's population stddev is r
        let r: f64 = 0.01;
        let mut prices = vec![100.0];
        for i in 0..8 {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            let last = *prices.last().unwrap();
            prices.push(last * (sign * r).exp());
        }
        for v in rolling_volatility(&prices, 4).unwrap() {
            assert_relative_eq!(v, r * 252.0_f64.sqrt(), max_relative = 1e-9);
        }
    }

    #[test]
    fn test_volatility_paths_agree() {
        let prices: Vec<f64> = (0..400).map(|i| 100.0 + (i as f64 * 0.05).sin() * 3.0).collect();
        let direct = rolling_volatility_with(&prices, 30, &BlockingPolicy::never()).unwrap();
        let blocked = rolling_volatility_with(
            &prices,
            30,
            &BlockingPolicy { block_len: 7, ..BlockingPolicy::always() },
        )
        .unwrap();
        let streamed = rolling_volatility_streaming(&prices, 30).unwrap();

        assert_eq!(direct.len(), 370);
        for ((d, b), s) in direct.iter().zip(&blocked).zip(&streamed) {
            assert_relative_eq!(*d, *b, max_relative = 1e-9);
            assert_relative_eq!(*d, *s, max_relative = 1e-9);
        }
    }
}

use crate::core::RollingBuffer;
use crate::error::{Result, StatsError};

/// Sufficient statistics of a fixed-size window: count, mean and M2
///
/// Values enter through [`add`](Self::add) until the window is full, then
/// through [`slide`](Self::slide), which replaces the oldest value in O(1).
/// M2 (the sum of squared deviations from the current mean) is updated from
/// deviations only; no Σx² term is ever formed, so the variance does not
/// suffer the cancellation of the naive `E[x²] - E[x]²` form.
///
/// # Examples
///
/// ```
/// use quantstream::stats::WindowMoments;
///
/// let mut moments = WindowMoments::new(3).unwrap();
/// for x in [1.0, 2.0, 3.0] {
///     moments.add(x);
/// }
/// moments.slide(4.0, 1.0);
///
/// assert_eq!(moments.mean(), 3.0);
/// assert!((moments.variance() - 2.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMoments {
    window: usize,
    count: usize,
    mean: f64,
    m2: f64,
}

impl WindowMoments {
    /// Fails with [`StatsError::InvalidWindow`] when `window` is zero.
    pub fn new(window: usize) -> Result<Self> {
        StatsError::check_window(window, 1)?;
        Ok(Self {
            window,
            count: 0,
            mean: 0.0,
            m2: 0.0,
        })
    }

    /// Welford insertion while the window is filling
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline(always)]
    pub fn add(&mut self, value: f64) {
        debug_assert!(self.count < self.window, "window already full");
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Replace `outgoing` with `incoming` in a full window
    ///
    /// `M2 += (in - m')(in - m) - (out - m')(out - m)` with `m'` the new mean.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline(always)]
    pub fn slide(&mut self, incoming: f64, outgoing: f64) {
        debug_assert!(self.count == self.window, "slide on a partial window");
        let old_mean = self.mean;
        let new_mean = old_mean + (incoming - outgoing) / self.window as f64;
        self.m2 += (incoming - new_mean) * (incoming - old_mean)
            - (outgoing - new_mean) * (outgoing - old_mean);
        self.mean = new_mean;
    }

    #[inline(always)]
    pub fn window(&self) -> usize {
        self.window
    }

    #[inline(always)]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.count == self.window
    }

    #[inline(always)]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[inline(always)]
    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// Population variance of the values seen so far, clamped at zero
    #[inline(always)]
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.m2 / self.count as f64).max(0.0)
    }

    #[inline(always)]
    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }

    #[inline]
    pub fn reset(&mut self) {
        self.count = 0;
        self.mean = 0.0;
        self.m2 = 0.0;
    }
}

/// Push-based rolling standard deviation
///
/// Pairs [`WindowMoments`] with a ring buffer that remembers the value
/// leaving the window.
///
/// # Examples
///
/// ```
/// use quantstream::stats::RollingStdDev;
///
/// let mut tracker = RollingStdDev::new(2).unwrap();
/// assert_eq!(tracker.push(1.0), None);     // Window not yet full
/// assert_eq!(tracker.push(3.0), Some(1.0));
/// assert_eq!(tracker.push(3.0), Some(0.0));
/// ```
#[derive(Debug, Clone)]
pub struct RollingStdDev {
    moments: WindowMoments,
    buffer: RollingBuffer,
}

impl RollingStdDev {
    pub fn new(window: usize) -> Result<Self> {
        let moments = WindowMoments::new(window)?;
        Ok(Self {
            moments,
            buffer: RollingBuffer::with_capacity(window),
        })
    }

    /// Feed the next value; returns the window stddev once the window is full.
    ///
    /// # Complexity
    ///
    /// O(1) - Constant time regardless of window size
    #[inline(always)]
    pub fn push(&mut self, value: f64) -> Option<f64> {
        match self.buffer.push(value) {
            Some(outgoing) => self.moments.slide(value, outgoing),
            None => self.moments.add(value),
        }
        self.moments.is_full().then(|| self.moments.stddev())
    }

    #[inline(always)]
    pub fn moments(&self) -> &WindowMoments {
        &self.moments
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.moments.is_full()
    }

    #[inline]
    pub fn reset(&mut self) {
        self.moments.reset();
        self.buffer.reset();
    }
}

/// Population variance of every length-`window` window of `data`
///
/// Returns `len - window + 1` values, or an empty vector when `data` is
/// shorter than the window.
///
/// # Errors
///
/// [`StatsError::InvalidWindow`] if `window` is zero.
pub fn rolling_variance(data: &[f64], window: usize) -> Result<Vec<f64>> {
    rolling_moments(data, window, WindowMoments::variance)
}

/// Population standard deviation of every length-`window` window of `data`
///
/// # Errors
///
/// [`StatsError::InvalidWindow`] if `window` is zero.
pub fn rolling_stddev(data: &[f64], window: usize) -> Result<Vec<f64>> {
    rolling_moments(data, window, WindowMoments::stddev)
}

fn rolling_moments(
    data: &[f64],
    window: usize,
    read: impl Fn(&WindowMoments) -> f64,
) -> Result<Vec<f64>> {
    let mut moments = WindowMoments::new(window)?;
    if data.len() < window {
        return Ok(Vec::new());
    }

    let mut out = Vec::with_capacity(data.len() - window + 1);
    for &x in &data[..window] {
        moments.add(x);
    }
    out.push(read(&moments));

    for (&incoming, &outgoing) in data[window..].iter().zip(data) {
        moments.slide(incoming, outgoing);
        out.push(read(&moments));
    }

    Ok(out)
}

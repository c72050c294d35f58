//! Rolling-window technical indicators
//!
//! Batch functions take a borrowed price series and return a freshly
//! allocated `Vec<f64>`. The streaming state types behind them ([`Ewma`],
//! [`WilderRsi`]) can also be driven value by value.
//!
//! # Examples
//!
//! ```
//! use quantstream::ta::{ema, rsi, sma};
//!
//! let prices: Vec<f64> = (1..=20).map(f64::from).collect();
//!
//! let averages = sma(&prices, 5).unwrap();
//! assert_eq!(averages.len(), 16);
//! assert_eq!(averages[0], 3.0);
//!
//! let smoothed = ema(&prices, 9).unwrap();
//! assert_eq!(smoothed.len(), prices.len());
//!
//! // Strictly rising prices have no losses
//! assert!(rsi(&prices, 14).unwrap().iter().all(|&v| v == 100.0));
//! ```

pub mod indicators;

pub use indicators::*;

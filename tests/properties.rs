use proptest::prelude::*;
use quantstream::prelude::*;
use quantstream::stats::core;

fn series(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1_000.0..1_000.0f64, 0..max_len)
}

fn positive_prices(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..500.0f64, 0..max_len)
}

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn prop_sma_matches_brute_force(data in series(200), window in 1usize..40) {
        let out = sma(&data, window).unwrap();
        if data.len() < window {
            prop_assert!(out.is_empty());
        } else {
            prop_assert_eq!(out.len(), data.len() - window + 1);
            for (i, value) in out.iter().enumerate() {
                let expected = data[i..i + window].iter().sum::<f64>() / window as f64;
                prop_assert!(close(*value, expected, 1e-9), "i={} {} vs {}", i, value, expected);
            }
        }
    }

    #[test]
    fn prop_ema_is_convex_combination(data in series(200), alpha in 0.01..0.99f64) {
        let out = ema_with_smoothing(&data, alpha).unwrap();
        prop_assert_eq!(out.len(), data.len());
        for i in 1..out.len() {
            let lo = data[i].min(out[i - 1]);
            let hi = data[i].max(out[i - 1]);
            prop_assert!(out[i] >= lo - 1e-9 && out[i] <= hi + 1e-9);
        }
    }

    #[test]
    fn prop_rsi_is_bounded(prices in positive_prices(200), window in 1usize..30) {
        let out = rsi(&prices, window).unwrap();
        prop_assert_eq!(out.len(), prices.len().saturating_sub(window));
        for value in out {
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn prop_volatility_is_scale_invariant(
        prices in positive_prices(150),
        window in 2usize..20,
        scale in 0.01..100.0f64,
    ) {
        let scaled: Vec<f64> = prices.iter().map(|p| p * scale).collect();
        let base = rolling_volatility(&prices, window).unwrap();
        let other = rolling_volatility(&scaled, window).unwrap();

        prop_assert_eq!(base.len(), prices.len().saturating_sub(window));
        prop_assert_eq!(base.len(), other.len());
        for (a, b) in base.iter().zip(&other) {
            prop_assert!(*a >= 0.0);
            prop_assert!((a - b).abs() <= 1e-9 * a.max(1.0));
        }
    }

    #[test]
    fn prop_conditional_sums_split_absolute_sum(data in series(300)) {
        let positive = vector_conditional_sum(&data, Sign::Positive);
        let negative = vector_conditional_sum(&data, Sign::Negative);
        let abs_sum: f64 = data.iter().map(|x| x.abs()).sum();

        prop_assert!(positive >= 0.0 && negative >= 0.0);
        prop_assert!(close(positive + negative, abs_sum, 1e-9));
        prop_assert!(close(positive - negative, vector_sum(&data), 1e-9));
    }

    #[test]
    fn prop_native_lanes_agree_with_scalar(data in series(300)) {
        prop_assert!(close(vector_sum(&data), core::sum::<f64>(&data), 1e-9));
        prop_assert!(close(vector_variance(&data), core::variance::<f64>(&data), 1e-9));
        prop_assert_eq!(vector_max(&data), core::max::<f64>(&data));
        prop_assert_eq!(vector_min(&data), core::min::<f64>(&data));
    }

    #[test]
    fn prop_online_variance_matches_two_pass(data in series(200), window in 1usize..25) {
        let out = rolling_variance(&data, window).unwrap();
        prop_assert_eq!(out.len(), (data.len() + 1).saturating_sub(window));
        // Error of the sliding update scales with the squared magnitude of the data
        let scale = data.iter().fold(1.0f64, |acc, x| acc.max(x * x));
        for (i, value) in out.iter().enumerate() {
            let expected = core::variance::<f64>(&data[i..i + window]);
            prop_assert!((value - expected).abs() <= 1e-9 * scale, "i={} {} vs {}", i, value, expected);
        }
    }
}

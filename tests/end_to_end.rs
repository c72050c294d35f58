use approx::assert_relative_eq;
use quantstream::prelude::*;

fn random_walk(len: usize) -> Vec<f64> {
    let mut price = 100.0;
    (0..len)
        .map(|i| {
            let shock = ((i as f64 * 12.9898).sin() * 43_758.545_3).fract() - 0.5;
            price *= (shock * 0.02).exp();
            price
        })
        .collect()
}

#[test]
fn test_sma_scenario() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    assert_eq!(sma(&data, 3).unwrap(), vec![2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_ema_scenario() {
    let data = [10.0, 11.0, 12.0, 11.0, 10.0, 11.0, 12.0, 13.0];
    let expected = [10.0, 10.5, 11.25, 11.125, 10.5625, 10.78125, 11.390625, 12.1953125];
    let out = ema_with_smoothing(&data, 0.5).unwrap();

    assert_eq!(out.len(), expected.len());
    for (got, want) in out.iter().zip(expected) {
        assert_relative_eq!(*got, want, epsilon = 1e-12);
    }
}

#[test]
fn test_moment_scenario() {
    let data: Vec<f64> = (1..=10).map(f64::from).collect();
    assert_eq!(vector_sum(&data), 55.0);
    assert_eq!(vector_mean(&data), 5.5);
    assert_relative_eq!(vector_variance(&data), 8.25, epsilon = 1e-12);
    assert_relative_eq!(vector_stddev(&data), 8.25_f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn test_rsi_scenario() {
    let prices: Vec<f64> = (0..15).map(|i| 44.0 + i as f64 * 0.25).collect();
    let out = rsi(&prices, 14).unwrap();
    assert_eq!(out, vec![100.0]);
}

#[test]
fn test_volatility_error_scenario() {
    let prices = random_walk(30);

    let err = rolling_volatility(&prices, 0).unwrap_err();
    assert!(matches!(err, StatsError::InvalidWindow { .. }));
    assert!(!err.is_domain_error());

    let mut bad = prices.clone();
    bad[7] = 0.0;
    let err = rolling_volatility(&bad, 5).unwrap_err();
    assert_eq!(err, StatsError::NonPositivePrice { index: 7, price: 0.0 });
    assert!(err.is_domain_error());

    bad[7] = -3.0;
    assert!(rolling_volatility(&bad, 5).unwrap_err().is_domain_error());
}

#[test]
fn test_blocked_and_direct_agree_around_threshold() {
    let prices = random_walk(3_000);

    for window in [999, 1000, 1001, 1002] {
        let direct = rolling_volatility_with(&prices, window, &BlockingPolicy::never()).unwrap();
        let blocked = rolling_volatility_with(&prices, window, &BlockingPolicy::always()).unwrap();
        let default = rolling_volatility(&prices, window).unwrap();

        assert_eq!(direct.len(), prices.len() - window);
        assert_eq!(blocked.len(), direct.len());
        for ((d, b), x) in direct.iter().zip(&blocked).zip(&default) {
            assert_relative_eq!(*d, *b, max_relative = 1e-9);
            assert_relative_eq!(*d, *x, max_relative = 1e-9);
        }
    }
}

#[test]
fn test_streaming_volatility_agrees() {
    let prices = random_walk(2_000);
    let default = rolling_volatility(&prices, 60).unwrap();
    let streamed = rolling_volatility_streaming(&prices, 60).unwrap();

    assert_eq!(streamed.len(), default.len());
    for (s, d) in streamed.iter().zip(&default) {
        assert_relative_eq!(*s, *d, max_relative = 1e-9);
    }
}

#[test]
fn test_sma_blocked_seed() {
    // Window above the threshold seeds through the blocked traversal
    let data: Vec<f64> = (0..3_000).map(|i| (i % 17) as f64).collect();
    let window = 1_500;
    let out = sma(&data, window).unwrap();

    assert_eq!(out.len(), data.len() - window + 1);
    for (i, value) in out.iter().enumerate().step_by(137) {
        let expected = data[i..i + window].iter().sum::<f64>() / window as f64;
        assert_relative_eq!(*value, expected, epsilon = 1e-9);
    }
}

#[test]
fn test_inputs_are_not_mutated() {
    let prices = random_walk(256);
    let snapshot = prices.clone();

    let _ = sma(&prices, 10).unwrap();
    let _ = ema(&prices, 10).unwrap();
    let _ = rsi(&prices, 14).unwrap();
    let _ = rolling_volatility(&prices, 20).unwrap();
    let _ = rolling_stddev(&prices, 20).unwrap();

    assert_eq!(prices, snapshot);
}

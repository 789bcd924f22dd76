//! Net Present Value of a periodic cash-flow series

/// Net Present Value of `cashflows` at a periodic `rate`.
///
/// Flow `i` is discounted by `(1 + rate)^i`, so index 0 is taken at face value.
/// Non-finite rates or flows propagate into the result.
pub fn npv(rate: f64, cashflows: &[f64]) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// NPV and its derivative with respect to rate
pub(crate) fn npv_and_derivative(rate: f64, cashflows: &[f64]) -> (f64, f64) {
    let mut value = 0.0;
    let mut derivative = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        value += cf / discount;
        if t > 0 {
            derivative -= (t as f64) * cf / (discount * (1.0 + rate));
        }
    }

    (value, derivative)
}

/// Discount factor for `period` periods at `rate`
pub fn discount_factor(rate: f64, period: usize) -> f64 {
    1.0 / (1.0 + rate).powi(period as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_rate_is_plain_sum() {
        let flows = [-1000.0, 250.0, 400.0, 125.5, 900.0];
        assert_abs_diff_eq!(npv(0.0, &flows), flows.iter().sum::<f64>(), epsilon = 1e-12);
    }

    #[test]
    fn test_single_period() {
        let rate = 0.07;
        assert_abs_diff_eq!(
            npv(rate, &[-500.0, 700.0]),
            -500.0 + 700.0 / (1.0 + rate),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_scenarios() {
        assert_abs_diff_eq!(npv(0.10, &[-1000.0, 1200.0]), 90.909090, epsilon = 1e-5);
        assert_abs_diff_eq!(npv(0.10, &[-1000.0, 600.0, 600.0]), 41.322314, epsilon = 1e-5);
    }

    #[test]
    fn test_strictly_decreasing_in_rate() {
        let flows = [-1000.0, 300.0, 400.0, 500.0];
        let rates: Vec<f64> = (0..40).map(|i| -0.5 + i as f64 * 0.05).collect();
        for pair in rates.windows(2) {
            assert!(npv(pair[1], &flows) < npv(pair[0], &flows));
        }
    }

    #[test]
    fn test_initial_flow_undiscounted() {
        assert_abs_diff_eq!(npv(0.5, &[-250.0]), -250.0);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(npv(f64::NAN, &[-1.0, 2.0]).is_nan());
        assert!(npv(0.1, &[-1.0, f64::NAN]).is_nan());
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let flows = [-1000.0, 300.0, 400.0, 500.0];
        let rate = 0.08;
        let h = 1e-6;
        let (_, analytic) = npv_and_derivative(rate, &flows);
        let numeric = (npv(rate + h, &flows) - npv(rate - h, &flows)) / (2.0 * h);
        assert_abs_diff_eq!(analytic, numeric, epsilon = 1e-3);
    }

    #[test]
    fn test_discount_factor() {
        assert_abs_diff_eq!(discount_factor(0.06, 0), 1.0);
        assert_abs_diff_eq!(discount_factor(0.06, 2), 1.0 / 1.1236, epsilon = 1e-12);
    }
}

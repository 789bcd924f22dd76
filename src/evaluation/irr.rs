//! Internal Rate of Return (IRR) calculation
//!
//! Finds the discount rate at which the NPV of a cash-flow series is zero.

use super::npv::{npv, npv_and_derivative};

/// Starting guess for Newton-Raphson (10% per period)
const INITIAL_GUESS: f64 = 0.10;
/// Newton search window, keeps `1 + rate` away from zero
const MIN_RATE: f64 = -0.99;
const MAX_RATE: f64 = 10.0;
/// Widest upper bracket tried for a conventional series
const MAX_EXPANDED_RATE: f64 = 1e6;
/// Closest approach to -100% tried for a conventional series
const MIN_EXPANDED_GAP: f64 = 1e-12;
const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;

/// Calculate the Internal Rate of Return for a series of periodic cash flows.
///
/// Index 0 is the initial flow (undiscounted), index `t` is discounted `t` periods.
///
/// # Returns
/// The periodic IRR as a fraction (0.05 for 5%), or NaN when the IRR is undefined:
/// * the series has no sign change (exact zeros ignored), which covers
///   all-zero, all-inflow and all-outflow series
/// * no root can be bracketed: a series with one sign change is searched
///   from just above -100% up to 1e8%, other series within (-99%, 1000%)
///
/// With more than one sign change several roots may exist; the first root the
/// solver converges to from a 10% guess is returned.
pub fn irr(cashflows: &[f64]) -> f64 {
    calculate_irr(cashflows).unwrap_or(f64::NAN)
}

/// Same as [`irr`] but reports an undefined IRR as `None`
pub fn calculate_irr(cashflows: &[f64]) -> Option<f64> {
    if cashflows.is_empty() || cashflows.iter().any(|cf| !cf.is_finite()) {
        return None;
    }

    let changes = sign_changes(cashflows);
    if changes == 0 {
        log::debug!("IRR undefined: cash flows have no sign change");
        return None;
    }
    if changes > 1 {
        log::debug!(
            "Non-conventional cash flows ({} sign changes), IRR may not be unique",
            changes
        );
    }
    let conventional = changes == 1;

    let mut rate = INITIAL_GUESS;

    for _ in 0..MAX_ITERATIONS {
        let (value, derivative) = npv_and_derivative(rate, cashflows);

        if derivative.abs() < 1e-20 || !derivative.is_finite() {
            // Flat or blown-up derivative, Newton can't make progress
            return calculate_irr_bisection(cashflows, conventional);
        }

        let new_rate = (rate - value / derivative).clamp(MIN_RATE, MAX_RATE);

        if (new_rate - rate).abs() < TOLERANCE {
            if new_rate <= MIN_RATE || new_rate >= MAX_RATE {
                // Pinned at the window edge, the root (if any) lies outside
                return calculate_irr_bisection(cashflows, conventional);
            }
            return Some(new_rate);
        }

        rate = new_rate;
    }

    // Newton-Raphson didn't converge, try bisection
    calculate_irr_bisection(cashflows, conventional)
}

/// Fallback IRR calculation using bisection over a bracketed root
fn calculate_irr_bisection(cashflows: &[f64], conventional: bool) -> Option<f64> {
    let (mut low, mut high) = bracket_root(cashflows, conventional)?;
    let mut npv_low = npv(low, cashflows);
    let mut npv_high = npv(high, cashflows);

    for _ in 0..MAX_ITERATIONS {
        let mid = low + (high - low) / 2.0;
        if mid <= low || mid >= high {
            // Interval can't shrink any further
            break;
        }

        let npv_mid = npv(mid, cashflows);
        if npv_mid.abs() < TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
            npv_high = npv_mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    if npv_low.abs() <= npv_high.abs() {
        Some(low)
    } else {
        Some(high)
    }
}

/// Find rates with opposite NPV signs.
///
/// The Newton window is tried first. A conventional series has exactly one
/// root, so the bracket is widened upward (doubling) and toward -100%
/// (dividing the gap by ten) until the sign flips.
fn bracket_root(cashflows: &[f64], conventional: bool) -> Option<(f64, f64)> {
    let npv_min = npv(MIN_RATE, cashflows);
    let npv_max = npv(MAX_RATE, cashflows);

    if npv_min * npv_max <= 0.0 {
        return Some((MIN_RATE, MAX_RATE));
    }
    if !conventional {
        return None;
    }

    let mut low = MAX_RATE;
    let mut high = MAX_RATE * 2.0;
    while high <= MAX_EXPANDED_RATE {
        if npv(high, cashflows) * npv_max <= 0.0 {
            return Some((low, high));
        }
        low = high;
        high *= 2.0;
    }

    let mut high = MIN_RATE;
    let mut gap = (1.0 + MIN_RATE) / 10.0;
    while gap >= MIN_EXPANDED_GAP {
        let low = -1.0 + gap;
        if npv(low, cashflows) * npv_min <= 0.0 {
            return Some((low, high));
        }
        high = low;
        gap /= 10.0;
    }

    log::debug!("IRR undefined: no root between -100% and {}", MAX_EXPANDED_RATE);
    None
}

/// Count sign changes between consecutive non-zero flows
pub fn sign_changes(cashflows: &[f64]) -> usize {
    let signs: Vec<bool> = cashflows
        .iter()
        .filter(|cf| **cf != 0.0)
        .map(|cf| cf.is_sign_positive())
        .collect();

    signs.windows(2).filter(|pair| pair[0] != pair[1]).count()
}

//! Evaluation output for one calculate action

use serde::{Deserialize, Serialize};

use super::cashflows::CashFlowSeries;
use super::error::EvaluationError;
use super::irr::irr;
use super::npv::npv;

/// NPV and IRR of a project at a given discount rate.
///
/// `investment` is stored as the signed initial flow, i.e. negative for an outlay.
/// `flows` holds periods 1..N only. A NaN `irr` (undefined) serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub investment: f64,
    pub discount_rate: f64,
    pub flows: Vec<f64>,
    pub npv: f64,
    #[serde(deserialize_with = "deserialize_nullable_rate")]
    pub irr: f64,
}

fn deserialize_nullable_rate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.unwrap_or(f64::NAN))
}

impl EvaluationResult {
    /// Evaluate a series at `discount_rate` (a fraction, must be > -1)
    pub fn from_series(series: &CashFlowSeries, discount_rate: f64) -> Result<Self, EvaluationError> {
        if !discount_rate.is_finite() {
            return Err(EvaluationError::NonFinite {
                field: "discount rate",
                value: discount_rate,
            });
        }
        if discount_rate <= -1.0 {
            return Err(EvaluationError::InvalidRate(discount_rate));
        }
        if let Some(value) = series.first_non_finite() {
            return Err(EvaluationError::NonFinite {
                field: "cash flow",
                value,
            });
        }

        let flows = series.as_slice();

        Ok(Self {
            investment: series.initial(),
            discount_rate,
            flows: series.periods().to_vec(),
            npv: npv(discount_rate, flows),
            irr: irr(flows),
        })
    }

    /// Rebuild the full series, initial flow first
    pub fn series(&self) -> CashFlowSeries {
        CashFlowSeries::from_investment(-self.investment, &self.flows)
    }

    /// Positive NPV: the project adds value at this discount rate
    pub fn npv_accepted(&self) -> bool {
        self.npv > 0.0
    }

    /// IRR beats the discount rate. An undefined IRR never does.
    pub fn irr_accepted(&self) -> bool {
        self.irr > self.discount_rate
    }

    /// Cumulative return on investment after each period, as a fraction.
    ///
    /// Period `i` is `sum(flows[1..=i]) / -investment`. The stored investment is
    /// the negative outlay, so this divides by the positive investment amount.
    /// Returns `None` for a zero investment, where the ratio is undefined.
    pub fn roi_series(&self) -> Option<Vec<f64>> {
        if self.investment == 0.0 {
            return None;
        }

        let denominator = -self.investment;
        let mut cumulative = 0.0;
        Some(
            self.flows
                .iter()
                .map(|cf| {
                    cumulative += cf;
                    cumulative / denominator
                })
                .collect(),
        )
    }
}

/// Evaluate a project from an investment entered as a positive amount,
/// a discount rate fraction and the per-period flows
pub fn evaluate(
    investment: f64,
    discount_rate: f64,
    period_flows: &[f64],
) -> Result<EvaluationResult, EvaluationError> {
    if !investment.is_finite() {
        return Err(EvaluationError::NonFinite {
            field: "investment",
            value: investment,
        });
    }

    let series = CashFlowSeries::from_investment(investment, period_flows);
    let result = EvaluationResult::from_series(&series, discount_rate)?;

    log::info!(
        "Evaluated {} periods at {:.4}: npv={:.2} irr={:.6}",
        series.horizon(),
        discount_rate,
        result.npv,
        result.irr
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_scenario_single_year() {
        let result = evaluate(1000.0, 0.10, &[1200.0]).unwrap();
        assert_eq!(result.investment, -1000.0);
        assert_eq!(result.flows, vec![1200.0]);
        assert_abs_diff_eq!(result.npv, 90.91, epsilon = 0.005);
        assert_abs_diff_eq!(result.irr, 0.20, epsilon = 1e-9);
        assert!(result.npv_accepted());
        assert!(result.irr_accepted());
    }

    #[test]
    fn test_scenario_two_years() {
        let result = evaluate(1000.0, 0.10, &[600.0, 600.0]).unwrap();
        assert_abs_diff_eq!(result.npv, 41.32, epsilon = 0.005);
        assert_abs_diff_eq!(result.irr, 0.1307, epsilon = 0.00005);
        assert_abs_diff_eq!(npv(result.irr, result.series().as_slice()), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rejected_project() {
        let result = evaluate(1000.0, 0.25, &[600.0, 600.0]).unwrap();
        assert!(result.npv < 0.0);
        assert!(!result.npv_accepted());
        assert!(!result.irr_accepted());
    }

    #[test]
    fn test_undefined_irr_not_accepted() {
        let result = evaluate(0.0, 0.10, &[100.0, 100.0]).unwrap();
        assert!(result.irr.is_nan());
        assert!(!result.irr_accepted());
        assert!(result.npv_accepted());
    }

    #[test]
    fn test_invalid_rate() {
        assert_eq!(
            evaluate(1000.0, -1.0, &[1200.0]),
            Err(EvaluationError::InvalidRate(-1.0))
        );
        assert!(matches!(
            evaluate(1000.0, f64::NAN, &[1200.0]),
            Err(EvaluationError::NonFinite { field: "discount rate", .. })
        ));
    }

    #[test]
    fn test_non_finite_inputs() {
        assert!(matches!(
            evaluate(f64::INFINITY, 0.1, &[1.0]),
            Err(EvaluationError::NonFinite { field: "investment", .. })
        ));
        assert!(matches!(
            evaluate(1.0, 0.1, &[f64::NEG_INFINITY]),
            Err(EvaluationError::NonFinite { field: "cash flow", .. })
        ));
    }

    #[test]
    fn test_roi_divides_by_investment_magnitude() {
        let result = evaluate(1000.0, 0.10, &[600.0, 600.0, 300.0]).unwrap();
        let roi = result.roi_series().unwrap();
        assert_eq!(roi.len(), 3);
        assert_abs_diff_eq!(roi[0], 0.6);
        assert_abs_diff_eq!(roi[1], 1.2);
        assert_abs_diff_eq!(roi[2], 1.5);
    }

    #[test]
    fn test_roi_undefined_for_zero_investment() {
        let result = evaluate(0.0, 0.10, &[500.0, 700.0]).unwrap();
        assert_eq!(result.roi_series(), None);
    }

    #[test]
    fn test_nan_irr_serializes_as_null() {
        let result = evaluate(0.0, 0.10, &[500.0]).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["irr"].is_null());

        let back: EvaluationResult = serde_json::from_value(json).unwrap();
        assert!(back.irr.is_nan());
        assert_eq!(back.flows, vec![500.0]);
    }
}

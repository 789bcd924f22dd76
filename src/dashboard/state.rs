//! Dashboard session state and its transitions
//!
//! Transitions never mutate in place: each returns the next state, which the
//! server swaps in whole. The stored result is shared behind an `Arc` so the
//! two chart builders read the same value.

use std::sync::Arc;

use crate::evaluation::{evaluate, EvaluationResult};
use super::inputs::{CalculateInputs, MAX_YEARS};

/// Cost of capital shown before the user edits it (percent)
pub const DEFAULT_COST_OF_CAPITAL_PCT: f64 = 10.0;

/// State of the single dashboard session
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// Number of cash-flow fields shown
    pub years: u32,

    /// Investment as last entered (blank = `None`)
    pub investment: Option<f64>,

    /// Cost of capital in percent as last entered
    pub cost_of_capital_pct: Option<f64>,

    /// One value per year, `flows.len() == years`
    pub flows: Vec<f64>,

    /// Most recent successful evaluation
    pub last_result: Option<Arc<EvaluationResult>>,

    /// Why the most recent calculate action failed, cleared on success
    pub last_error: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            years: 1,
            investment: None,
            cost_of_capital_pct: Some(DEFAULT_COST_OF_CAPITAL_PCT),
            flows: vec![0.0],
            last_result: None,
            last_error: None,
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_result(&self) -> bool {
        self.last_result.is_some()
    }

    /// Years input changed.
    ///
    /// `None` (or 0) means nothing was entered yet and the state is returned as is.
    /// Otherwise exactly `years` flow fields are produced, all reset to zero:
    /// previously entered flows are discarded even for years still in range.
    pub fn on_years_changed(&self, years: Option<u32>) -> Self {
        let years = match years {
            Some(y) if y > 0 => y,
            _ => {
                log::debug!("Years not set, keeping {} flow fields", self.years);
                return self.clone();
            }
        };

        let years = if years > MAX_YEARS {
            log::warn!("Requested {} years, capping at {}", years, MAX_YEARS);
            MAX_YEARS
        } else {
            years
        };

        log::debug!("Regenerating {} flow fields", years);

        Self {
            years,
            flows: vec![0.0; years as usize],
            ..self.clone()
        }
    }

    /// Keep the investment and cost of capital as typed, without evaluating.
    ///
    /// The page posts the whole form when years change, so these values
    /// survive field regeneration.
    pub fn with_entries(&self, inputs: &CalculateInputs) -> Self {
        Self {
            investment: inputs.investment,
            cost_of_capital_pct: inputs.cost_of_capital_pct,
            ..self.clone()
        }
    }

    /// Calculate action.
    ///
    /// Blank investment and cost of capital count as zero, blank flows as zero,
    /// and a form without flow fields as `years` zeros. On success the result
    /// replaces the stored one; on failure the previous result is kept and the
    /// error message recorded.
    pub fn on_calculate(&self, inputs: &CalculateInputs) -> Self {
        let years = inputs.years.filter(|y| *y > 0).unwrap_or(self.years);
        let flows = inputs.flows_or_zero(years);

        let mut next = Self {
            years: flows.len() as u32,
            investment: inputs.investment,
            cost_of_capital_pct: inputs.cost_of_capital_pct,
            flows,
            ..self.clone()
        };

        match evaluate(inputs.investment_or_zero(), inputs.discount_rate(), &next.flows) {
            Ok(result) => {
                next.last_result = Some(Arc::new(result));
                next.last_error = None;
            }
            Err(e) => {
                log::warn!("Calculation rejected: {}", e);
                next.last_error = Some(e.to_string());
            }
        }

        next
    }
}

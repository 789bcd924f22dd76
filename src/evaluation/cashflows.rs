//! Cash-flow series for a single project

use serde::{Deserialize, Serialize};

use super::error::EvaluationError;

/// Ordered project cash flows.
///
/// Index 0 is the initial flow (the outlay, conventionally negative),
/// indices 1..N are the flows of each subsequent period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CashFlowSeries {
    flows: Vec<f64>,
}

impl CashFlowSeries {
    /// Wrap raw flows, rejecting an empty series
    pub fn new(flows: Vec<f64>) -> Result<Self, EvaluationError> {
        if flows.is_empty() {
            return Err(EvaluationError::EmptySeries);
        }
        Ok(Self { flows })
    }

    /// Build `[-investment, flows...]` from an investment amount entered as a
    /// positive number and the per-period flows
    pub fn from_investment(investment: f64, period_flows: &[f64]) -> Self {
        let mut flows = Vec::with_capacity(period_flows.len() + 1);
        flows.push(-investment);
        flows.extend_from_slice(period_flows);
        Self { flows }
    }

    /// All flows, initial flow first
    pub fn as_slice(&self) -> &[f64] {
        &self.flows
    }

    /// Initial flow (index 0)
    pub fn initial(&self) -> f64 {
        self.flows[0]
    }

    /// Flows of periods 1..N
    pub fn periods(&self) -> &[f64] {
        &self.flows[1..]
    }

    /// Number of periods after the initial flow
    pub fn horizon(&self) -> usize {
        self.flows.len() - 1
    }

    /// First non-finite flow, if any
    pub fn first_non_finite(&self) -> Option<f64> {
        self.flows.iter().copied().find(|cf| !cf.is_finite())
    }
}

impl TryFrom<Vec<f64>> for CashFlowSeries {
    type Error = EvaluationError;

    fn try_from(flows: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(flows)
    }
}

impl From<CashFlowSeries> for Vec<f64> {
    fn from(series: CashFlowSeries) -> Self {
        series.flows
    }
}

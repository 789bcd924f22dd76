//! Pure projection from dashboard state to what the page shows

use super::charts::{cash_flow_chart, roi_chart, Figure};
use super::state::DashboardState;
use crate::evaluation::EvaluationResult;

/// Colour of a result statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Nothing calculated yet
    Info,
    Success,
    Danger,
}

impl Indicator {
    fn from_accepted(accepted: bool) -> Self {
        if accepted {
            Indicator::Success
        } else {
            Indicator::Danger
        }
    }

    /// CSS class suffix
    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::Info => "info",
            Indicator::Success => "success",
            Indicator::Danger => "danger",
        }
    }
}

/// A statement with its indicator
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub indicator: Indicator,
}

/// Form fields as they should be re-rendered
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub investment: Option<f64>,
    pub years: u32,
    pub cost_of_capital_pct: Option<f64>,
    pub flows: Vec<f64>,
}

/// Everything the page renders for one state
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub form: FormView,
    pub npv_alert: Alert,
    pub irr_alert: Alert,
    pub cash_flow_chart: Option<Figure>,
    pub roi_chart: Option<Figure>,
    pub error: Option<String>,
    /// State dump shown in debug mode
    pub debug_dump: Option<String>,
}

impl DashboardView {
    pub fn from_state(state: &DashboardState, debug: bool) -> Self {
        let result = state.last_result.as_deref();

        let (npv_alert, irr_alert) = match result {
            Some(result) => (npv_alert(result), irr_alert(result)),
            None => (Alert::empty(), Alert::empty()),
        };

        Self {
            form: FormView {
                investment: state.investment,
                years: state.years,
                cost_of_capital_pct: state.cost_of_capital_pct,
                flows: state.flows.clone(),
            },
            npv_alert,
            irr_alert,
            cash_flow_chart: result.map(cash_flow_chart),
            roi_chart: result.map(roi_chart),
            error: state.last_error.clone(),
            debug_dump: debug.then(|| format!("{:#?}", state)),
        }
    }
}

impl Alert {
    fn empty() -> Self {
        Self {
            message: String::new(),
            indicator: Indicator::Info,
        }
    }
}

/// NPV statement, green when the NPV is positive
pub fn npv_alert(result: &EvaluationResult) -> Alert {
    Alert {
        message: format!("Project NPV: {:.2}", result.npv),
        indicator: Indicator::from_accepted(result.npv_accepted()),
    }
}

/// IRR statement, green when the IRR beats the cost of capital
pub fn irr_alert(result: &EvaluationResult) -> Alert {
    Alert {
        message: format!("Project IRR: {}", format_percent(result.irr)),
        indicator: Indicator::from_accepted(result.irr_accepted()),
    }
}

/// Fraction as a two-decimal percentage; an undefined rate reads "nan%"
pub fn format_percent(rate: f64) -> String {
    if rate.is_nan() {
        "nan%".to_string()
    } else {
        format!("{:.2}%", rate * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::inputs::CalculateInputs;

    fn calculated(investment: f64, cost_pct: f64, flows: &[f64]) -> DashboardState {
        DashboardState::new().on_calculate(&CalculateInputs {
            investment: Some(investment),
            cost_of_capital_pct: Some(cost_pct),
            years: Some(flows.len() as u32),
            flows: flows.iter().map(|cf| Some(*cf)).collect(),
        })
    }

    #[test]
    fn test_empty_state_view() {
        let view = DashboardView::from_state(&DashboardState::new(), false);
        assert_eq!(view.npv_alert.indicator, Indicator::Info);
        assert!(view.npv_alert.message.is_empty());
        assert!(view.cash_flow_chart.is_none());
        assert!(view.roi_chart.is_none());
        assert!(view.debug_dump.is_none());
        assert_eq!(view.form.flows, vec![0.0]);
    }

    #[test]
    fn test_single_year_statements() {
        let view = DashboardView::from_state(&calculated(1000.0, 10.0, &[1200.0]), false);
        assert_eq!(view.npv_alert.message, "Project NPV: 90.91");
        assert_eq!(view.npv_alert.indicator, Indicator::Success);
        assert_eq!(view.irr_alert.message, "Project IRR: 20.00%");
        assert_eq!(view.irr_alert.indicator, Indicator::Success);
    }

    #[test]
    fn test_two_year_statements() {
        let view = DashboardView::from_state(&calculated(1000.0, 10.0, &[600.0, 600.0]), false);
        assert_eq!(view.npv_alert.message, "Project NPV: 41.32");
        assert_eq!(view.irr_alert.message, "Project IRR: 13.07%");
        assert!(view.cash_flow_chart.is_some());
        assert!(view.roi_chart.is_some());
    }

    #[test]
    fn test_irr_below_cost_of_capital_is_danger() {
        let view = DashboardView::from_state(&calculated(1000.0, 15.0, &[600.0, 600.0]), false);
        assert_eq!(view.irr_alert.indicator, Indicator::Danger);
        assert_eq!(view.npv_alert.indicator, Indicator::Danger);
    }

    #[test]
    fn test_undefined_irr_shows_nan() {
        let view = DashboardView::from_state(&calculated(0.0, 10.0, &[100.0]), false);
        assert_eq!(view.irr_alert.message, "Project IRR: nan%");
        assert_eq!(view.irr_alert.indicator, Indicator::Danger);
    }

    #[test]
    fn test_debug_dump() {
        let view = DashboardView::from_state(&DashboardState::new(), true);
        assert!(view.debug_dump.unwrap().contains("DashboardState"));
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.130662), "13.07%");
        assert_eq!(format_percent(-0.05), "-5.00%");
        assert_eq!(format_percent(f64::NAN), "nan%");
    }
}

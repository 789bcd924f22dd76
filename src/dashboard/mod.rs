//! Interactive dashboard: session state, transitions and rendering
//!
//! The page is a pure function of [`DashboardState`]:
//! 1. A request applies one transition (`on_years_changed` or `on_calculate`)
//! 2. [`DashboardView::from_state`] projects the new state
//! 3. [`render_page`] turns the view into HTML, charts included as Plotly figures

pub mod charts;
pub mod html;
pub mod inputs;
mod state;
mod view;

pub use charts::{cash_flow_chart, roi_chart, Figure};
pub use html::render_page;
pub use inputs::{CalculateInputs, MAX_YEARS};
pub use state::{DashboardState, DEFAULT_COST_OF_CAPITAL_PCT};
pub use view::{format_percent, irr_alert, npv_alert, Alert, DashboardView, FormView, Indicator};

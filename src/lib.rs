//! Project Evaluation - NPV/IRR dashboard for capital budgeting decisions
//!
//! This library provides:
//! - Net present value and internal rate of return over a cash-flow series
//! - Cumulative ROI per period
//! - A dashboard session state machine with server-side rendering and charts
//! - An HTTP server hosting the dashboard and a small JSON API
//! - A CSV loader for cash-flow series

pub mod dashboard;
pub mod evaluation;
pub mod loader;
pub mod server;

/// Crate version reported by the health endpoint
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used types
pub use dashboard::{DashboardState, DashboardView};
pub use evaluation::{evaluate, irr, npv, CashFlowSeries, EvaluationError, EvaluationResult};
pub use loader::{load_cashflows, LoadError};
pub use server::{Server, ServerConfig};

//! Errors raised while building or evaluating a cash-flow series

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("Cash-flow series must contain at least the initial flow")]
    EmptySeries,

    #[error("Discount rate must be greater than -100%, got {0}")]
    InvalidRate(f64),

    #[error("Non-finite {field} value: {value}")]
    NonFinite { field: &'static str, value: f64 },
}

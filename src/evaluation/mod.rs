//! NPV/IRR evaluation of project cash flows

mod cashflows;
mod error;
mod irr;
mod npv;
mod result;

pub use cashflows::CashFlowSeries;
pub use error::EvaluationError;
pub use irr::{calculate_irr, irr, sign_changes};
pub use npv::{discount_factor, npv};
pub use result::{evaluate, EvaluationResult};

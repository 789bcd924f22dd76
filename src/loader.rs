//! Load a cash-flow series from a `period,amount` CSV file
//!
//! Period 0 is the signed initial outlay; periods 1..N follow in any order
//! but must be contiguous.

use std::io::Read;
use std::path::Path;

use csv::Reader;
use thiserror::Error;

use crate::evaluation::{CashFlowSeries, EvaluationError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing cash flow for period {0}")]
    MissingPeriod(usize),

    #[error("Duplicate cash flow for period {0}")]
    DuplicatePeriod(usize),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    period: usize,
    amount: f64,
}

/// Load a series from a CSV file
pub fn load_cashflows<P: AsRef<Path>>(path: P) -> Result<CashFlowSeries, LoadError> {
    let reader = Reader::from_path(path)?;
    read_series(reader)
}

/// Load a series from any CSV source
pub fn load_cashflows_from_reader<R: Read>(source: R) -> Result<CashFlowSeries, LoadError> {
    read_series(Reader::from_reader(source))
}

fn read_series<R: Read>(mut reader: Reader<R>) -> Result<CashFlowSeries, LoadError> {
    let mut rows: Vec<CsvRow> = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }

    rows.sort_by_key(|row| row.period);

    let mut flows = Vec::with_capacity(rows.len());
    for (expected, row) in rows.iter().enumerate() {
        if row.period < expected {
            return Err(LoadError::DuplicatePeriod(row.period));
        }
        if row.period > expected {
            return Err(LoadError::MissingPeriod(expected));
        }
        flows.push(row.amount);
    }

    log::debug!("Loaded {} cash flow periods", flows.len());
    Ok(CashFlowSeries::new(flows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_series() {
        let data = "period,amount\n0,-1000\n1,600\n2,600\n";
        let series = load_cashflows_from_reader(data.as_bytes()).unwrap();
        assert_eq!(series.as_slice(), &[-1000.0, 600.0, 600.0]);
        assert_eq!(series.initial(), -1000.0);
        assert_eq!(series.horizon(), 2);
    }

    #[test]
    fn test_rows_out_of_order() {
        let data = "period,amount\n2,700\n0,-1000\n1,500\n";
        let series = load_cashflows_from_reader(data.as_bytes()).unwrap();
        assert_eq!(series.as_slice(), &[-1000.0, 500.0, 700.0]);
    }

    #[test]
    fn test_gap_rejected() {
        let data = "period,amount\n0,-1000\n2,600\n";
        let err = load_cashflows_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingPeriod(1)));
    }

    #[test]
    fn test_missing_outlay_rejected() {
        let data = "period,amount\n1,600\n";
        let err = load_cashflows_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingPeriod(0)));
    }

    #[test]
    fn test_duplicate_rejected() {
        let data = "period,amount\n0,-1000\n1,600\n1,650\n";
        let err = load_cashflows_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicatePeriod(1)));
    }

    #[test]
    fn test_empty_file() {
        let err = load_cashflows_from_reader("period,amount\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Evaluation(EvaluationError::EmptySeries)));
    }

    #[test]
    fn test_bad_amount() {
        let data = "period,amount\n0,lots\n";
        assert!(matches!(
            load_cashflows_from_reader(data.as_bytes()),
            Err(LoadError::Csv(_))
        ));
    }
}

//! Evaluate a cash-flow series from the command line
//!
//! Flows come either from `--flows` (periods 1..N, with `--investment` as the
//! outlay) or from a `period,amount` CSV file where period 0 is the signed
//! initial flow. Prints a present-value table with NPV and IRR, or the full
//! result as JSON with `--json`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;
use env_logger::Env;
use serde::Serialize;

use project_evaluation::dashboard::format_percent;
use project_evaluation::evaluation::{discount_factor, evaluate, EvaluationResult};
use project_evaluation::loader::load_cashflows;

#[derive(Parser, Debug)]
#[command(name = "evaluate_flows", version, about = "Evaluate NPV/IRR of a cash-flow series")]
struct Args {
    /// Initial investment as a positive amount
    #[arg(long, default_value_t = 0.0, conflicts_with = "file")]
    investment: f64,

    /// Comma-separated flows of periods 1..N
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    flows: Vec<f64>,

    /// CSV file with a `period,amount` header
    #[arg(long, conflicts_with = "flows")]
    file: Option<PathBuf>,

    /// Cost of capital in percent
    #[arg(long, default_value_t = 10.0)]
    rate_pct: f64,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct EvaluationOutput {
    result: EvaluationResult,
    roi: Option<Vec<f64>>,
    npv_accepted: bool,
    irr_accepted: bool,
    execution_time_ms: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let start = Instant::now();

    let (investment, flows) = resolve_flows(&args)?;

    let result = evaluate(investment, args.rate_pct / 100.0, &flows)
        .context("Evaluation failed")?;

    if args.json {
        let output = EvaluationOutput {
            roi: result.roi_series(),
            npv_accepted: result.npv_accepted(),
            irr_accepted: result.irr_accepted(),
            execution_time_ms: start.elapsed().as_millis() as u64,
            result,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_table(&result);
    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}

/// Investment (positive) and period flows from either the CSV file or the flags
fn resolve_flows(args: &Args) -> anyhow::Result<(f64, Vec<f64>)> {
    match &args.file {
        Some(path) => {
            let series = load_cashflows(path)
                .with_context(|| format!("Failed to load cash flows from {}", path.display()))?;
            // Period 0 in the file is the signed outlay
            Ok((-series.initial(), series.periods().to_vec()))
        }
        None => {
            if args.flows.is_empty() {
                bail!("Provide cash flows with --flows or --file");
            }
            Ok((args.investment, args.flows.clone()))
        }
    }
}

fn print_table(result: &EvaluationResult) {
    let series = result.series();

    println!("Cost of capital: {}", format_percent(result.discount_rate));
    println!();
    println!("{:>6} {:>14} {:>10} {:>14}", "Period", "Cash Flow", "DF", "PV");
    println!("{}", "-".repeat(47));

    for (period, cf) in series.as_slice().iter().enumerate() {
        let df = discount_factor(result.discount_rate, period);
        println!("{:>6} {:>14.2} {:>10.6} {:>14.2}", period, cf, df, cf * df);
    }

    println!("{}", "-".repeat(47));
    println!(
        "NPV: {:.2} ({})",
        result.npv,
        if result.npv_accepted() { "accept" } else { "reject" }
    );
    if result.irr.is_nan() {
        println!("IRR: {} (no solution found)", format_percent(result.irr));
    } else {
        println!(
            "IRR: {} ({} cost of capital)",
            format_percent(result.irr),
            if result.irr_accepted() { "above" } else { "not above" }
        );
    }

    if let Some(roi) = result.roi_series() {
        let last = roi.last().copied().unwrap_or(0.0);
        println!("Cumulative ROI: {}", format_percent(last));
    } else {
        println!("Cumulative ROI: undefined for a zero investment");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("evaluate_flows").chain(args.iter().copied()))
    }

    #[test]
    fn test_flags_input() {
        let args = parse(&["--investment", "1000", "--flows", "600,600"]).unwrap();
        let (investment, flows) = resolve_flows(&args).unwrap();
        assert_eq!(investment, 1000.0);
        assert_eq!(flows, vec![600.0, 600.0]);
        assert_eq!(args.rate_pct, 10.0);
    }

    #[test]
    fn test_negative_flows_accepted() {
        let args = parse(&["--investment", "1000", "--flows", "-200,1500"]).unwrap();
        let (_, flows) = resolve_flows(&args).unwrap();
        assert_eq!(flows, vec![-200.0, 1500.0]);
    }

    #[test]
    fn test_csv_outlay_becomes_investment() {
        let path = std::env::temp_dir().join(format!("evaluate_flows_{}.csv", std::process::id()));
        fs::write(&path, "period,amount\n0,-1000\n1,600\n2,600\n").unwrap();

        let args = parse(&["--file", path.to_str().unwrap()]).unwrap();
        let (investment, flows) = resolve_flows(&args).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(investment, 1000.0);
        assert_eq!(flows, vec![600.0, 600.0]);

        let result = evaluate(investment, args.rate_pct / 100.0, &flows).unwrap();
        assert_eq!(result.investment, -1000.0);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let args = parse(&["--file", "/nonexistent/flows.csv"]).unwrap();
        let err = resolve_flows(&args).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/flows.csv"));
    }

    #[test]
    fn test_no_flows_rejected() {
        let args = parse(&["--investment", "1000"]).unwrap();
        assert!(resolve_flows(&args).is_err());
    }

    #[test]
    fn test_flows_and_file_conflict() {
        assert!(parse(&["--flows", "1,2", "--file", "flows.csv"]).is_err());
        assert!(parse(&["--investment", "5", "--file", "flows.csv"]).is_err());
    }
}

//! Form inputs submitted by the dashboard page
//!
//! Every numeric field is optional. Blank fields and values that don't parse
//! come through as `None` and are later treated as zero.

use std::collections::HashMap;

/// Prefix of the per-year cash-flow field names (`flow_1`, `flow_2`, ...)
pub const FLOW_FIELD_PREFIX: &str = "flow_";

/// Longest horizon the form accepts
pub const MAX_YEARS: u32 = 100;

/// Values submitted with a calculate (or years-changed) action
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculateInputs {
    /// Initial investment, entered as a positive amount
    pub investment: Option<f64>,
    /// Cost of capital in percent (10 for 10%)
    pub cost_of_capital_pct: Option<f64>,
    pub years: Option<u32>,
    /// Flow fields in year order; a blank field is `None`
    pub flows: Vec<Option<f64>>,
}

impl CalculateInputs {
    /// Parse from raw url-encoded form pairs
    pub fn from_form(form: &HashMap<String, String>) -> Self {
        let investment = form.get("investment").and_then(|v| parse_amount("investment", v));
        let cost_of_capital_pct = form
            .get("cost_of_capital")
            .and_then(|v| parse_amount("cost_of_capital", v));
        let years = form.get("years").and_then(|v| parse_years(v));

        // Flow fields are numbered from 1; gaps read as blank
        let mut indexed: Vec<(usize, Option<f64>)> = form
            .iter()
            .filter_map(|(key, value)| {
                let index = key.strip_prefix(FLOW_FIELD_PREFIX)?.parse::<usize>().ok()?;
                (1..=MAX_YEARS as usize)
                    .contains(&index)
                    .then(|| (index, parse_amount(key, value)))
            })
            .collect();
        indexed.sort_by_key(|(index, _)| *index);

        let count = indexed.last().map(|(index, _)| *index).unwrap_or(0);
        let mut flows = vec![None; count];
        for (index, value) in indexed {
            flows[index - 1] = value;
        }

        Self {
            investment,
            cost_of_capital_pct,
            years,
            flows,
        }
    }

    /// Investment with a blank field read as zero
    pub fn investment_or_zero(&self) -> f64 {
        self.investment.unwrap_or(0.0)
    }

    /// Cost of capital as a fraction, blank read as zero
    pub fn discount_rate(&self) -> f64 {
        self.cost_of_capital_pct.unwrap_or(0.0) / 100.0
    }

    /// Flows with blanks read as zero. With no flow fields at all,
    /// `fallback_years` zeros.
    pub fn flows_or_zero(&self, fallback_years: u32) -> Vec<f64> {
        if self.flows.is_empty() {
            return vec![0.0; fallback_years as usize];
        }
        self.flows.iter().map(|cf| cf.unwrap_or(0.0)).collect()
    }
}

/// Name of the form field holding the flow for `year` (1-based)
pub fn flow_field_name(year: usize) -> String {
    format!("{}{}", FLOW_FIELD_PREFIX, year)
}

fn parse_amount(field: &str, raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring unparseable {} value {:?}", field, raw);
            None
        }
    }
}

/// Years must be a whole number; anything else means "not entered yet"
pub fn parse_years(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<u32>()
        .ok()
        .or_else(|| {
            // Number inputs may post "3.0"
            let value = trimmed.parse::<f64>().ok()?;
            (value.fract() == 0.0 && value >= 0.0 && value <= u32::MAX as f64).then(|| value as u32)
        })
}

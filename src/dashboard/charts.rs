//! Plotly figure definitions for the two dashboard charts
//!
//! Figures are plain serde structs; the page hands their JSON to plotly.js.

use serde::Serialize;

use crate::evaluation::EvaluationResult;

pub const CASH_FLOW_BAR_COLOR: &str = "#2E91E5";
pub const ROI_LINE_COLOR: &str = "#E91E63";

const FONT_FAMILY: &str = "Courier New, monospace";
const FONT_COLOR: &str = "#7f7f7f";
const FONT_SIZE: u32 = 12;
const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// A complete figure: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar {
        x: Vec<usize>,
        y: Vec<f64>,
        marker: Marker,
    },
    Scatter {
        x: Vec<usize>,
        y: Vec<f64>,
        mode: String,
        marker: Marker,
    },
}

impl Trace {
    pub fn y(&self) -> &[f64] {
        match self {
            Trace::Bar { y, .. } | Trace::Scatter { y, .. } => y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
    pub showgrid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickformat: Option<String>,
}

impl Axis {
    fn titled(text: &str) -> Self {
        Self {
            title: Title::new(text),
            showgrid: true,
            tickformat: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub family: String,
    pub size: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub plot_bgcolor: String,
    pub font: Font,
}

impl Layout {
    fn styled(title: String, xaxis: Axis, yaxis: Axis) -> Self {
        Self {
            title: Title::new(title),
            xaxis,
            yaxis,
            plot_bgcolor: TRANSPARENT.to_string(),
            font: Font {
                family: FONT_FAMILY.to_string(),
                size: FONT_SIZE,
                color: FONT_COLOR.to_string(),
            },
        }
    }
}

/// Periods 1..=n for the x axis
fn periods(n: usize) -> Vec<usize> {
    (1..=n).collect()
}

/// Bar chart of the projected flows of periods 1..N
pub fn cash_flow_chart(result: &EvaluationResult) -> Figure {
    Figure {
        data: vec![Trace::Bar {
            x: periods(result.flows.len()),
            y: result.flows.clone(),
            marker: Marker {
                color: CASH_FLOW_BAR_COLOR.to_string(),
            },
        }],
        layout: Layout::styled(
            "Projected Cash Flows".to_string(),
            Axis::titled("Year"),
            Axis::titled("Cash Flow"),
        ),
    }
}

/// Line chart of cumulative ROI, y axis formatted as percent.
///
/// A zero investment leaves ROI undefined: the trace is empty and the title says why.
pub fn roi_chart(result: &EvaluationResult) -> Figure {
    let base_title = "Return on Investment Over Time";

    let (x, y, title) = match result.roi_series() {
        Some(roi) => (periods(roi.len()), roi, base_title.to_string()),
        None => (
            Vec::new(),
            Vec::new(),
            format!("{}<br><sub>ROI undefined for a zero investment</sub>", base_title),
        ),
    };

    let mut yaxis = Axis::titled("ROI (%)");
    yaxis.tickformat = Some(".0%".to_string());

    Figure {
        data: vec![Trace::Scatter {
            x,
            y,
            mode: "lines+markers".to_string(),
            marker: Marker {
                color: ROI_LINE_COLOR.to_string(),
            },
        }],
        layout: Layout::styled(title, Axis::titled("Year"), yaxis),
    }
}

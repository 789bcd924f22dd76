//! HTML rendering of a [`DashboardView`]
//!
//! One form posts to `/years` (when the year count changes) or `/calculate`.
//! Charts are drawn by plotly.js from the serialized figures.

use std::fmt::Write;

use super::charts::Figure;
use super::inputs::{flow_field_name, MAX_YEARS};
use super::view::{Alert, DashboardView};

const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = "\
body{font-family:sans-serif;margin:2rem;}\
.row{display:flex;gap:2rem;flex-wrap:wrap;}\
.field{margin-bottom:.75rem;}\
.field label{display:block;}\
.alert{padding:.75rem 1rem;margin:.5rem 0;border-radius:4px;min-height:1.2em;}\
.alert-info{background:#d9edf7;}\
.alert-success{background:#dff0d8;}\
.alert-danger{background:#f2dede;}\
.chart{width:100%;height:420px;}";

/// Render the whole page
pub fn render_page(view: &DashboardView) -> String {
    let mut html = String::with_capacity(8 * 1024);

    // Writing into a String only fails if a Display impl does
    if let Err(e) = write_page(&mut html, view) {
        log::error!("Failed to render dashboard page: {}", e);
    }
    html
}

fn write_page(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>Project Evaluation</title>")?;
    writeln!(out, "<style>{}</style>", STYLE)?;
    writeln!(out, "<script src=\"{}\"></script>", PLOTLY_SRC)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>Project Evaluation</h1>")?;

    write_form(out, view)?;

    if let Some(error) = &view.error {
        writeln!(
            out,
            "<div id=\"error-output\" class=\"alert alert-danger\">{}</div>",
            escape_html(error)
        )?;
    }

    write_alert(out, "npv-output", &view.npv_alert)?;
    write_alert(out, "irr-output", &view.irr_alert)?;

    writeln!(out, "<div id=\"cash-flow-chart\" class=\"chart\"></div>")?;
    writeln!(out, "<div id=\"roi-chart\" class=\"chart\"></div>")?;

    if let Some(dump) = &view.debug_dump {
        writeln!(out, "<h2>Debug</h2>")?;
        writeln!(out, "<pre id=\"debug-state\">{}</pre>", escape_html(dump))?;
    }

    write_chart_script(out, "cash-flow-chart", view.cash_flow_chart.as_ref())?;
    write_chart_script(out, "roi-chart", view.roi_chart.as_ref())?;

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn write_form(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    let form = &view.form;

    writeln!(out, "<form method=\"post\" action=\"/calculate\">")?;
    writeln!(out, "<div class=\"row\">")?;

    writeln!(out, "<div>")?;
    write_number_field(out, "investment", "Initial investment:", form.investment, "0.01")?;
    writeln!(
        out,
        "<div class=\"field\"><label for=\"years\">Number of years:</label>\
         <input id=\"years\" name=\"years\" type=\"number\" min=\"1\" max=\"{}\" step=\"1\" value=\"{}\" \
         onchange=\"document.getElementById('years-button').click()\"></div>",
        MAX_YEARS, form.years
    )?;
    write_number_field(
        out,
        "cost_of_capital",
        "Cost of capital (%):",
        form.cost_of_capital_pct,
        "0.01",
    )?;
    writeln!(out, "</div>")?;

    writeln!(out, "<div id=\"flows-container\">")?;
    for (i, value) in form.flows.iter().enumerate() {
        let year = i + 1;
        let label = format!("Cash flow year {}:", year);
        write_number_field(out, &flow_field_name(year), &label, Some(*value), "0.01")?;
    }
    // Calculate comes first so Enter submits a calculation
    writeln!(out, "<button id=\"calculate-button\" type=\"submit\">Calculate</button>")?;
    writeln!(
        out,
        "<button id=\"years-button\" type=\"submit\" formaction=\"/years\">Update years</button>"
    )?;
    writeln!(out, "</div>")?;

    writeln!(out, "</div>")?;
    writeln!(out, "</form>")
}

fn write_number_field(
    out: &mut String,
    name: &str,
    label: &str,
    value: Option<f64>,
    step: &str,
) -> std::fmt::Result {
    let value = value.map(|v| v.to_string()).unwrap_or_default();
    writeln!(
        out,
        "<div class=\"field\"><label for=\"{name}\">{label}</label>\
         <input id=\"{name}\" name=\"{name}\" type=\"number\" min=\"0\" step=\"{step}\" value=\"{value}\"></div>",
        name = name,
        label = escape_html(label),
        step = step,
        value = escape_html(&value),
    )
}

fn write_alert(out: &mut String, id: &str, alert: &Alert) -> std::fmt::Result {
    writeln!(
        out,
        "<div id=\"{}\" class=\"alert alert-{}\">{}</div>",
        id,
        alert.indicator.as_str(),
        escape_html(&alert.message)
    )
}

fn write_chart_script(out: &mut String, element_id: &str, figure: Option<&Figure>) -> std::fmt::Result {
    let Some(figure) = figure else {
        return Ok(());
    };

    let json = match serde_json::to_string(figure) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize {} figure: {}", element_id, e);
            return Ok(());
        }
    };

    writeln!(
        out,
        "<script>Plotly.newPlot(\"{}\", {});</script>",
        element_id,
        // Keep the JSON from closing the script element
        json.replace("</", "<\\/")
    )
}

/// Escape text for element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

//! Chart payloads handed to the front end.
//!
//! These mirror the shape a plotting library expects (traces plus a layout)
//! so the client can render them without reshaping anything.

use serde::Serialize;
use time::OffsetDateTime;
use time::macros::format_description;

/// `"Last updated: 03:04:05 PM 29-12-2024"`.
#[must_use]
pub fn last_updated_title(now: OffsetDateTime) -> String {
    let pattern = format_description!("[hour repr:12]:[minute]:[second] [period] [day]-[month]-[year]");
    let stamp = now.format(pattern).unwrap_or_else(|_| now.to_string());
    format!("Last updated: {stamp}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineShape {
    Linear,
    Spline,
}

/// One named line. `x` is kept as strings so dates and table timestamps share a type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub shape: LineShape,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layout {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    pub show_legend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub traces: Vec<LineTrace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
    pub hover_text: Vec<String>,
    pub bar_gap: f64,
    pub layout: Layout,
}

//! Mill feed and performance forecast.
//!
//! DESIGN
//! ======
//! Three charts back this view:
//! - weekly AG mill throughput (fixed demo figures),
//! - stockpile feed quality, sampled by [`crate::series`],
//! - measured vs. XGB-predicted throughput, read from a JSON-lines table.
//!
//! The prediction table is loaded once at startup. Each line is an object
//! with a `time` label and `<mill>_Real-Data` / `<mill>_XGB` numeric columns.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use time::macros::date;
use time::{Date, Duration, OffsetDateTime};

use crate::chart::{Layout, LineChart, LineShape, LineTrace, last_updated_title};
use crate::series::{self, SeriesSet};

pub const MILLS: [&str; 6] = ["Mill #1", "Mill #2", "Mill #3", "Mill #4", "Mill #5", "Mill #6"];
pub const DEFAULT_MILL_SELECTION: [&str; 3] = ["Mill #1", "Mill #2", "Mill #3"];
pub const DEFAULT_STOCKPILE_SELECTION: [&str; 3] = ["S1", "S2", "S3"];
pub const DEFAULT_ATTRIBUTE: &str = "Hardness";

const WINDOW_START: Date = date!(2024 - 10 - 06);
const WINDOW_END: Date = date!(2024 - 12 - 29);

/// Weekly throughput in tph, one row per entry of [`MILLS`].
const THROUGHPUT_TPH: [[f64; 12]; 6] = [
    [1600.0, 1450.0, 1550.0, 1300.0, 1600.0, 1250.0, 1450.0, 1500.0, 1600.0, 1250.0, 1550.0, 1450.0],
    [1200.0, 1300.0, 1150.0, 1350.0, 1200.0, 1100.0, 1250.0, 1400.0, 1200.0, 1300.0, 1250.0, 1450.0],
    [1000.0, 1150.0, 1020.0, 900.0, 1050.0, 980.0, 1100.0, 1150.0, 1250.0, 1050.0, 1200.0, 1000.0],
    [1400.0, 1450.0, 1300.0, 1250.0, 1400.0, 1150.0, 1350.0, 1450.0, 1500.0, 1300.0, 1550.0, 1600.0],
    [1100.0, 1050.0, 1150.0, 1250.0, 1100.0, 1200.0, 1150.0, 1300.0, 1250.0, 1350.0, 1200.0, 1400.0],
    [800.0, 950.0, 870.0, 800.0, 850.0, 900.0, 950.0, 800.0, 860.0, 910.0, 800.0, 850.0],
];

const REAL_SUFFIX: &str = "_Real-Data";
const PREDICTED_SUFFIX: &str = "_XGB";

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MillError {
    #[error("unknown mill '{0}'")]
    UnknownMill(String),
    #[error("unknown stockpile '{0}'")]
    UnknownStockpile(String),
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),
    #[error("prediction table has no column '{0}'")]
    MissingColumn(String),
    #[error("prediction table line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("prediction table unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Series(#[from] series::SeriesError),
}

// =============================================================================
// THROUGHPUT
// =============================================================================

/// Dashboard reporting window, one date per week.
#[must_use]
pub fn weekly_dates() -> Vec<Date> {
    series::date_range(WINDOW_START, WINDOW_END, Duration::days(7))
}

fn date_labels(dates: &[Date]) -> Vec<String> {
    dates.iter().map(ToString::to_string).collect()
}

/// Weekly throughput per mill. The fixed figures cover twelve of the
/// thirteen weeks, so each line stops at the shorter of the two.
#[must_use]
pub fn throughput_chart(now: OffsetDateTime) -> LineChart {
    let labels = date_labels(&weekly_dates());
    let traces = MILLS
        .iter()
        .zip(THROUGHPUT_TPH.iter())
        .map(|(mill, tph)| {
            let len = labels.len().min(tph.len());
            LineTrace {
                name: (*mill).to_owned(),
                x: labels[..len].to_vec(),
                y: tph[..len].to_vec(),
                shape: LineShape::Spline,
            }
        })
        .collect();

    LineChart {
        traces,
        layout: Layout {
            title: last_updated_title(now),
            x_axis_title: "Date and Time".into(),
            y_axis_title: "Throughput Rate - tph".into(),
            show_legend: true,
            ..Layout::default()
        },
    }
}

// =============================================================================
// FEED QUALITY
// =============================================================================

/// One "Feed Belt" line per selected stockpile for a single attribute.
///
/// # Errors
///
/// Fails on a stockpile or attribute the series does not contain.
pub fn feed_chart(
    set: &SeriesSet,
    stockpiles: &[String],
    attribute: &str,
    now: OffsetDateTime,
) -> Result<LineChart, MillError> {
    let mut traces = Vec::with_capacity(stockpiles.len());
    for stockpile in stockpiles {
        let Some(series) = set.get(stockpile) else {
            return Err(MillError::UnknownStockpile(stockpile.clone()));
        };
        let trace = set
            .trace(&series.entity, attribute)
            .ok_or_else(|| MillError::UnknownAttribute(attribute.to_owned()))?;
        traces.push(LineTrace {
            name: format!("Feed Belt - {stockpile}"),
            x: date_labels(&trace.dates),
            y: trace.values,
            shape: LineShape::Spline,
        });
    }

    Ok(LineChart {
        traces,
        layout: Layout {
            title: last_updated_title(now),
            x_axis_title: "Date".into(),
            y_axis_title: attribute.to_owned(),
            legend_title: Some("Stockpile and Data Type".into()),
            template: Some("plotly_dark".into()),
            show_legend: true,
            ..Layout::default()
        },
    })
}

// =============================================================================
// PREDICTION TABLE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRow {
    pub time: String,
    pub columns: BTreeMap<String, f64>,
}

/// Measured and predicted throughput per mill over time.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PredictionTable {
    pub rows: Vec<PredictionRow>,
}

impl PredictionTable {
    /// Read a JSON-lines table from disk.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or any line is malformed.
    pub async fn load(path: &Path) -> Result<Self, MillError> {
        let raw = tokio::fs::read_to_string(path).await?;
        Self::parse_jsonl(&raw)
    }

    /// Parse JSON lines. Blank lines are skipped; non-numeric columns other
    /// than `time` are ignored.
    ///
    /// # Errors
    ///
    /// Fails on a line that is not a JSON object or lacks `time`.
    pub fn parse_jsonl(raw: &str) -> Result<Self, MillError> {
        let mut rows = Vec::new();
        for (idx, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            rows.push(parse_row(line).map_err(|message| MillError::Parse { line: idx + 1, message })?);
        }
        Ok(Self { rows })
    }

    /// Values of one column across all rows, with the matching time labels.
    ///
    /// # Errors
    ///
    /// Returns [`MillError::MissingColumn`] if no row carries `column`.
    pub fn column(&self, column: &str) -> Result<(Vec<String>, Vec<f64>), MillError> {
        let mut times = Vec::new();
        let mut values = Vec::new();
        for row in &self.rows {
            if let Some(v) = row.columns.get(column) {
                times.push(row.time.clone());
                values.push(*v);
            }
        }
        if values.is_empty() {
            return Err(MillError::MissingColumn(column.to_owned()));
        }
        Ok((times, values))
    }
}

fn parse_row(line: &str) -> Result<PredictionRow, String> {
    let value: serde_json::Value = serde_json::from_str(line).map_err(|e| e.to_string())?;
    let serde_json::Value::Object(map) = value else {
        return Err("expected a JSON object".into());
    };

    let time = match map.get("time").or_else(|| map.get("Time")) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => return Err("missing 'time'".into()),
    };

    let columns = map
        .iter()
        .filter(|(k, _)| !k.eq_ignore_ascii_case("time"))
        .filter_map(|(k, v)| v.as_f64().map(|f| (k.clone(), f)))
        .collect();

    Ok(PredictionRow { time, columns })
}

/// Measured and predicted lines for each selected mill.
///
/// # Errors
///
/// Fails on an unknown mill or when the table lacks its columns.
pub fn prediction_chart(table: &PredictionTable, mills: &[String], now: OffsetDateTime) -> Result<LineChart, MillError> {
    let mut traces = Vec::with_capacity(mills.len() * 2);
    for mill in mills {
        if !MILLS.contains(&mill.as_str()) {
            return Err(MillError::UnknownMill(mill.clone()));
        }
        let (x, y) = table.column(&format!("{mill}{REAL_SUFFIX}"))?;
        traces.push(LineTrace { name: format!("{mill} Real-Data"), x, y, shape: LineShape::Linear });
        let (x, y) = table.column(&format!("{mill}{PREDICTED_SUFFIX}"))?;
        traces.push(LineTrace { name: format!("{mill} XGB Prediction"), x, y, shape: LineShape::Linear });
    }

    Ok(LineChart {
        traces,
        layout: Layout {
            title: format!("{} <br>Throughput Predictions for Selected Mills ", last_updated_title(now)),
            x_axis_title: "Time".into(),
            y_axis_title: "Throughput".into(),
            legend_title: Some("Mill and Data Type".into()),
            template: Some("plotly_dark".into()),
            show_legend: true,
            ..Layout::default()
        },
    })
}

#[cfg(test)]
#[path = "mill_test.rs"]
mod tests;

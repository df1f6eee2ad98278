//! RoM ore stockpile filling levels.
//!
//! Each of the six stockpiles is split into three compartments. Levels,
//! colors, and the orebody blend per compartment are fixed demo values.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::chart::{BarChart, Layout, last_updated_title};

/// Per-compartment fill level (%), color, and orebody A..D blend (%).
const COMPARTMENTS: [(&str, f64, &str, [u8; 4]); 18] = [
    ("S1-1", 68.0, "#6AABF0", [29, 27, 28, 23]),
    ("S1-2", 72.0, "#4B91E8", [29, 27, 28, 23]),
    ("S1-3", 56.0, "#2F78D0", [30, 28, 26, 22]),
    ("S2-1", 39.0, "#FFB685", [25, 24, 26, 25]),
    ("S2-2", 19.0, "#F59A55", [26, 23, 27, 24]),
    ("S2-3", 55.0, "#D47A30", [27, 25, 28, 20]),
    ("S3-1", 67.0, "#89E0B5", [29, 25, 27, 19]),
    ("S3-2", 19.0, "#68D69E", [30, 27, 25, 18]),
    ("S3-3", 53.0, "#4CB47C", [28, 26, 24, 22]),
    ("S4-1", 17.0, "#F7E08A", [26, 24, 27, 23]),
    ("S4-2", 72.0, "#F4D35E", [25, 23, 28, 24]),
    ("S4-3", 87.0, "#D1B342", [27, 25, 26, 22]),
    ("S5-1", 66.0, "#7ADFF2", [26, 25, 24, 25]),
    ("S5-2", 24.0, "#55D0E8", [30, 28, 22, 20]),
    ("S5-3", 55.0, "#38A9BE", [29, 27, 23, 21]),
    ("S6-1", 40.0, "#F2A5B3", [32, 30, 23, 15]),
    ("S6-2", 89.0, "#EC7F9D", [33, 31, 22, 14]),
    ("S6-3", 54.0, "#C86479", [31, 28, 24, 17]),
];

const OREBODIES: [&str; 4] = ["A", "B", "C", "D"];

/// Data refresh cadence offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RefreshInterval {
    #[default]
    #[serde(rename = "5 mins")]
    FiveMinutes,
    #[serde(rename = "10 mins")]
    TenMinutes,
    #[serde(rename = "30 mins")]
    ThirtyMinutes,
    #[serde(rename = "60 mins")]
    SixtyMinutes,
}

impl RefreshInterval {
    pub const ALL: [Self; 4] = [Self::FiveMinutes, Self::TenMinutes, Self::ThirtyMinutes, Self::SixtyMinutes];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FiveMinutes => "5 mins",
            Self::TenMinutes => "10 mins",
            Self::ThirtyMinutes => "30 mins",
            Self::SixtyMinutes => "60 mins",
        }
    }

    #[must_use]
    pub fn minutes(self) -> u32 {
        match self {
            Self::FiveMinutes => 5,
            Self::TenMinutes => 10,
            Self::ThirtyMinutes => 30,
            Self::SixtyMinutes => 60,
        }
    }

    /// Accepts `"10 mins"` as shown in the selector, or a bare minute count.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let minutes = raw.strip_suffix("mins").map_or(raw, str::trim);
        Self::ALL
            .into_iter()
            .find(|i| minutes.parse::<u32>().ok() == Some(i.minutes()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillingView {
    pub interval: RefreshInterval,
    pub intervals: Vec<&'static str>,
    pub chart: BarChart,
}

fn hover_text(blend: [u8; 4]) -> String {
    OREBODIES
        .iter()
        .zip(blend)
        .map(|(name, pct)| format!("orebody {name}: {pct}%"))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Build the filling-level bar chart.
#[must_use]
pub fn filling_view(interval: RefreshInterval, now: OffsetDateTime) -> FillingView {
    let chart = BarChart {
        categories: COMPARTMENTS.iter().map(|c| c.0.to_owned()).collect(),
        values: COMPARTMENTS.iter().map(|c| c.1).collect(),
        colors: COMPARTMENTS.iter().map(|c| c.2.to_owned()).collect(),
        hover_text: COMPARTMENTS.iter().map(|c| hover_text(c.3)).collect(),
        bar_gap: 0.05,
        layout: Layout {
            title: last_updated_title(now),
            x_axis_title: "Stockpile".into(),
            y_axis_title: "Stockpile Filling Level (%)".into(),
            y_range: Some([0.0, 100.0]),
            show_legend: false,
            ..Layout::default()
        },
    };

    FillingView { interval, intervals: RefreshInterval::ALL.iter().map(|i| i.as_str()).collect(), chart }
}

#[cfg(test)]
#[path = "stockpile_test.rs"]
mod tests;

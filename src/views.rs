//! The four dashboard views.
//!
//! The sidebar selection is an enum, not a string; routing matches on it
//! with one handler per variant (see `routes::dashboard::view_payload`).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    StockpileFilling,
    MillForecast,
    ProcessParameters,
    DatabaseConnection,
}

impl View {
    /// Sidebar order.
    pub const ALL: [Self; 4] = [Self::StockpileFilling, Self::MillForecast, Self::ProcessParameters, Self::DatabaseConnection];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::StockpileFilling => "stockpile-filling",
            Self::MillForecast => "mill-forecast",
            Self::ProcessParameters => "process-parameters",
            Self::DatabaseConnection => "database-connection",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::StockpileFilling => "Ore Stockpile Filling Prediction",
            Self::MillForecast => "Mill Feed and Performance Forecast",
            Self::ProcessParameters => "Configure Process Parameters",
            Self::DatabaseConnection => "Configure Database Connection",
        }
    }

    /// Heading shown above the view's content.
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::StockpileFilling => "RoM Ore Stockpile Reconcilliation",
            Self::MillForecast => "Mill Feed Prediction",
            Self::ProcessParameters => "Configure Process Parameters",
            Self::DatabaseConnection => "Configure Database Connection",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.slug() == slug)
    }
}

/// Sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSummary {
    pub slug: &'static str,
    pub title: &'static str,
    pub heading: &'static str,
}

impl From<View> for ViewSummary {
    fn from(view: View) -> Self {
        Self { slug: view.slug(), title: view.title(), heading: view.heading() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_slug(view.slug()), Some(view));
        }
    }

    #[test]
    fn unknown_slug_is_none() {
        assert_eq!(View::from_slug("reports"), None);
        assert_eq!(View::from_slug(""), None);
    }

    #[test]
    fn sidebar_titles_in_order() {
        let titles: Vec<&str> = View::ALL.iter().map(|v| v.title()).collect();
        assert_eq!(
            titles,
            [
                "Ore Stockpile Filling Prediction",
                "Mill Feed and Performance Forecast",
                "Configure Process Parameters",
                "Configure Database Connection",
            ]
        );
    }

    #[test]
    fn summary_carries_slug_and_title() {
        let summary = ViewSummary::from(View::MillForecast);
        assert_eq!(summary.slug, "mill-forecast");
        assert_eq!(summary.heading, "Mill Feed Prediction");
    }
}

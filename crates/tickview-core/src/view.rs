//! Serializable dashboard output handed to a renderer.

use serde::{Deserialize, Serialize};

use crate::analysis::{self, ChartSpec, DerivedRow, DerivedTable};
use crate::{AnalysisError, PriceTable, Symbol};

/// User-facing status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Success(String),
    Error(String),
    Warning(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) | Self::Warning(message) => message,
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// A chart slot: either a chart or the warning shown in its place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartPanel {
    Chart(ChartSpec),
    Warning { message: String },
}

impl ChartPanel {
    pub fn chart(&self) -> Option<&ChartSpec> {
        match self {
            Self::Chart(spec) => Some(spec),
            Self::Warning { .. } => None,
        }
    }
}

/// Heading, full table, and both chart panels for one ticker and window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub heading: String,
    pub ticker: Symbol,
    pub window: usize,
    pub ma_column: String,
    pub table: Vec<DerivedRow>,
    pub price_chart: ChartPanel,
    pub return_chart: ChartPanel,
}

impl DashboardView {
    pub fn from_derived(derived: DerivedTable) -> Self {
        let window = derived.window;
        let price_chart = match analysis::price_chart(&derived) {
            Some(spec) => ChartPanel::Chart(spec),
            None => ChartPanel::Warning {
                message: format!("Not enough data to compute a {window}-day moving average."),
            },
        };
        let return_chart = match analysis::return_chart(&derived) {
            Some(spec) => ChartPanel::Chart(spec),
            None => ChartPanel::Warning {
                message: String::from("No valid percent return data points to plot."),
            },
        };

        Self {
            heading: format!("Showing data for {}", derived.symbol),
            ticker: derived.symbol,
            window: window.get(),
            ma_column: window.column_name(),
            table: derived.rows,
            price_chart,
            return_chart,
        }
    }

    /// Warnings standing in for omitted charts.
    pub fn warnings(&self) -> Vec<&str> {
        [&self.price_chart, &self.return_chart]
            .into_iter()
            .filter_map(|panel| match panel {
                ChartPanel::Warning { message } => Some(message.as_str()),
                ChartPanel::Chart(_) => None,
            })
            .collect()
    }
}

/// What the dashboard shows for the current session state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Presentation {
    /// Nothing fetched yet, or the last fetch failed.
    NoData,
    /// Data is loaded but derivation was skipped.
    Unavailable { notice: Notice },
    Dashboard(Box<DashboardView>),
}

/// Derive and shape `table` for `window`. Derivation failures become an
/// error notice instead of a dashboard.
pub fn present(table: &PriceTable, window: usize) -> Presentation {
    match analysis::derive(table, window) {
        Ok(derived) => Presentation::Dashboard(Box::new(DashboardView::from_derived(derived))),
        Err(error) => Presentation::Unavailable {
            notice: Notice::Error(analysis_message(&error)),
        },
    }
}

/// User-facing text for a derivation failure.
pub fn analysis_message(error: &AnalysisError) -> String {
    match error {
        AnalysisError::InsufficientRows { .. } => {
            String::from("Not enough data to perform analysis. Try a wider date range.")
        }
        other => other.to_string(),
    }
}

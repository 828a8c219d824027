//! Single-user dashboard session.
//!
//! State machine: `NoData → (fetch ok) → HasData → (fetch failed) → NoData`.
//! A successful fetch in `HasData` replaces the dataset wholesale. Window
//! changes re-derive from the stored table and never touch the source.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::{Window, MIN_ROWS};
use crate::data_source::{HistoryRequest, PriceSource, SourceError};
use crate::view::{self, Notice, Presentation};
use crate::{AnalysisError, PriceTable, Symbol};

pub const DEFAULT_TICKER: &str = "AAPL";
pub const DEFAULT_START: &str = "2020-01-01";
pub const DEFAULT_END: &str = "2023-01-01";

/// Raw values of the ticker and date widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInputs {
    pub ticker: String,
    pub start: String,
    pub end: String,
}

impl Default for SessionInputs {
    fn default() -> Self {
        Self {
            ticker: String::from(DEFAULT_TICKER),
            start: String::from(DEFAULT_START),
            end: String::from(DEFAULT_END),
        }
    }
}

/// Fetched dataset, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    NoData,
    HasData { ticker: Symbol, table: PriceTable },
}

pub struct Session {
    source: Arc<dyn PriceSource>,
    inputs: SessionInputs,
    state: SessionState,
    requested_window: Option<usize>,
}

impl Session {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self::with_inputs(source, SessionInputs::default())
    }

    pub fn with_inputs(source: Arc<dyn PriceSource>, inputs: SessionInputs) -> Self {
        Self {
            source,
            inputs,
            state: SessionState::NoData,
            requested_window: None,
        }
    }

    pub fn inputs(&self) -> &SessionInputs {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut SessionInputs {
        &mut self.inputs
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn has_data(&self) -> bool {
        matches!(self.state, SessionState::HasData { .. })
    }

    pub fn source(&self) -> &dyn PriceSource {
        self.source.as_ref()
    }

    /// Fetch trigger: one attempt with the current inputs. Any failure,
    /// including invalid input or an empty result, clears the dataset.
    pub async fn fetch(&mut self) -> Notice {
        let request = match HistoryRequest::parse(
            &self.inputs.ticker,
            &self.inputs.start,
            &self.inputs.end,
        ) {
            Ok(request) => request,
            Err(error) => return self.fail(SourceError::from(error)),
        };
        let ticker = request.symbol.clone();

        let result = self.source.daily_history(request).await;
        match result {
            Ok(table) if table.is_empty() => {
                tracing::warn!(%ticker, "fetch returned no rows");
                self.state = SessionState::NoData;
                Notice::Error(String::from(
                    "No data found. Please check the ticker symbol and date range.",
                ))
            }
            Ok(table) => {
                let rows = table.len();
                tracing::info!(%ticker, rows, source = %self.source.id(), "fetch succeeded");
                self.state = SessionState::HasData {
                    ticker: ticker.clone(),
                    table,
                };
                Notice::Success(format!(
                    "Data fetched successfully for {ticker} with {rows} rows."
                ))
            }
            Err(error) => self.fail(error),
        }
    }

    fn fail(&mut self, error: SourceError) -> Notice {
        tracing::warn!(code = error.code(), %error, "fetch failed");
        self.state = SessionState::NoData;
        Notice::Error(format!("Error fetching data: {}", error.message()))
    }

    /// Current window: the user's choice while it fits the table, otherwise
    /// `min(20, rows)`.
    pub fn window(&self) -> Option<Window> {
        let SessionState::HasData { table, .. } = &self.state else {
            return None;
        };
        self.requested_window
            .and_then(|window| Window::new(window, table.len()).ok())
            .or_else(|| Window::default_for(table.len()))
    }

    /// Window input. Out-of-range values are rejected and the previous
    /// window stays in effect.
    pub fn set_window(&mut self, window: usize) -> Result<Window, AnalysisError> {
        let SessionState::HasData { table, .. } = &self.state else {
            return Err(AnalysisError::NoData);
        };
        if table.len() < MIN_ROWS {
            return Err(AnalysisError::InsufficientRows { rows: table.len() });
        }
        let window = Window::new(window, table.len())?;
        self.requested_window = Some(window.get());
        tracing::debug!(window = window.get(), "moving average window changed");
        Ok(window)
    }

    /// Recomputes the dashboard from the stored table and current window.
    pub fn present(&self) -> Presentation {
        match (&self.state, self.window()) {
            (SessionState::HasData { table, .. }, Some(window)) => {
                view::present(table, window.get())
            }
            _ => Presentation::NoData,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("source", &self.source.id())
            .field("inputs", &self.inputs)
            .field("state", &self.state)
            .field("requested_window", &self.requested_window)
            .finish()
    }
}

use serde::Serialize;

use crate::analysis::rolling::{moving_average, percent_change};
use crate::analysis::window::Window;
use crate::{AnalysisError, PriceRow, PriceTable, Symbol, TradingDate};

/// Fewest rows for which derived columns are computed.
pub const MIN_ROWS: usize = 2;

/// Price row plus its derived columns; `None` is an undefined value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedRow {
    #[serde(flatten)]
    pub price: PriceRow,
    pub moving_average: Option<f64>,
    pub percent_return: Option<f64>,
}

/// Full table with moving-average and percent-return columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedTable {
    pub symbol: Symbol,
    pub window: Window,
    pub rows: Vec<DerivedRow>,
}

impl DerivedTable {
    /// `(date, close, moving average)` for rows with a defined average.
    pub fn moving_average_points(&self) -> Vec<(TradingDate, f64, f64)> {
        self.rows
            .iter()
            .filter_map(|row| {
                row.moving_average
                    .map(|ma| (row.price.date, row.price.close, ma))
            })
            .collect()
    }

    /// `(date, percent return)` for rows with a defined return.
    pub fn return_points(&self) -> Vec<(TradingDate, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.percent_return.map(|ret| (row.price.date, ret)))
            .collect()
    }
}

/// Computes both derived columns from scratch for `table` and `window`.
pub fn derive(table: &PriceTable, window: usize) -> Result<DerivedTable, AnalysisError> {
    if table.len() < MIN_ROWS {
        return Err(AnalysisError::InsufficientRows { rows: table.len() });
    }
    let window = Window::new(window, table.len())?;

    let closes = table.closes();
    let averages = moving_average(&closes, window.get());
    let returns = percent_change(&closes);

    let rows = table
        .rows()
        .iter()
        .zip(averages)
        .zip(returns)
        .map(|((price, moving_average), percent_return)| DerivedRow {
            price: price.clone(),
            moving_average,
            percent_return,
        })
        .collect();

    Ok(DerivedTable {
        symbol: table.symbol.clone(),
        window,
        rows,
    })
}

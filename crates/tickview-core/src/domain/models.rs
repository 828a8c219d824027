use serde::Serialize;

use crate::{Symbol, TradingDate, ValidationError};

/// One daily price row. Only `close` feeds the derived columns; the rest is
/// carried through to the table view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRow {
    pub date: TradingDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub adj_close: Option<f64>,
    pub volume: Option<u64>,
}

impl PriceRow {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: TradingDate,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: f64,
        adj_close: Option<f64>,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_optional_non_negative("open", open)?;
        validate_optional_non_negative("high", high)?;
        validate_optional_non_negative("low", low)?;
        validate_optional_non_negative("adj_close", adj_close)?;
        validate_positive_close(date, close)?;

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            adj_close,
            volume,
        })
    }

    /// Row with only a closing price.
    pub fn close_only(date: TradingDate, close: f64) -> Result<Self, ValidationError> {
        Self::new(date, None, None, None, close, None, None)
    }
}

/// Date-ordered price history for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTable {
    pub symbol: Symbol,
    rows: Vec<PriceRow>,
}

impl PriceTable {
    /// Sorts rows by date and rejects duplicate dates.
    pub fn new(symbol: Symbol, mut rows: Vec<PriceRow>) -> Result<Self, ValidationError> {
        rows.sort_by_key(|row| row.date);
        if let Some(pair) = rows.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(ValidationError::DuplicateDate {
                date: pair[0].date.format_iso(),
            });
        }
        Ok(Self { symbol, rows })
    }

    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.close).collect()
    }

    pub fn first_date(&self) -> Option<TradingDate> {
        self.rows.first().map(|row| row.date)
    }
}

fn validate_positive_close(date: TradingDate, close: f64) -> Result<(), ValidationError> {
    if !close.is_finite() {
        return Err(ValidationError::NonFiniteValue { field: "close" });
    }
    if close <= 0.0 {
        return Err(ValidationError::NonPositiveClose {
            date: date.format_iso(),
        });
    }
    Ok(())
}

fn validate_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue { field });
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeValue { field });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> TradingDate {
        TradingDate::parse(value).expect("valid date")
    }

    #[test]
    fn rejects_zero_close() {
        let err = PriceRow::close_only(date("2024-01-02"), 0.0).expect_err("must fail");
        assert!(matches!(err, ValidationError::NonPositiveClose { .. }));
    }

    #[test]
    fn rejects_nan_open() {
        let err = PriceRow::new(date("2024-01-02"), Some(f64::NAN), None, None, 1.0, None, None)
            .expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NonFiniteValue { field: "open" }
        ));
    }

    #[test]
    fn table_sorts_rows_by_date() {
        let symbol = Symbol::parse("AAPL").expect("symbol");
        let rows = vec![
            PriceRow::close_only(date("2024-01-03"), 11.0).expect("row"),
            PriceRow::close_only(date("2024-01-02"), 10.0).expect("row"),
        ];
        let table = PriceTable::new(symbol, rows).expect("table");
        assert_eq!(table.closes(), vec![10.0, 11.0]);
        assert_eq!(table.first_date(), Some(date("2024-01-02")));
    }

    #[test]
    fn table_rejects_duplicate_dates() {
        let symbol = Symbol::parse("AAPL").expect("symbol");
        let rows = vec![
            PriceRow::close_only(date("2024-01-02"), 10.0).expect("row"),
            PriceRow::close_only(date("2024-01-02"), 10.5).expect("row"),
        ];
        let err = PriceTable::new(symbol, rows).expect_err("must fail");
        assert!(matches!(err, ValidationError::DuplicateDate { .. }));
    }
}

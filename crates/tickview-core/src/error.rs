use thiserror::Error;

/// Validation and contract errors exposed by `tickview-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter or '^': '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("start date {start} must be before end date {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("closing price must be greater than zero on {date}")]
    NonPositiveClose { date: String },
    #[error("duplicate price row for {date}")]
    DuplicateDate { date: String },

    #[error("moving average window {window} must be between 1 and {max}")]
    WindowOutOfRange { window: usize, max: usize },
}

/// Errors raised by the derivation pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("no data loaded; fetch a ticker first")]
    NoData,

    #[error("not enough data to perform analysis: {rows} row(s), at least 2 required")]
    InsufficientRows { rows: usize },

    #[error(transparent)]
    Window(#[from] ValidationError),
}

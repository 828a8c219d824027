//! # Domain Models
//!
//! Validated value types shared by the data sources, the derivation
//! pipeline, and the dashboard view.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker symbol |
//! | [`TradingDate`] | Calendar date of a daily row (`YYYY-MM-DD`) |
//! | [`DateRange`] | Half-open `[start, end)` request range |
//! | [`PriceRow`] | One daily OHLC row with a required close |
//! | [`PriceTable`] | Date-ordered rows for one symbol |
//!
//! All constructors enforce their invariants:
//!
//! ```rust
//! use tickview_core::{DateRange, ValidationError};
//!
//! let err = DateRange::parse("2023-01-01", "2020-01-01").unwrap_err();
//! assert!(matches!(err, ValidationError::InvalidDateRange { .. }));
//! ```

mod date_range;
mod models;
mod symbol;
mod trading_date;

pub use date_range::DateRange;
pub use models::{PriceRow, PriceTable};
pub use symbol::Symbol;
pub use trading_date::TradingDate;

//! Derivation pipeline: price table → derived columns → chart series.
//!
//! Everything here is a pure function of `(&PriceTable, window)`; nothing is
//! cached between calls.

mod chart;
mod derive;
pub mod rolling;
mod window;

pub use chart::{price_chart, return_chart, ChartPoint, ChartSeries, ChartSpec};
pub use derive::{derive, DerivedRow, DerivedTable, MIN_ROWS};
pub use window::{Window, DEFAULT_WINDOW};

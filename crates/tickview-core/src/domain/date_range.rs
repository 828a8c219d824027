use serde::{Deserialize, Serialize};

use crate::{TradingDate, ValidationError};

/// Half-open `[start, end)` range of trading dates requested from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: TradingDate,
    end: TradingDate,
}

impl DateRange {
    pub fn new(start: TradingDate, end: TradingDate) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidDateRange {
                start: start.format_iso(),
                end: end.format_iso(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(TradingDate::parse(start)?, TradingDate::parse(end)?)
    }

    pub const fn start(&self) -> TradingDate {
        self.start
    }

    /// Exclusive upper bound.
    pub const fn end(&self) -> TradingDate {
        self.end
    }

    pub fn contains(&self, date: TradingDate) -> bool {
        self.start <= date && date < self.end
    }
}

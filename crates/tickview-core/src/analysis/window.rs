use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::ValidationError;

pub const DEFAULT_WINDOW: usize = 20;

/// Moving-average window validated against a table size: `1 <= w <= rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Window(usize);

impl Window {
    pub fn new(window: usize, row_count: usize) -> Result<Self, ValidationError> {
        if window == 0 || window > row_count {
            return Err(ValidationError::WindowOutOfRange {
                window,
                max: row_count,
            });
        }
        Ok(Self(window))
    }

    /// `min(20, rows)`, or `None` for an empty table.
    pub fn default_for(row_count: usize) -> Option<Self> {
        (row_count > 0).then(|| Self(DEFAULT_WINDOW.min(row_count)))
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// Table column label, e.g. `MA20`.
    pub fn column_name(self) -> String {
        format!("MA{}", self.0)
    }
}

impl Display for Window {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

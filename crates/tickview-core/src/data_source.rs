//! Price source contract and request/error types.
//!
//! A [`PriceSource`] turns a [`HistoryRequest`] (symbol + date range) into a
//! [`PriceTable`] of daily rows, or a [`SourceError`]. An empty table is a
//! valid answer; deciding what "no data" means is left to the session.
//!
//! ```rust,ignore
//! use tickview_core::{DateRange, HistoryRequest, PriceSource, Symbol, SyntheticSource};
//!
//! async fn load() -> Result<(), tickview_core::SourceError> {
//!     let request = HistoryRequest::new(
//!         Symbol::parse("AAPL")?,
//!         DateRange::parse("2020-01-01", "2023-01-01")?,
//!     );
//!     let table = SyntheticSource::default().daily_history(request).await?;
//!     println!("{} rows", table.len());
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{DateRange, HttpError, PriceTable, Symbol, ValidationError};

/// Identifier of a price source implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    Yahoo,
    Synthetic,
}

impl ProviderId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::Synthetic => "synthetic",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    InvalidRequest,
    NotFound,
    Unavailable,
    RateLimited,
    Internal,
}

/// Structured error returned by a price source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::InvalidRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NotFound, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Unavailable, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::RateLimited, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Internal, message)
    }

    fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<ValidationError> for SourceError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_request(error.to_string())
    }
}

impl From<HttpError> for SourceError {
    fn from(error: HttpError) -> Self {
        if error.timed_out() {
            Self::unavailable(format!("transport timeout: {}", error.message()))
        } else {
            Self::unavailable(format!("transport error: {}", error.message()))
        }
    }
}

/// Daily history request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub range: DateRange,
}

impl HistoryRequest {
    pub fn new(symbol: Symbol, range: DateRange) -> Self {
        Self { symbol, range }
    }

    /// Validates raw widget input.
    pub fn parse(ticker: &str, start: &str, end: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(Symbol::parse(ticker)?, DateRange::parse(start, end)?))
    }
}

/// Retrieval contract: symbol + date range → daily rows, or failure.
///
/// Implementations must be `Send + Sync`; the session holds one behind an
/// `Arc<dyn PriceSource>`.
pub trait PriceSource: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Fetches daily rows for `req.range`. A range with no trading days
    /// yields an empty table rather than an error.
    fn daily_history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceTable, SourceError>> + Send + 'a>>;
}

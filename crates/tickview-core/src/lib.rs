//! # tickview Core
//!
//! Domain types, price sources, and the derivation pipeline behind the
//! tickview price dashboard.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Price sources (Yahoo chart API, synthetic) |
//! | [`analysis`] | Moving average, percent return, chart shaping |
//! | [`data_source`] | `PriceSource` trait, requests, source errors |
//! | [`domain`] | Symbol, dates, price rows and tables |
//! | [`error`] | Validation and analysis errors |
//! | [`http_client`] | HTTP transport seam |
//! | [`session`] | Session state and user actions |
//! | [`view`] | Serializable dashboard output |
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐  fetch   ┌─────────────┐  derive   ┌──────────────┐
//! │ SessionInputs│────────▶│ PriceTable  │─────────▶│ DerivedTable │
//! └──────────────┘          └─────────────┘ (window)  └──────┬───────┘
//!                                                           │ shape
//!                                                           ▼
//!                                                   ┌───────────────┐
//!                                                   │ DashboardView │
//!                                                   └───────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickview_core::{Presentation, Session, SyntheticSource};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut session = Session::new(Arc::new(SyntheticSource));
//!     println!("{}", session.fetch().await.message());
//!     session.set_window(50).ok();
//!     if let Presentation::Dashboard(view) = session.present() {
//!         println!("{} rows, column {}", view.table.len(), view.ma_column);
//!     }
//! }
//! ```

pub mod adapters;
pub mod analysis;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod session;
pub mod view;

pub use adapters::{SyntheticSource, YahooSource};

pub use analysis::{
    derive, price_chart, return_chart, ChartPoint, ChartSeries, ChartSpec, DerivedRow,
    DerivedTable, Window,
};

pub use data_source::{HistoryRequest, PriceSource, ProviderId, SourceError, SourceErrorKind};

pub use domain::{DateRange, PriceRow, PriceTable, Symbol, TradingDate};

pub use error::{AnalysisError, ValidationError};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use session::{Session, SessionInputs, SessionState};

pub use view::{analysis_message, present, ChartPanel, DashboardView, Notice, Presentation};

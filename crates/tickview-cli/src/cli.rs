//! CLI argument definitions for tickview.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `session` | Interactive dashboard driven by typed commands |
//! | `show` | One-shot fetch, derive, and render |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `text` | Output format (text, json) |
//! | `--source` | `yahoo` | Price source |
//! | `--timeout-ms` | `10000` | Fetch timeout in ms |
//! | `--chart-width` | `72` | Plot width in columns |
//! | `--chart-height` | `16` | Plot height in rows |
//! | `--rows` | all | Show only the last N table rows |
//! | `--log-level` | `warn` | Tracing filter when `RUST_LOG` is unset |
//!
//! # Examples
//!
//! ```bash
//! tickview show MSFT --start 2021-01-01 --end 2022-01-01 --window 50
//! tickview --source synthetic session
//! tickview --format json show AAPL
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use tickview_core::session::{DEFAULT_END, DEFAULT_START, DEFAULT_TICKER};

/// Stock price dashboard: closing price, moving average, and daily returns.
#[derive(Debug, Parser)]
#[command(
    name = "tickview",
    author,
    version,
    about = "Stock price dashboard for the terminal",
    long_about = "tickview fetches daily price history for a ticker, derives a moving \
average and day-over-day percent returns, and renders a table plus two line charts.\n\
\n\
Use 'tickview session' for the interactive dashboard or 'tickview show' for a one-shot view."
)]
pub struct Cli {
    /// Output format for views and messages.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Price source to fetch history from.
    #[arg(long, global = true, value_enum, default_value_t = SourceSelector::Yahoo)]
    pub source: SourceSelector,

    /// Fetch timeout in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Chart plot width in terminal columns.
    #[arg(long, global = true, default_value_t = 72, value_parser = clap::value_parser!(u16).range(24..))]
    pub chart_width: u16,

    /// Chart plot height in terminal rows.
    #[arg(long, global = true, default_value_t = 16, value_parser = clap::value_parser!(u16).range(8..))]
    pub chart_height: u16,

    /// Only print the last N table rows (default: all).
    #[arg(long, global = true)]
    pub rows: Option<usize>,

    /// Log filter used when RUST_LOG is not set (e.g. info, tickview_core=debug).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table and terminal line charts.
    Text,
    /// One JSON document per message or view.
    Json,
}

/// Price source selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceSelector {
    /// Yahoo Finance chart API.
    Yahoo,
    /// Deterministic offline data.
    Synthetic,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive dashboard.
    ///
    /// Inputs start at the given values; type `help` at the prompt for
    /// the command list.
    Session(InputArgs),

    /// Fetch once, render the dashboard, and exit.
    ///
    /// # Examples
    ///
    ///   tickview show
    ///   tickview show NVDA --start 2022-01-01 --end 2023-01-01 --window 10
    Show(ShowArgs),
}

/// Ticker and date inputs shared by both commands.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Ticker symbol.
    #[arg(default_value = DEFAULT_TICKER)]
    pub ticker: String,

    /// First date to include (YYYY-MM-DD).
    #[arg(long, default_value = DEFAULT_START)]
    pub start: String,

    /// Date to stop before (YYYY-MM-DD).
    #[arg(long, default_value = DEFAULT_END)]
    pub end: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Moving average window in rows (default: min(20, rows)).
    #[arg(long)]
    pub window: Option<usize>,
}
